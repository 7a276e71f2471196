use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// Shape of an argument handed to the dispatcher.
///
/// Setters are matched on their option name and on the shape they accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single text value.
    Text,
    /// An ordered sequence of text values.
    Texts,
    /// A type reference, see [`TypeRef`].
    Type,
    /// An already constructed object, see [`ObjectRef`].
    Object,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text value",
            Self::Texts => "text sequence",
            Self::Type => "type reference",
            Self::Object => "object reference",
        };
        f.write_str(name)
    }
}

/// Raw argument of a single dispatch call.
#[derive(Clone, Debug)]
pub enum ConfigArg {
    Text(String),
    Texts(Vec<String>),
    Type(TypeRef),
    Object(ObjectRef),
}

impl ConfigArg {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Text(_) => Shape::Text,
            Self::Texts(_) => Shape::Texts,
            Self::Type(_) => Shape::Type,
            Self::Object(_) => Shape::Object,
        }
    }
}

/// A shared, type-erased object handed to a setter.
///
/// An object exposes a set of *views*: its concrete type, plus any
/// capability trait objects registered with [`ObjectRef::with_capability`].
/// A setter declared for `Arc<C>` accepts the object only if it has a view
/// for `C`.
///
/// ```
/// use std::sync::Arc;
/// use fsopts::{ObjectRef, UserAuthenticator, StaticUserAuthenticator};
///
/// let auth = Arc::new(StaticUserAuthenticator::new("user", "secret"));
/// let obj = ObjectRef::from_arc(auth.clone())
///     .with_capability::<dyn UserAuthenticator>(auth);
///
/// assert!(obj.view::<StaticUserAuthenticator>().is_some());
/// assert!(obj.view::<dyn UserAuthenticator>().is_some());
/// assert!(obj.view::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct ObjectRef {
    type_name: &'static str,
    type_id: TypeId,
    // Each value is an `Arc<C>` for the `C` whose `TypeId` is the key.
    views: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ObjectRef {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::from_arc(Arc::new(value))
    }

    pub fn from_arc<T>(value: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        let mut views: HashMap<TypeId, Arc<dyn Any + Send + Sync>> = HashMap::new();
        views.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            views,
        }
    }

    /// Register an additional view of the object.
    ///
    /// `view` should point to the same value, upcast to a trait object.
    pub fn with_capability<C>(mut self, view: Arc<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.views.insert(TypeId::of::<C>(), Arc::new(view));
        self
    }

    /// Name of the concrete type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn has_view<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.views.contains_key(&TypeId::of::<C>())
    }

    /// Get the object as `C`, which is either the concrete type or a
    /// registered capability.
    pub fn view<C>(&self) -> Option<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.views
            .get(&TypeId::of::<C>())?
            .downcast_ref::<Arc<C>>()
            .cloned()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name)
            .field("views", &self.views.len())
            .finish()
    }
}

/// A named type descriptor.
///
/// Passed to [`crate::DelegatingOptionsBuilder::set_config_class`].
/// The dispatcher instantiates the type with its constructor and hands the
/// resulting [`ObjectRef`] to the setter.
#[derive(Clone)]
pub struct TypeRef {
    name: &'static str,
    type_id: TypeId,
    construct: Arc<dyn Fn() -> ObjectRef + Send + Sync>,
}

impl TypeRef {
    /// Reference to a type constructed with [`Default`], without any
    /// capability views.
    pub fn of<T>() -> Self
    where
        T: Default + Any + Send + Sync,
    {
        Self::with_constructor::<T, _>(|| ObjectRef::new(T::default()))
    }

    /// Reference to `T` with a custom constructor.
    ///
    /// Use this to register capability views on the created instances.
    pub fn with_constructor<T, F>(construct: F) -> Self
    where
        T: Any,
        F: Fn() -> ObjectRef + Send + Sync + 'static,
    {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            construct: Arc::new(construct),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn instantiate(&self) -> ObjectRef {
        (self.construct)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    #[derive(Default)]
    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_object_views() {
        let hello = Arc::new(Hello);
        let obj = ObjectRef::from_arc(hello.clone()).with_capability::<dyn Greeter>(hello);

        assert!(obj.is::<Hello>());
        assert!(obj.has_view::<dyn Greeter>());
        assert_eq!(obj.view::<dyn Greeter>().unwrap().greet(), "hello");
        assert!(obj.view::<Hello>().is_some());
        assert!(obj.view::<String>().is_none());
    }

    #[test]
    fn test_plain_object_has_no_capability() {
        let obj = ObjectRef::new(Hello);
        assert!(!obj.has_view::<dyn Greeter>());
    }

    #[test]
    fn test_type_ref_instantiates() {
        let plain = TypeRef::of::<String>();
        assert!(plain.is::<String>());
        let obj = plain.instantiate();
        assert_eq!(obj.view::<String>().unwrap().as_str(), "");

        let greeter = TypeRef::with_constructor::<Hello, _>(|| {
            let hello = Arc::new(Hello);
            ObjectRef::from_arc(hello.clone()).with_capability::<dyn Greeter>(hello)
        });
        assert!(greeter.instantiate().has_view::<dyn Greeter>());
        assert!(greeter.name().ends_with("Hello"));
    }
}
