use std::{any::Any, fmt, sync::Arc};

use crate::{
    ApplyError, ConfigArg, FileSystemOptions, FromText, ParamType, SetterOutcome, Shape,
};

type ApplyFn<B> =
    Arc<dyn Fn(&B, &mut FileSystemOptions, ConfigArg) -> Result<(), ApplyError> + Send + Sync>;

fn apply_fn<B, F>(apply: F) -> ApplyFn<B>
where
    F: Fn(&B, &mut FileSystemOptions, ConfigArg) -> Result<(), ApplyError> + Send + Sync + 'static,
{
    Arc::new(apply)
}

/// Derive the setter name for an option: `proxyHost` -> `setProxyHost`.
pub fn setter_name(option: &str) -> String {
    let mut chars = option.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => "set".to_string(),
    }
}

/// Description of a single option table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionInfo {
    pub option: String,
    pub setter: String,
    pub shape: Shape,
    pub param: ParamType,
}

struct OptionEntry<B> {
    info: OptionInfo,
    apply: ApplyFn<B>,
}

impl<B> Clone for OptionEntry<B> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            apply: self.apply.clone(),
        }
    }
}

/// Statically declared setters of a builder.
///
/// Each entry knows the argument shape it accepts, converts the raw
/// argument into the declared parameter type and invokes the typed setter.
///
/// ```
/// use fsopts::{ConfigBuilder, FileSystemOptions, OptionTable};
///
/// struct PingConfigBuilder;
///
/// impl PingConfigBuilder {
///     fn set_count(&self, opts: &mut FileSystemOptions, count: u32) {
///         opts.set("ping", "count", count);
///     }
/// }
///
/// impl ConfigBuilder for PingConfigBuilder {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn option_table(&self) -> &OptionTable<Self> {
///         static TABLE: std::sync::LazyLock<OptionTable<PingConfigBuilder>> =
///             std::sync::LazyLock::new(|| {
///                 OptionTable::new().text("count", PingConfigBuilder::set_count)
///             });
///         &TABLE
///     }
/// }
/// ```
pub struct OptionTable<B> {
    entries: Vec<OptionEntry<B>>,
}

impl<B> Default for OptionTable<B> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<B> fmt::Debug for OptionTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.info))
            .finish()
    }
}

impl<B: 'static> OptionTable<B> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push<F>(mut self, option: &str, shape: Shape, param: ParamType, apply: F) -> Self
    where
        F: Fn(&B, &mut FileSystemOptions, ConfigArg) -> Result<(), ApplyError>
            + Send
            + Sync
            + 'static,
    {
        self.entries.push(OptionEntry {
            info: OptionInfo {
                option: option.to_string(),
                setter: setter_name(option),
                shape,
                param,
            },
            apply: apply_fn(apply),
        });
        self
    }

    /// Add an option that takes a single value parsed from text.
    pub fn text<T, F, R>(self, option: &str, setter: F) -> Self
    where
        T: FromText,
        F: Fn(&B, &mut FileSystemOptions, T) -> R + Send + Sync + 'static,
        R: SetterOutcome,
    {
        self.push(option, Shape::Text, T::param_type(), move |b, opts, arg| {
            let ConfigArg::Text(text) = arg else {
                return Err(ApplyError::NoSuchOption);
            };
            let value = T::from_text(&text).map_err(|source| ApplyError::Coercion {
                target: T::param_type(),
                element: None,
                source,
            })?;
            setter(b, opts, value)
                .into_result()
                .map_err(ApplyError::Invocation)
        })
    }

    /// Add an option that takes an ordered sequence of values parsed from
    /// text.
    ///
    /// Every element is converted before the setter is invoked.
    pub fn texts<T, F, R>(self, option: &str, setter: F) -> Self
    where
        T: FromText,
        F: Fn(&B, &mut FileSystemOptions, Vec<T>) -> R + Send + Sync + 'static,
        R: SetterOutcome,
    {
        let param = ParamType::Array(Box::new(T::param_type()));
        self.push(option, Shape::Texts, param, move |b, opts, arg| {
            let ConfigArg::Texts(texts) = arg else {
                return Err(ApplyError::NoSuchOption);
            };
            let values = texts
                .iter()
                .enumerate()
                .map(|(index, text)| {
                    T::from_text(text).map_err(|source| ApplyError::Coercion {
                        target: T::param_type(),
                        element: Some(index),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            setter(b, opts, values)
                .into_result()
                .map_err(ApplyError::Invocation)
        })
    }

    /// Add an option that takes an object providing `C`.
    ///
    /// `C` is either a concrete type or a capability registered with
    /// [`crate::ObjectRef::with_capability`].
    pub fn object<C, F, R>(self, option: &str, setter: F) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&B, &mut FileSystemOptions, Arc<C>) -> R + Send + Sync + 'static,
        R: SetterOutcome,
    {
        let expected = std::any::type_name::<C>();
        self.push(
            option,
            Shape::Object,
            ParamType::Object(expected),
            move |b, opts, arg| {
                let ConfigArg::Object(obj) = arg else {
                    return Err(ApplyError::NoSuchOption);
                };
                let value = obj.view::<C>().ok_or_else(|| {
                    ApplyError::InvalidValue(format!(
                        "expected an object providing {expected}, got {}",
                        obj.type_name()
                    ))
                })?;
                setter(b, opts, value)
                    .into_result()
                    .map_err(ApplyError::Invocation)
            },
        )
    }

    /// Add an option that takes a type reference.
    ///
    /// The type is instantiated and the instance must provide `C`.
    pub fn class<C, F, R>(self, option: &str, setter: F) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&B, &mut FileSystemOptions, Arc<C>) -> R + Send + Sync + 'static,
        R: SetterOutcome,
    {
        let expected = std::any::type_name::<C>();
        self.push(
            option,
            Shape::Type,
            ParamType::Class(expected),
            move |b, opts, arg| {
                let ConfigArg::Type(ty) = arg else {
                    return Err(ApplyError::NoSuchOption);
                };
                let value = ty.instantiate().view::<C>().ok_or_else(|| {
                    ApplyError::InvalidValue(format!(
                        "type {} does not provide {expected}",
                        ty.name()
                    ))
                })?;
                setter(b, opts, value)
                    .into_result()
                    .map_err(ApplyError::Invocation)
            },
        )
    }

    /// Copy all entries of a parent builder's table.
    ///
    /// `project` maps this builder to the parent instance the inherited
    /// setters are invoked on.
    pub fn inherit<P: 'static>(mut self, parent: &OptionTable<P>, project: fn(&B) -> &P) -> Self {
        for entry in &parent.entries {
            let inner = entry.apply.clone();
            self.entries.push(OptionEntry {
                info: entry.info.clone(),
                apply: apply_fn(move |b: &B, opts, arg| inner(project(b), opts, arg)),
            });
        }
        self
    }

    pub fn describe(&self) -> Vec<OptionInfo> {
        self.entries.iter().map(|e| e.info.clone()).collect()
    }

    /// Resolve the setter for `setter` and the shape of `arg`, and apply it.
    ///
    /// Setters declared with a text parameter are preferred for text
    /// arguments. Otherwise the first declared entry wins.
    pub fn apply(
        &self,
        builder: &B,
        opts: &mut FileSystemOptions,
        setter: &str,
        arg: ConfigArg,
    ) -> Result<(), ApplyError> {
        let shape = arg.shape();
        let entry = self
            .entries
            .iter()
            .filter(|e| e.info.setter == setter && e.info.shape == shape)
            .min_by_key(|e| !e.info.param.is_text())
            .ok_or(ApplyError::NoSuchOption)?;
        (entry.apply)(builder, opts, arg)
    }
}

/// A configuration builder for a file system scheme.
///
/// Builders carry no per-request state: all setters write to the options
/// bag they are handed.
pub trait ConfigBuilder: Sized + Send + Sync + 'static {
    /// Descriptive name of the builder, eg "http".
    fn name(&self) -> &str;

    fn option_table(&self) -> &OptionTable<Self>;
}

/// Object safe form of [`ConfigBuilder`], used by the registry.
///
/// Implemented for every [`ConfigBuilder`].
pub trait AnyConfigBuilder: Send + Sync {
    fn name(&self) -> &str;

    fn describe(&self) -> Vec<OptionInfo>;

    /// Apply the setter named `setter` to `opts`.
    fn apply(
        &self,
        opts: &mut FileSystemOptions,
        setter: &str,
        arg: ConfigArg,
    ) -> Result<(), ApplyError>;

    fn as_any(&self) -> &dyn Any;
}

impl<B: ConfigBuilder> AnyConfigBuilder for B {
    fn name(&self) -> &str {
        ConfigBuilder::name(self)
    }

    fn describe(&self) -> Vec<OptionInfo> {
        self.option_table().describe()
    }

    fn apply(
        &self,
        opts: &mut FileSystemOptions,
        setter: &str,
        arg: ConfigArg,
    ) -> Result<(), ApplyError> {
        self.option_table().apply(self, opts, setter, arg)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type DynConfigBuilder = Arc<dyn AnyConfigBuilder>;
