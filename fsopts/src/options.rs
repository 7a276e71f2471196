use std::{any::Any, collections::BTreeMap, fmt, sync::Arc};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OptionKey {
    namespace: String,
    name: String,
}

/// Scheme-agnostic container for file system options.
///
/// Values are stored per builder namespace and option name. The bag itself
/// does not interpret values; builders provide typed getters and setters.
///
/// Cloning a bag is cheap: clones share the stored values, but not the
/// storage, so later changes to one clone are not visible in the other.
#[derive(Clone, Default)]
pub struct FileSystemOptions {
    values: BTreeMap<OptionKey, Arc<dyn Any + Send + Sync>>,
}

impl FileSystemOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous value of the same key.
    pub fn set<T>(&mut self, namespace: &str, name: &str, value: T)
    where
        T: Any + Send + Sync,
    {
        let key = OptionKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        self.values.insert(key, Arc::new(value));
    }

    /// Get a value.
    ///
    /// Returns `None` if the key is not set or holds a value of another type.
    pub fn get<T>(&self, namespace: &str, name: &str) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        self.find(namespace, name)?.downcast_ref::<T>()
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.find(namespace, name).is_some()
    }

    /// Remove a value. Returns `true` if the key was set.
    pub fn remove(&mut self, namespace: &str, name: &str) -> bool {
        let key = OptionKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        self.values.remove(&key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all `(namespace, name)` keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values
            .keys()
            .map(|key| (key.namespace.as_str(), key.name.as_str()))
    }

    fn find(&self, namespace: &str, name: &str) -> Option<&(dyn Any + Send + Sync)> {
        let key = OptionKey {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        self.values.get(&key).map(|value| value.as_ref())
    }
}

impl fmt::Debug for FileSystemOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (namespace, name) in self.keys() {
            list.entry(&format_args!("{namespace}.{name}"));
        }
        list.finish()
    }
}
