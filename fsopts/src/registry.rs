use std::{collections::HashMap, fmt, sync::Arc};

use crate::{ConfigError, DynConfigBuilder};

/// A provider contributes the configuration builder for its schemes.
///
/// The registry asks for the builder once and shares the instance between
/// all of the provider's schemes.
pub trait OptionsProvider {
    /// URI schemes handled by the provider.
    ///
    /// eg: `["ftp", "ftps"]`
    fn schemes(&self) -> &[&str];

    fn config_builder(&self) -> DynConfigBuilder;
}

/// Collects builders during start-up.
///
/// Call [`RegistryBuilder::build`] to get the immutable [`BuilderRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    builders: HashMap<String, DynConfigBuilder>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder for a scheme.
    ///
    /// Replaces a previously registered builder for the same scheme.
    pub fn register(&mut self, scheme: impl Into<String>, builder: DynConfigBuilder) {
        let scheme = scheme.into();
        if let Some(previous) = self.builders.insert(scheme.clone(), builder) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                scheme = %scheme,
                previous = previous.name(),
                "replaced registered config builder"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = previous;
        }
    }

    pub fn with_builder(mut self, scheme: impl Into<String>, builder: DynConfigBuilder) -> Self {
        self.register(scheme, builder);
        self
    }

    pub fn register_provider<P: OptionsProvider>(&mut self, provider: P) {
        let builder = provider.config_builder();
        for scheme in provider.schemes() {
            self.register(*scheme, builder.clone());
        }
    }

    pub fn with_provider<P: OptionsProvider>(mut self, provider: P) -> Self {
        self.register_provider(provider);
        self
    }

    pub fn build(self) -> BuilderRegistry {
        BuilderRegistry {
            builders: Arc::new(self.builders),
        }
    }
}

/// Immutable scheme to builder mapping.
///
/// Cheap to clone, and safe to share between threads.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: Arc<HashMap<String, DynConfigBuilder>>,
}

impl BuilderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get the builder for a scheme.
    pub fn resolve(&self, scheme: &str) -> Result<DynConfigBuilder, ConfigError> {
        self.builders
            .get(scheme)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownScheme {
                scheme: scheme.to_string(),
                option: None,
            })
    }

    pub fn has_provider(&self, scheme: &str) -> bool {
        self.builders.contains_key(scheme)
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ConfigBuilder, ErrorKind, OptionTable};

    struct NullBuilder(&'static str);

    impl ConfigBuilder for NullBuilder {
        fn name(&self) -> &str {
            self.0
        }

        fn option_table(&self) -> &OptionTable<Self> {
            static TABLE: LazyLock<OptionTable<NullBuilder>> = LazyLock::new(OptionTable::new);
            &TABLE
        }
    }

    struct PairProvider;

    impl OptionsProvider for PairProvider {
        fn schemes(&self) -> &[&str] {
            &["a", "b"]
        }

        fn config_builder(&self) -> DynConfigBuilder {
            Arc::new(NullBuilder("pair"))
        }
    }

    #[test]
    fn test_resolve() {
        let registry = BuilderRegistry::builder()
            .with_provider(PairProvider)
            .with_builder("c", Arc::new(NullBuilder("c")))
            .build();

        assert_eq!(registry.schemes(), vec!["a", "b", "c"]);
        assert!(registry.has_provider("a"));
        assert!(!registry.has_provider("A"));

        let a = registry.resolve("a").unwrap();
        let b = registry.resolve("b").unwrap();
        assert!(Arc::ptr_eq(&a, &b), "provider builder must be shared");
        assert_eq!(registry.resolve("c").unwrap().name(), "c");

        let err = registry.resolve("gopher").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownScheme);
        assert_eq!(err.scheme(), "gopher");
        assert_eq!(err.option(), None);
    }

    #[test_log::test]
    fn test_register_replaces() {
        let mut builder = RegistryBuilder::new();
        builder.register("x", Arc::new(NullBuilder("first")));
        builder.register("x", Arc::new(NullBuilder("second")));
        let registry = builder.build();
        assert_eq!(registry.resolve("x").unwrap().name(), "second");
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuilderRegistry>();

        let registry = BuilderRegistry::builder().with_provider(PairProvider).build();
        let handles = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.resolve("a").is_ok())
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
