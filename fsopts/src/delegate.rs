use crate::{
    BuilderRegistry, ConfigArg, ConfigError, FileSystemOptions, ObjectRef, OptionInfo, TypeRef,
    setter_name,
};

/// Sets options by scheme and option name, without compile time knowledge
/// of the builder that handles them.
///
/// Each call resolves the builder for the scheme, picks the setter derived
/// from the option name (`proxyHost` -> `setProxyHost`) that accepts the
/// shape of the supplied value, converts the value to the setter's
/// parameter type and invokes the setter on the given options bag.
///
/// A call either applies the option completely or returns an error and
/// leaves the option untouched. Options applied by earlier calls are never
/// rolled back.
///
/// ```
/// use fsopts::{
///     BuilderRegistry, DefaultConfigBuilder, DelegatingOptionsBuilder, ErrorKind,
///     FileSystemOptions,
/// };
///
/// let registry = BuilderRegistry::builder()
///     .with_builder("file", std::sync::Arc::new(DefaultConfigBuilder::new()))
///     .build();
/// let delegate = DelegatingOptionsBuilder::new(registry);
///
/// let mut opts = FileSystemOptions::new();
/// delegate
///     .set_config_string(&mut opts, "file", "rootURI", "file:///srv")
///     .unwrap();
/// assert_eq!(
///     DefaultConfigBuilder::instance().get_root_uri(&opts),
///     Some("file:///srv")
/// );
///
/// let err = delegate
///     .set_config_string(&mut opts, "gopher", "rootURI", "x")
///     .unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnknownScheme);
/// assert_eq!(err.option(), Some("rootURI"));
/// ```
#[derive(Clone, Debug)]
pub struct DelegatingOptionsBuilder {
    registry: BuilderRegistry,
}

impl DelegatingOptionsBuilder {
    pub fn new(registry: BuilderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Set an option from a single text value.
    ///
    /// The value is converted to the setter's parameter type: numbers are
    /// parsed, booleans must be `true` or `false`.
    pub fn set_config_string(
        &self,
        opts: &mut FileSystemOptions,
        scheme: &str,
        option: &str,
        value: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.set_config(opts, scheme, option, ConfigArg::Text(value.into()))
    }

    /// Set an option from an ordered sequence of text values.
    pub fn set_config_strings<S: AsRef<str>>(
        &self,
        opts: &mut FileSystemOptions,
        scheme: &str,
        option: &str,
        values: &[S],
    ) -> Result<(), ConfigError> {
        let values = values.iter().map(|v| v.as_ref().to_string()).collect();
        self.set_config(opts, scheme, option, ConfigArg::Texts(values))
    }

    /// Set an option from a type reference.
    ///
    /// The type is instantiated, and the instance must provide the
    /// capability the setter requires. Otherwise the call fails with
    /// [`ConfigError::InvalidValue`].
    pub fn set_config_class(
        &self,
        opts: &mut FileSystemOptions,
        scheme: &str,
        option: &str,
        value: TypeRef,
    ) -> Result<(), ConfigError> {
        self.set_config(opts, scheme, option, ConfigArg::Type(value))
    }

    /// Set an option from an existing object.
    pub fn set_config_object(
        &self,
        opts: &mut FileSystemOptions,
        scheme: &str,
        option: &str,
        value: ObjectRef,
    ) -> Result<(), ConfigError> {
        self.set_config(opts, scheme, option, ConfigArg::Object(value))
    }

    /// Set an option from an argument of any shape.
    pub fn set_config(
        &self,
        opts: &mut FileSystemOptions,
        scheme: &str,
        option: &str,
        arg: ConfigArg,
    ) -> Result<(), ConfigError> {
        let builder = self.registry.resolve(scheme).map_err(|err| match err {
            ConfigError::UnknownScheme { scheme, .. } => ConfigError::UnknownScheme {
                scheme,
                option: Some(option.to_string()),
            },
            other => other,
        })?;
        let setter = setter_name(option);
        let shape = arg.shape();

        match builder.apply(opts, &setter, arg) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(scheme, option, %shape, "option set");
                Ok(())
            }
            Err(err) => {
                let err = ConfigError::from_apply(scheme, option, shape, err);
                #[cfg(feature = "tracing")]
                tracing::debug!(scheme, option, code = err.code(), error = %err, "option rejected");
                Err(err)
            }
        }
    }

    /// Describe the options the builder of a scheme accepts.
    pub fn describe(&self, scheme: &str) -> Result<Vec<OptionInfo>, ConfigError> {
        Ok(self.registry.resolve(scheme)?.describe())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, LazyLock};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ConfigBuilder, ErrorKind, OptionTable, Shape};

    #[derive(Debug, thiserror::Error)]
    #[error("count must be positive")]
    struct NotPositive;

    struct CounterBuilder;

    impl CounterBuilder {
        fn get_count(&self, opts: &FileSystemOptions) -> Option<i32> {
            opts.get::<i32>("counter", "count").copied()
        }

        fn set_count(&self, opts: &mut FileSystemOptions, count: i32) -> Result<(), NotPositive> {
            if count <= 0 {
                return Err(NotPositive);
            }
            opts.set("counter", "count", count);
            Ok(())
        }
    }

    impl ConfigBuilder for CounterBuilder {
        fn name(&self) -> &str {
            "counter"
        }

        fn option_table(&self) -> &OptionTable<Self> {
            static TABLE: LazyLock<OptionTable<CounterBuilder>> =
                LazyLock::new(|| OptionTable::new().text("count", CounterBuilder::set_count));
            &TABLE
        }
    }

    fn delegate() -> DelegatingOptionsBuilder {
        let registry = BuilderRegistry::builder()
            .with_builder("count", Arc::new(CounterBuilder))
            .build();
        DelegatingOptionsBuilder::new(registry)
    }

    #[test_log::test]
    fn test_dispatch_outcomes() {
        let delegate = delegate();
        let mut opts = FileSystemOptions::new();

        delegate
            .set_config_string(&mut opts, "count", "count", "3")
            .unwrap();
        assert_eq!(CounterBuilder.get_count(&opts), Some(3));

        // capitalized option names map to the same setter
        delegate
            .set_config_string(&mut opts, "count", "Count", "4")
            .unwrap();
        assert_eq!(CounterBuilder.get_count(&opts), Some(4));

        let err = delegate
            .set_config_string(&mut opts, "count", "count", "three")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert_eq!(err.option(), Some("count"));

        let err = delegate
            .set_config_string(&mut opts, "count", "count", "-1")
            .unwrap_err();
        assert_eq!(err.code(), "target-invocation-failed");
        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.downcast_ref::<NotPositive>().is_some());

        let err = delegate
            .set_config_strings(&mut opts, "count", "count", &["1"])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NoSuchOption {
                shape: Shape::Texts,
                ..
            }
        ));

        let err = delegate
            .set_config_string(&mut opts, "count", "total", "1")
            .unwrap_err();
        assert_eq!(err.code(), "no-such-option");

        let err = delegate
            .set_config_string(&mut opts, "Count", "count", "1")
            .unwrap_err();
        assert_eq!(err.code(), "unknown-scheme");
        assert_eq!(err.scheme(), "Count");
        assert_eq!(err.option(), Some("count"));

        // failed calls left the last good value in place
        assert_eq!(CounterBuilder.get_count(&opts), Some(4));
    }

    #[test]
    fn test_describe() {
        let infos = delegate().describe("count").unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].setter, "setCount");
        assert_eq!(infos[0].shape, Shape::Text);
        let err = delegate().describe("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownScheme);
        assert_eq!(err.option(), None);
    }
}
