use std::sync::{Arc, LazyLock};

use crate::{ConfigBuilder, FileSystemOptions, OptionTable, UserAuthenticator};

/// Builder for options understood by every provider.
///
/// Used directly by schemes without options of their own (eg `file`), and
/// embedded by the other builders, which inherit its option table. Every
/// embedding builder passes its own namespace, so `rootURI` of `http` and
/// `rootURI` of `sftp` are separate values.
#[derive(Clone, Debug)]
pub struct DefaultConfigBuilder {
    namespace: &'static str,
}

impl Default for DefaultConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultConfigBuilder {
    pub const fn new() -> Self {
        Self::with_namespace("default")
    }

    /// Builder storing its options under `namespace`.
    pub const fn with_namespace(namespace: &'static str) -> Self {
        Self { namespace }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: DefaultConfigBuilder = DefaultConfigBuilder::new();
        &INSTANCE
    }

    /// Root URI of the file system, overriding the one derived from the
    /// resolved file.
    pub fn set_root_uri(&self, opts: &mut FileSystemOptions, uri: impl Into<String>) {
        opts.set(self.namespace, "rootURI", uri.into());
    }

    pub fn get_root_uri<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        opts.get::<String>(self.namespace, "rootURI")
            .map(String::as_str)
    }

    pub fn set_user_authenticator(
        &self,
        opts: &mut FileSystemOptions,
        auth: Arc<dyn UserAuthenticator>,
    ) {
        opts.set(self.namespace, "userAuthenticator", auth);
    }

    pub fn get_user_authenticator(
        &self,
        opts: &FileSystemOptions,
    ) -> Option<Arc<dyn UserAuthenticator>> {
        opts.get::<Arc<dyn UserAuthenticator>>(self.namespace, "userAuthenticator")
            .cloned()
    }
}

impl ConfigBuilder for DefaultConfigBuilder {
    fn name(&self) -> &str {
        self.namespace
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<DefaultConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .text("rootURI", |b: &DefaultConfigBuilder, opts, uri: String| {
                    b.set_root_uri(opts, uri)
                })
                .object("userAuthenticator", DefaultConfigBuilder::set_user_authenticator)
        });
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{AnyConfigBuilder, ApplyError, ConfigArg, ObjectRef, StaticUserAuthenticator};

    #[test]
    fn test_default_options() {
        let builder = DefaultConfigBuilder::new();
        let mut opts = FileSystemOptions::new();

        builder
            .apply(&mut opts, "setRootURI", ConfigArg::Text("sftp://host/".into()))
            .unwrap();
        assert_eq!(builder.get_root_uri(&opts), Some("sftp://host/"));

        let auth = StaticUserAuthenticator::new("user", "pw");
        builder
            .apply(
                &mut opts,
                "setUserAuthenticator",
                ConfigArg::Object(auth.into_object_ref()),
            )
            .unwrap();
        assert!(builder.get_user_authenticator(&opts).is_some());

        // a bare object without the capability view is rejected
        let err = builder
            .apply(
                &mut opts,
                "setUserAuthenticator",
                ConfigArg::Object(ObjectRef::new(StaticUserAuthenticator::new("a", "b"))),
            )
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidValue(_)));
    }

    #[test]
    fn test_namespaces_are_separate() {
        let file = DefaultConfigBuilder::with_namespace("file");
        let tar = DefaultConfigBuilder::with_namespace("tar");
        let mut opts = FileSystemOptions::new();

        file.apply(&mut opts, "setRootURI", ConfigArg::Text("file:///a".into()))
            .unwrap();
        tar.apply(&mut opts, "setRootURI", ConfigArg::Text("tar:///b".into()))
            .unwrap();

        assert_eq!(file.get_root_uri(&opts), Some("file:///a"));
        assert_eq!(tar.get_root_uri(&opts), Some("tar:///b"));
        assert_eq!(DefaultConfigBuilder::instance().get_root_uri(&opts), None);
        assert_eq!(ConfigBuilder::name(&tar), "tar");
    }
}
