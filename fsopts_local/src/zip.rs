use std::sync::LazyLock;

use fsopts::{ConfigBuilder, DefaultConfigBuilder, FileSystemOptions, OptionTable};

#[derive(Debug, thiserror::Error)]
pub enum ZipOptionError {
    #[error("invalid charset name '{0}'")]
    InvalidCharset(String),
}

/// Options for the `zip` and `jar` schemes.
#[derive(Clone, Debug)]
pub struct ZipConfigBuilder {
    default: DefaultConfigBuilder,
}

impl Default for ZipConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipConfigBuilder {
    const NAMESPACE: &'static str = "zip";

    pub const fn new() -> Self {
        Self {
            default: DefaultConfigBuilder::with_namespace(Self::NAMESPACE),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: ZipConfigBuilder = ZipConfigBuilder::new();
        &INSTANCE
    }

    /// Getters for the inherited `rootURI` and `userAuthenticator` options.
    pub fn defaults(&self) -> &DefaultConfigBuilder {
        &self.default
    }

    /// Charset of entry names in the archive, eg `IBM437`.
    pub fn set_charset(
        &self,
        opts: &mut FileSystemOptions,
        charset: impl Into<String>,
    ) -> Result<(), ZipOptionError> {
        let charset = charset.into();
        let valid = charset
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && charset
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+'));
        if !valid {
            return Err(ZipOptionError::InvalidCharset(charset));
        }
        opts.set(Self::NAMESPACE, "charset", charset);
        Ok(())
    }

    /// Defaults to `UTF-8`.
    pub fn get_charset<'a>(&self, opts: &'a FileSystemOptions) -> &'a str {
        opts.get::<String>(Self::NAMESPACE, "charset")
            .map(String::as_str)
            .unwrap_or("UTF-8")
    }
}

impl ConfigBuilder for ZipConfigBuilder {
    fn name(&self) -> &str {
        Self::NAMESPACE
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<ZipConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(
                    DefaultConfigBuilder::instance().option_table(),
                    |b: &ZipConfigBuilder| &b.default,
                )
                .text("charset", |b: &ZipConfigBuilder, opts, charset: String| {
                    b.set_charset(opts, charset)
                })
        });
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fsopts::{BuilderRegistry, DelegatingOptionsBuilder, ErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_zip_conformance() {
        fsopts_test::test_builder_conformance("zip", Arc::new(ZipConfigBuilder::new()));
    }

    #[test]
    fn test_charset() {
        let registry = BuilderRegistry::builder()
            .with_builder("zip", Arc::new(ZipConfigBuilder::new()))
            .build();
        let delegate = DelegatingOptionsBuilder::new(registry);
        let zip = ZipConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        assert_eq!(zip.get_charset(&opts), "UTF-8");
        delegate
            .set_config_string(&mut opts, "zip", "charset", "IBM437")
            .unwrap();
        assert_eq!(zip.get_charset(&opts), "IBM437");

        let err = delegate
            .set_config_string(&mut opts, "zip", "charset", "no charset")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invocation);
        assert_eq!(err.code(), "target-invocation-failed");
        assert_eq!(zip.get_charset(&opts), "IBM437");
    }
}
