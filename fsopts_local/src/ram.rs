use std::sync::LazyLock;

use fsopts::{ConfigBuilder, DefaultConfigBuilder, FileSystemOptions, OptionTable};

/// Options for the in-memory `ram` scheme.
#[derive(Clone, Debug)]
pub struct RamConfigBuilder {
    default: DefaultConfigBuilder,
}

impl Default for RamConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RamConfigBuilder {
    const NAMESPACE: &'static str = "ram";

    pub const fn new() -> Self {
        Self {
            default: DefaultConfigBuilder::with_namespace(Self::NAMESPACE),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: RamConfigBuilder = RamConfigBuilder::new();
        &INSTANCE
    }

    /// Getters for the inherited `rootURI` and `userAuthenticator` options.
    pub fn defaults(&self) -> &DefaultConfigBuilder {
        &self.default
    }

    /// Upper bound for the total size of all files, in bytes.
    pub fn set_max_size(&self, opts: &mut FileSystemOptions, max_size: u64) {
        opts.set(Self::NAMESPACE, "maxSize", max_size);
    }

    /// Defaults to `u64::MAX`, ie unbounded.
    pub fn get_max_size(&self, opts: &FileSystemOptions) -> u64 {
        opts.get::<u64>(Self::NAMESPACE, "maxSize")
            .copied()
            .unwrap_or(u64::MAX)
    }
}

impl ConfigBuilder for RamConfigBuilder {
    fn name(&self) -> &str {
        Self::NAMESPACE
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<RamConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(
                    DefaultConfigBuilder::instance().option_table(),
                    |b: &RamConfigBuilder| &b.default,
                )
                .text("maxSize", RamConfigBuilder::set_max_size)
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
    fn test_ram_conformance() {
        fsopts_test::test_builder_conformance("ram", Arc::new(RamConfigBuilder::new()));
    }

    #[test]
    fn test_max_size() {
        let registry = BuilderRegistry::builder()
            .with_builder("ram", Arc::new(RamConfigBuilder::new()))
            .build();
        let delegate = DelegatingOptionsBuilder::new(registry);
        let ram = RamConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        assert_eq!(ram.get_max_size(&opts), u64::MAX);
        delegate
            .set_config_string(&mut opts, "ram", "maxSize", "1048576")
            .unwrap();
        assert_eq!(ram.get_max_size(&opts), 1 << 20);

        let err = delegate
            .set_config_string(&mut opts, "ram", "maxSize", "-1")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert_eq!(ram.get_max_size(&opts), 1 << 20);

        delegate
            .set_config_string(&mut opts, "ram", "rootURI", "ram:///data")
            .unwrap();
        assert_eq!(ram.defaults().get_root_uri(&opts), Some("ram:///data"));
        assert_eq!(DefaultConfigBuilder::instance().get_root_uri(&opts), None);
    }
}
