use std::sync::Arc;

use fsopts::{DefaultConfigBuilder, DynConfigBuilder, OptionsProvider};

use crate::{RamConfigBuilder, ZipConfigBuilder};

/// Local files and the temporary file system.
#[derive(Clone, Debug, Default)]
pub struct LocalProvider {
    _private: (),
}

impl LocalProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for LocalProvider {
    fn schemes(&self) -> &[&str] {
        &["file", "tmp"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(DefaultConfigBuilder::with_namespace("file"))
    }
}

#[derive(Clone, Debug, Default)]
pub struct RamProvider {
    _private: (),
}

impl RamProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for RamProvider {
    fn schemes(&self) -> &[&str] {
        &["ram"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(RamConfigBuilder::new())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ZipProvider {
    _private: (),
}

impl ZipProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for ZipProvider {
    fn schemes(&self) -> &[&str] {
        &["zip", "jar"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(ZipConfigBuilder::new())
    }
}

#[derive(Clone, Debug, Default)]
pub struct TarProvider {
    _private: (),
}

impl TarProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for TarProvider {
    fn schemes(&self) -> &[&str] {
        &["tar", "tgz", "tbz2"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(DefaultConfigBuilder::with_namespace("tar"))
    }
}

/// Single compressed files.
#[derive(Clone, Debug, Default)]
pub struct CompressedFileProvider {
    _private: (),
}

impl CompressedFileProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for CompressedFileProvider {
    fn schemes(&self) -> &[&str] {
        &["gz", "bz2"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(DefaultConfigBuilder::with_namespace("compressed"))
    }
}

#[cfg(test)]
mod tests {
    use fsopts::BuilderRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_local_schemes() {
        let registry = BuilderRegistry::builder()
            .with_provider(LocalProvider::new())
            .with_provider(RamProvider::new())
            .with_provider(ZipProvider::new())
            .with_provider(TarProvider::new())
            .with_provider(CompressedFileProvider::new())
            .build();
        assert_eq!(
            registry.schemes(),
            vec!["bz2", "file", "gz", "jar", "ram", "tar", "tbz2", "tgz", "tmp", "zip"]
        );
        assert_eq!(registry.resolve("jar").unwrap().name(), "zip");
        assert_eq!(registry.resolve("tgz").unwrap().name(), "tar");
        assert_eq!(registry.resolve("tmp").unwrap().name(), "file");
        assert_eq!(registry.resolve("bz2").unwrap().name(), "compressed");
    }
}
