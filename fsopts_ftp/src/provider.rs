use std::sync::Arc;

use fsopts::{DynConfigBuilder, OptionsProvider};

use crate::{FtpConfigBuilder, FtpsConfigBuilder};

#[derive(Clone, Debug, Default)]
pub struct FtpProvider {
    _private: (),
}

impl FtpProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for FtpProvider {
    fn schemes(&self) -> &[&str] {
        &["ftp"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(FtpConfigBuilder::new())
    }
}

#[derive(Clone, Debug, Default)]
pub struct FtpsProvider {
    _private: (),
}

impl FtpsProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for FtpsProvider {
    fn schemes(&self) -> &[&str] {
        &["ftps"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(FtpsConfigBuilder::new())
    }
}
