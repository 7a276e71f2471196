use std::sync::Arc;

use fsopts::{DynConfigBuilder, OptionsProvider};

use crate::SftpConfigBuilder;

#[derive(Clone, Debug, Default)]
pub struct SftpProvider {
    _private: (),
}

impl SftpProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for SftpProvider {
    fn schemes(&self) -> &[&str] {
        &["sftp"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(SftpConfigBuilder::new())
    }
}
