use std::sync::Arc;

use fsopts::{DynConfigBuilder, OptionsProvider};

use crate::{HttpConfigBuilder, WebdavConfigBuilder};

#[derive(Clone, Debug, Default)]
pub struct HttpProvider {
    _private: (),
}

impl HttpProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for HttpProvider {
    fn schemes(&self) -> &[&str] {
        &["http", "https"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(HttpConfigBuilder::new())
    }
}

#[derive(Clone, Debug, Default)]
pub struct WebdavProvider {
    _private: (),
}

impl WebdavProvider {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl OptionsProvider for WebdavProvider {
    fn schemes(&self) -> &[&str] {
        &["webdav"]
    }

    fn config_builder(&self) -> DynConfigBuilder {
        Arc::new(WebdavConfigBuilder::new())
    }
}
