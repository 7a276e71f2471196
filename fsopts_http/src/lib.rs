//! Option builders for the `http`, `https` and `webdav` schemes.

mod config;
mod provider;
mod webdav;

pub use self::{
    config::{HttpConfigBuilder, HttpOptionError},
    provider::{HttpProvider, WebdavProvider},
    webdav::WebdavConfigBuilder,
};
