//! Option builder for the `sftp` scheme.

mod config;
mod provider;
mod user_info;

pub use self::{
    config::{ProxyType, SftpConfigBuilder, SftpOptionError},
    provider::SftpProvider,
    user_info::{TrustEveryoneUserInfo, UserInfo, user_info_type},
};
