//! Option builders for the `ftp` and `ftps` schemes.

mod config;
mod ftps;
mod provider;

pub use self::{
    config::{FtpConfigBuilder, FtpFileType, FtpOptionError},
    ftps::{FtpsConfigBuilder, FtpsMode},
    provider::{FtpProvider, FtpsProvider},
};
