//! The standard registry: every bundled provider under its usual schemes.
//!
//! ```
//! let delegate = fsopts_standard::standard_delegate();
//! let mut opts = fsopts::FileSystemOptions::new();
//! delegate
//!     .set_config_string(&mut opts, "http", "proxyPort", "8080")
//!     .unwrap();
//! assert_eq!(
//!     fsopts_http::HttpConfigBuilder::instance().get_proxy_port(&opts),
//!     Some(8080)
//! );
//! ```

use fsopts::{BuilderRegistry, DelegatingOptionsBuilder, RegistryBuilder};

/// Schemes registered by [`standard_registry`].
pub const STANDARD_SCHEMES: &[&str] = &[
    "bz2", "file", "ftp", "ftps", "gz", "http", "https", "jar", "ram", "sftp", "tar", "tbz2",
    "tgz", "tmp", "webdav", "zip",
];

/// Register all bundled providers.
///
/// Useful to extend the standard set with custom builders before calling
/// [`RegistryBuilder::build`].
pub fn register_standard(registry: &mut RegistryBuilder) {
    registry.register_provider(fsopts_local::LocalProvider::new());
    registry.register_provider(fsopts_local::RamProvider::new());
    registry.register_provider(fsopts_local::ZipProvider::new());
    registry.register_provider(fsopts_local::TarProvider::new());
    registry.register_provider(fsopts_local::CompressedFileProvider::new());
    registry.register_provider(fsopts_http::HttpProvider::new());
    registry.register_provider(fsopts_http::WebdavProvider::new());
    registry.register_provider(fsopts_sftp::SftpProvider::new());
    registry.register_provider(fsopts_ftp::FtpProvider::new());
    registry.register_provider(fsopts_ftp::FtpsProvider::new());
}

pub fn standard_registry() -> BuilderRegistry {
    let mut registry = RegistryBuilder::new();
    register_standard(&mut registry);
    registry.build()
}

pub fn standard_delegate() -> DelegatingOptionsBuilder {
    DelegatingOptionsBuilder::new(standard_registry())
}
