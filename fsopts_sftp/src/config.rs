use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use fsopts::{
    BoxError, ConfigBuilder, DefaultConfigBuilder, FileSystemOptions, FromText, OptionTable,
    ParamType,
};
use time::Duration;

use crate::UserInfo;

/// Errors raised by [`SftpConfigBuilder`] setters.
#[derive(Debug, thiserror::Error)]
pub enum SftpOptionError {
    #[error("invalid strict host key checking mode '{0}': expected 'yes', 'no' or 'ask'")]
    InvalidHostKeyChecking(String),
    #[error("unknown proxy type '{0}': expected 'http' or 'socks5'")]
    UnknownProxyType(String),
}

/// Proxy protocol used to reach the SSH server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProxyType {
    Http,
    Socks5,
}

impl std::str::FromStr for ProxyType {
    type Err = SftpOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "socks5" => Ok(Self::Socks5),
            other => Err(SftpOptionError::UnknownProxyType(other.to_string())),
        }
    }
}

impl FromText for ProxyType {
    fn param_type() -> ParamType {
        ParamType::Derived("proxy type")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse::<Self>()?)
    }
}

/// Options for the `sftp` scheme.
#[derive(Clone, Debug)]
pub struct SftpConfigBuilder {
    default: DefaultConfigBuilder,
}

impl Default for SftpConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SftpConfigBuilder {
    const NAMESPACE: &'static str = "sftp";

    const HOST_KEY_CHECKING_MODES: [&'static str; 3] = ["yes", "no", "ask"];

    pub const fn new() -> Self {
        Self {
            default: DefaultConfigBuilder::with_namespace(Self::NAMESPACE),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: SftpConfigBuilder = SftpConfigBuilder::new();
        &INSTANCE
    }

    /// Getters for the inherited `rootURI` and `userAuthenticator` options.
    pub fn defaults(&self) -> &DefaultConfigBuilder {
        &self.default
    }

    fn get_str<'a>(&self, opts: &'a FileSystemOptions, name: &str) -> Option<&'a str> {
        opts.get::<String>(Self::NAMESPACE, name)
            .map(String::as_str)
    }

    pub fn set_user_info(&self, opts: &mut FileSystemOptions, info: Arc<dyn UserInfo>) {
        opts.set(Self::NAMESPACE, "userinfo", info);
    }

    pub fn get_user_info(&self, opts: &FileSystemOptions) -> Option<Arc<dyn UserInfo>> {
        opts.get::<Arc<dyn UserInfo>>(Self::NAMESPACE, "userinfo")
            .cloned()
    }

    /// Private key files, tried in order.
    pub fn set_identities(&self, opts: &mut FileSystemOptions, identities: Vec<PathBuf>) {
        opts.set(Self::NAMESPACE, "identities", identities);
    }

    pub fn get_identities<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a [PathBuf]> {
        opts.get::<Vec<PathBuf>>(Self::NAMESPACE, "identities")
            .map(Vec::as_slice)
    }

    /// One of `yes`, `no` or `ask`.
    pub fn set_strict_host_key_checking(
        &self,
        opts: &mut FileSystemOptions,
        mode: impl Into<String>,
    ) -> Result<(), SftpOptionError> {
        let mode = mode.into();
        if !Self::HOST_KEY_CHECKING_MODES.contains(&mode.as_str()) {
            return Err(SftpOptionError::InvalidHostKeyChecking(mode));
        }
        opts.set(Self::NAMESPACE, "strictHostKeyChecking", mode);
        Ok(())
    }

    /// Defaults to `no`.
    pub fn get_strict_host_key_checking<'a>(&self, opts: &'a FileSystemOptions) -> &'a str {
        self.get_str(opts, "strictHostKeyChecking").unwrap_or("no")
    }

    /// Compression algorithms, eg `zlib,none`.
    pub fn set_compression(&self, opts: &mut FileSystemOptions, compression: impl Into<String>) {
        opts.set(Self::NAMESPACE, "compression", compression.into());
    }

    pub fn get_compression<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_str(opts, "compression")
    }

    pub fn set_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        opts.set(Self::NAMESPACE, "timeout", timeout);
    }

    pub fn get_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        opts.get::<Duration>(Self::NAMESPACE, "timeout").copied()
    }

    pub fn set_user_dir_is_root(&self, opts: &mut FileSystemOptions, user_dir_is_root: bool) {
        opts.set(Self::NAMESPACE, "userDirIsRoot", user_dir_is_root);
    }

    /// Defaults to `true`.
    pub fn get_user_dir_is_root(&self, opts: &FileSystemOptions) -> bool {
        opts.get::<bool>(Self::NAMESPACE, "userDirIsRoot")
            .copied()
            .unwrap_or(true)
    }

    pub fn set_known_hosts(&self, opts: &mut FileSystemOptions, path: PathBuf) {
        opts.set(Self::NAMESPACE, "knownHosts", path);
    }

    pub fn get_known_hosts<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a Path> {
        opts.get::<PathBuf>(Self::NAMESPACE, "knownHosts")
            .map(PathBuf::as_path)
    }

    /// Authentication methods in order of preference,
    /// eg `publickey,password`.
    pub fn set_preferred_authentications(
        &self,
        opts: &mut FileSystemOptions,
        methods: impl Into<String>,
    ) {
        opts.set(Self::NAMESPACE, "preferredAuthentications", methods.into());
    }

    pub fn get_preferred_authentications<'a>(
        &self,
        opts: &'a FileSystemOptions,
    ) -> Option<&'a str> {
        self.get_str(opts, "preferredAuthentications")
    }

    pub fn set_proxy_host(&self, opts: &mut FileSystemOptions, host: impl Into<String>) {
        opts.set(Self::NAMESPACE, "proxyHost", host.into());
    }

    pub fn get_proxy_host<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_str(opts, "proxyHost")
    }

    pub fn set_proxy_port(&self, opts: &mut FileSystemOptions, port: u16) {
        opts.set(Self::NAMESPACE, "proxyPort", port);
    }

    pub fn get_proxy_port(&self, opts: &FileSystemOptions) -> Option<u16> {
        opts.get::<u16>(Self::NAMESPACE, "proxyPort").copied()
    }

    pub fn set_proxy_type(&self, opts: &mut FileSystemOptions, proxy_type: ProxyType) {
        opts.set(Self::NAMESPACE, "proxyType", proxy_type);
    }

    pub fn get_proxy_type(&self, opts: &FileSystemOptions) -> Option<ProxyType> {
        opts.get::<ProxyType>(Self::NAMESPACE, "proxyType")
            .copied()
    }
}

impl ConfigBuilder for SftpConfigBuilder {
    fn name(&self) -> &str {
        Self::NAMESPACE
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<SftpConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(
                    DefaultConfigBuilder::instance().option_table(),
                    |b: &SftpConfigBuilder| &b.default,
                )
                .class("userinfo", SftpConfigBuilder::set_user_info)
                .object("userinfo", SftpConfigBuilder::set_user_info)
                .texts("identities", SftpConfigBuilder::set_identities)
                .text(
                    "strictHostKeyChecking",
                    |b: &SftpConfigBuilder, opts, mode: String| {
                        b.set_strict_host_key_checking(opts, mode)
                    },
                )
                .text("compression", |b: &SftpConfigBuilder, opts, c: String| {
                    b.set_compression(opts, c)
                })
                .text("timeout", SftpConfigBuilder::set_timeout)
                .text("userDirIsRoot", SftpConfigBuilder::set_user_dir_is_root)
                .text("knownHosts", SftpConfigBuilder::set_known_hosts)
                .text(
                    "preferredAuthentications",
                    |b: &SftpConfigBuilder, opts, methods: String| {
                        b.set_preferred_authentications(opts, methods)
                    },
                )
                .text("proxyHost", |b: &SftpConfigBuilder, opts, host: String| {
                    b.set_proxy_host(opts, host)
                })
                .text("proxyPort", SftpConfigBuilder::set_proxy_port)
                .text("proxyType", SftpConfigBuilder::set_proxy_type)
        });
        &TABLE
    }
}
