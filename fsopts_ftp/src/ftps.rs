use std::{ops::Deref, sync::LazyLock};

use fsopts::{BoxError, ConfigBuilder, FileSystemOptions, FromText, OptionTable, ParamType};

use crate::{FtpConfigBuilder, FtpOptionError};

/// How the TLS session of an `ftps` connection is established.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FtpsMode {
    /// TLS from the first byte, usually on port 990.
    Implicit,
    /// Plain connection upgraded with `AUTH TLS`.
    #[default]
    Explicit,
}

impl std::str::FromStr for FtpsMode {
    type Err = FtpOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implicit" => Ok(Self::Implicit),
            "explicit" => Ok(Self::Explicit),
            other => Err(FtpOptionError::UnknownFtpsMode(other.to_string())),
        }
    }
}

impl FromText for FtpsMode {
    fn param_type() -> ParamType {
        ParamType::Derived("ftps mode")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse::<Self>()?)
    }
}

/// Options for the `ftps` scheme: all ftp options plus the TLS mode.
#[derive(Clone, Debug)]
pub struct FtpsConfigBuilder {
    ftp: FtpConfigBuilder,
}

impl Default for FtpsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FtpsConfigBuilder {
    const NAMESPACE: &'static str = "ftps";

    pub const fn new() -> Self {
        Self {
            ftp: FtpConfigBuilder::with_namespace(Self::NAMESPACE),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: FtpsConfigBuilder = FtpsConfigBuilder::new();
        &INSTANCE
    }

    pub fn set_ftps_mode(&self, opts: &mut FileSystemOptions, mode: FtpsMode) {
        opts.set(Self::NAMESPACE, "ftpsMode", mode);
    }

    /// Defaults to [`FtpsMode::Explicit`].
    pub fn get_ftps_mode(&self, opts: &FileSystemOptions) -> FtpsMode {
        opts.get::<FtpsMode>(Self::NAMESPACE, "ftpsMode")
            .copied()
            .unwrap_or_default()
    }
}

impl Deref for FtpsConfigBuilder {
    type Target = FtpConfigBuilder;

    fn deref(&self) -> &Self::Target {
        &self.ftp
    }
}

impl ConfigBuilder for FtpsConfigBuilder {
    fn name(&self) -> &str {
        Self::NAMESPACE
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<FtpsConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(FtpConfigBuilder::table(), |b: &FtpsConfigBuilder| &b.ftp)
                .text("ftpsMode", FtpsConfigBuilder::set_ftps_mode)
        });
        &TABLE
    }
}
