use std::sync::LazyLock;

use fsopts::{
    BoxError, ConfigBuilder, DefaultConfigBuilder, FileSystemOptions, FromText, OptionTable,
    ParamType,
};
use time::Duration;

/// Errors raised by [`FtpConfigBuilder`] setters and value parsing.
#[derive(Debug, thiserror::Error)]
pub enum FtpOptionError {
    #[error("expected 12 short month names, got {0}")]
    MonthNameCount(usize),
    #[error("unknown file type '{0}': expected 'ascii', 'binary', 'local' or 'ebcdic'")]
    UnknownFileType(String),
    #[error("unknown ftps mode '{0}': expected 'implicit' or 'explicit'")]
    UnknownFtpsMode(String),
}

/// Transfer type of data connections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FtpFileType {
    Ascii,
    Binary,
    Local,
    Ebcdic,
}

impl std::str::FromStr for FtpFileType {
    type Err = FtpOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "binary" => Ok(Self::Binary),
            "local" => Ok(Self::Local),
            "ebcdic" => Ok(Self::Ebcdic),
            other => Err(FtpOptionError::UnknownFileType(other.to_string())),
        }
    }
}

impl FromText for FtpFileType {
    fn param_type() -> ParamType {
        ParamType::Derived("ftp file type")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse::<Self>()?)
    }
}

/// Options for the `ftp` scheme.
#[derive(Clone, Debug)]
pub struct FtpConfigBuilder {
    namespace: &'static str,
    default: DefaultConfigBuilder,
}

impl Default for FtpConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FtpConfigBuilder {
    pub const fn new() -> Self {
        Self::with_namespace("ftp")
    }

    pub(crate) const fn with_namespace(namespace: &'static str) -> Self {
        Self {
            namespace,
            default: DefaultConfigBuilder::with_namespace(namespace),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: FtpConfigBuilder = FtpConfigBuilder::new();
        &INSTANCE
    }

    /// Getters for the inherited `rootURI` and `userAuthenticator` options.
    pub fn defaults(&self) -> &DefaultConfigBuilder {
        &self.default
    }

    fn set_flag(&self, opts: &mut FileSystemOptions, name: &str, value: bool) {
        opts.set(self.namespace, name, value);
    }

    fn get_flag(&self, opts: &FileSystemOptions, name: &str) -> Option<bool> {
        opts.get::<bool>(self.namespace, name).copied()
    }

    fn set_text(&self, opts: &mut FileSystemOptions, name: &str, value: String) {
        opts.set(self.namespace, name, value);
    }

    fn get_text<'a>(&self, opts: &'a FileSystemOptions, name: &str) -> Option<&'a str> {
        opts.get::<String>(self.namespace, name).map(String::as_str)
    }

    fn set_duration(&self, opts: &mut FileSystemOptions, name: &str, value: Duration) {
        opts.set(self.namespace, name, value);
    }

    fn get_duration(&self, opts: &FileSystemOptions, name: &str) -> Option<Duration> {
        opts.get::<Duration>(self.namespace, name).copied()
    }

    pub fn set_passive_mode(&self, opts: &mut FileSystemOptions, passive: bool) {
        self.set_flag(opts, "passiveMode", passive);
    }

    pub fn get_passive_mode(&self, opts: &FileSystemOptions) -> Option<bool> {
        self.get_flag(opts, "passiveMode")
    }

    pub fn set_user_dir_is_root(&self, opts: &mut FileSystemOptions, user_dir_is_root: bool) {
        self.set_flag(opts, "userDirIsRoot", user_dir_is_root);
    }

    /// Defaults to `true`.
    pub fn get_user_dir_is_root(&self, opts: &FileSystemOptions) -> bool {
        self.get_flag(opts, "userDirIsRoot").unwrap_or(true)
    }

    pub fn set_data_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        self.set_duration(opts, "dataTimeout", timeout);
    }

    pub fn get_data_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        self.get_duration(opts, "dataTimeout")
    }

    pub fn set_socket_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        self.set_duration(opts, "socketTimeout", timeout);
    }

    pub fn get_socket_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        self.get_duration(opts, "socketTimeout")
    }

    pub fn set_connect_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        self.set_duration(opts, "connectTimeout", timeout);
    }

    pub fn get_connect_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        self.get_duration(opts, "connectTimeout")
    }

    pub fn set_control_encoding(&self, opts: &mut FileSystemOptions, encoding: impl Into<String>) {
        self.set_text(opts, "controlEncoding", encoding.into());
    }

    pub fn get_control_encoding<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_text(opts, "controlEncoding")
    }

    pub fn set_server_language_code(&self, opts: &mut FileSystemOptions, code: impl Into<String>) {
        self.set_text(opts, "serverLanguageCode", code.into());
    }

    pub fn get_server_language_code<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_text(opts, "serverLanguageCode")
    }

    pub fn set_default_date_format(&self, opts: &mut FileSystemOptions, format: impl Into<String>) {
        self.set_text(opts, "defaultDateFormat", format.into());
    }

    pub fn get_default_date_format<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_text(opts, "defaultDateFormat")
    }

    pub fn set_recent_date_format(&self, opts: &mut FileSystemOptions, format: impl Into<String>) {
        self.set_text(opts, "recentDateFormat", format.into());
    }

    pub fn get_recent_date_format<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_text(opts, "recentDateFormat")
    }

    pub fn set_server_time_zone_id(&self, opts: &mut FileSystemOptions, zone: impl Into<String>) {
        self.set_text(opts, "serverTimeZoneId", zone.into());
    }

    pub fn get_server_time_zone_id<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_text(opts, "serverTimeZoneId")
    }

    /// Month names used in directory listings of the server, January first.
    pub fn set_short_month_names(
        &self,
        opts: &mut FileSystemOptions,
        names: Vec<String>,
    ) -> Result<(), FtpOptionError> {
        if names.len() != 12 {
            return Err(FtpOptionError::MonthNameCount(names.len()));
        }
        opts.set(self.namespace, "shortMonthNames", names);
        Ok(())
    }

    pub fn get_short_month_names<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a [String]> {
        opts.get::<Vec<String>>(self.namespace, "shortMonthNames")
            .map(Vec::as_slice)
    }

    pub fn set_file_type(&self, opts: &mut FileSystemOptions, file_type: FtpFileType) {
        opts.set(self.namespace, "fileType", file_type);
    }

    pub fn get_file_type(&self, opts: &FileSystemOptions) -> Option<FtpFileType> {
        opts.get::<FtpFileType>(self.namespace, "fileType")
            .copied()
    }

    pub(crate) fn table() -> &'static OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<FtpConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(
                    DefaultConfigBuilder::instance().option_table(),
                    |b: &FtpConfigBuilder| &b.default,
                )
                .text("passiveMode", FtpConfigBuilder::set_passive_mode)
                .text("userDirIsRoot", FtpConfigBuilder::set_user_dir_is_root)
                .text("dataTimeout", FtpConfigBuilder::set_data_timeout)
                .text("socketTimeout", FtpConfigBuilder::set_socket_timeout)
                .text("connectTimeout", FtpConfigBuilder::set_connect_timeout)
                .text("controlEncoding", |b: &FtpConfigBuilder, opts, v: String| {
                    b.set_control_encoding(opts, v)
                })
                .text("serverLanguageCode", |b: &FtpConfigBuilder, opts, v: String| {
                    b.set_server_language_code(opts, v)
                })
                .text("defaultDateFormat", |b: &FtpConfigBuilder, opts, v: String| {
                    b.set_default_date_format(opts, v)
                })
                .text("recentDateFormat", |b: &FtpConfigBuilder, opts, v: String| {
                    b.set_recent_date_format(opts, v)
                })
                .text("serverTimeZoneId", |b: &FtpConfigBuilder, opts, v: String| {
                    b.set_server_time_zone_id(opts, v)
                })
                .texts("shortMonthNames", FtpConfigBuilder::set_short_month_names)
                .text("fileType", FtpConfigBuilder::set_file_type)
        });
        &TABLE
    }
}

impl ConfigBuilder for FtpConfigBuilder {
    fn name(&self) -> &str {
        self.namespace
    }

    fn option_table(&self) -> &OptionTable<Self> {
        Self::table()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fsopts::{BuilderRegistry, DelegatingOptionsBuilder, ErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "dez",
    ];

    fn delegate() -> DelegatingOptionsBuilder {
        let registry = BuilderRegistry::builder()
            .with_builder("ftp", Arc::new(FtpConfigBuilder::new()))
            .build();
        DelegatingOptionsBuilder::new(registry)
    }

    #[test]
    fn test_ftp_conformance() {
        fsopts_test::test_builder_conformance("ftp", Arc::new(FtpConfigBuilder::new()));
    }

    #[test]
    fn test_ftp_options() {
        let delegate = delegate();
        let builder = FtpConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        delegate
            .set_config_string(&mut opts, "ftp", "passiveMode", "true")
            .unwrap();
        delegate
            .set_config_string(&mut opts, "ftp", "dataTimeout", "500")
            .unwrap();
        delegate
            .set_config_string(&mut opts, "ftp", "controlEncoding", "UTF-8")
            .unwrap();
        delegate
            .set_config_string(&mut opts, "ftp", "fileType", "binary")
            .unwrap();

        assert_eq!(builder.get_passive_mode(&opts), Some(true));
        assert_eq!(
            builder.get_data_timeout(&opts),
            Some(Duration::milliseconds(500))
        );
        assert_eq!(builder.get_control_encoding(&opts), Some("UTF-8"));
        assert_eq!(builder.get_file_type(&opts), Some(FtpFileType::Binary));

        let err = delegate
            .set_config_string(&mut opts, "ftp", "fileType", "image")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert_eq!(builder.get_file_type(&opts), Some(FtpFileType::Binary));
    }

    #[test]
    fn test_short_month_names() {
        let delegate = delegate();
        let builder = FtpConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        delegate
            .set_config_strings(&mut opts, "ftp", "shortMonthNames", &MONTHS)
            .unwrap();
        assert_eq!(
            builder.get_short_month_names(&opts).map(|names| names[4].as_str()),
            Some("mai")
        );

        let err = delegate
            .set_config_strings(&mut opts, "ftp", "shortMonthNames", &MONTHS[..11])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invocation);
        let cause = std::error::Error::source(&err).unwrap();
        assert!(matches!(
            cause.downcast_ref::<FtpOptionError>(),
            Some(FtpOptionError::MonthNameCount(11))
        ));
    }
}
