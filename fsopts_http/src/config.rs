use std::sync::{Arc, LazyLock};

use fsopts::{
    ConfigBuilder, DefaultConfigBuilder, FileSystemOptions, OptionTable, UserAuthenticator,
};
use time::Duration;

/// Errors raised by [`HttpConfigBuilder`] setters.
#[derive(Debug, thiserror::Error)]
pub enum HttpOptionError {
    #[error("invalid charset name '{0}'")]
    InvalidCharset(String),
    #[error("invalid cookie '{0}': expected 'name=value'")]
    InvalidCookie(String),
}

/// Options for the `http` and `https` schemes.
#[derive(Clone, Debug)]
pub struct HttpConfigBuilder {
    namespace: &'static str,
    default: DefaultConfigBuilder,
}

impl Default for HttpConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpConfigBuilder {
    pub const fn new() -> Self {
        Self::with_namespace("http")
    }

    /// Builder storing its options under a different namespace.
    ///
    /// Used by builders that extend the http options, see
    /// [`crate::WebdavConfigBuilder`].
    pub(crate) const fn with_namespace(namespace: &'static str) -> Self {
        Self {
            namespace,
            default: DefaultConfigBuilder::with_namespace(namespace),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: HttpConfigBuilder = HttpConfigBuilder::new();
        &INSTANCE
    }

    /// Getters for the inherited `rootURI` and `userAuthenticator` options.
    pub fn defaults(&self) -> &DefaultConfigBuilder {
        &self.default
    }

    fn get_str<'a>(&self, opts: &'a FileSystemOptions, name: &str) -> Option<&'a str> {
        opts.get::<String>(self.namespace, name).map(String::as_str)
    }

    pub fn set_proxy_host(&self, opts: &mut FileSystemOptions, host: impl Into<String>) {
        opts.set(self.namespace, "proxyHost", host.into());
    }

    pub fn get_proxy_host<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_str(opts, "proxyHost")
    }

    pub fn set_proxy_port(&self, opts: &mut FileSystemOptions, port: u16) {
        opts.set(self.namespace, "proxyPort", port);
    }

    pub fn get_proxy_port(&self, opts: &FileSystemOptions) -> Option<u16> {
        opts.get::<u16>(self.namespace, "proxyPort").copied()
    }

    pub fn set_proxy_authenticator(
        &self,
        opts: &mut FileSystemOptions,
        auth: Arc<dyn UserAuthenticator>,
    ) {
        opts.set(self.namespace, "proxyAuthenticator", auth);
    }

    pub fn get_proxy_authenticator(
        &self,
        opts: &FileSystemOptions,
    ) -> Option<Arc<dyn UserAuthenticator>> {
        opts.get::<Arc<dyn UserAuthenticator>>(self.namespace, "proxyAuthenticator")
            .cloned()
    }

    /// Charset used to encode URLs, eg `UTF-8`.
    pub fn set_url_charset(
        &self,
        opts: &mut FileSystemOptions,
        charset: impl Into<String>,
    ) -> Result<(), HttpOptionError> {
        let charset = charset.into();
        let valid = !charset.is_empty()
            && charset
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if !valid {
            return Err(HttpOptionError::InvalidCharset(charset));
        }
        opts.set(self.namespace, "urlCharset", charset);
        Ok(())
    }

    pub fn get_url_charset<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_str(opts, "urlCharset")
    }

    pub fn set_follow_redirect(&self, opts: &mut FileSystemOptions, follow: bool) {
        opts.set(self.namespace, "followRedirect", follow);
    }

    /// Defaults to `true`.
    pub fn get_follow_redirect(&self, opts: &FileSystemOptions) -> bool {
        opts.get::<bool>(self.namespace, "followRedirect")
            .copied()
            .unwrap_or(true)
    }

    pub fn set_preemptive_auth(&self, opts: &mut FileSystemOptions, preemptive: bool) {
        opts.set(self.namespace, "preemptiveAuth", preemptive);
    }

    pub fn get_preemptive_auth(&self, opts: &FileSystemOptions) -> bool {
        opts.get::<bool>(self.namespace, "preemptiveAuth")
            .copied()
            .unwrap_or(false)
    }

    pub fn set_max_total_connections(&self, opts: &mut FileSystemOptions, max: u32) {
        opts.set(self.namespace, "maxTotalConnections", max);
    }

    pub fn get_max_total_connections(&self, opts: &FileSystemOptions) -> Option<u32> {
        opts.get::<u32>(self.namespace, "maxTotalConnections")
            .copied()
    }

    pub fn set_max_connections_per_host(&self, opts: &mut FileSystemOptions, max: u32) {
        opts.set(self.namespace, "maxConnectionsPerHost", max);
    }

    pub fn get_max_connections_per_host(&self, opts: &FileSystemOptions) -> Option<u32> {
        opts.get::<u32>(self.namespace, "maxConnectionsPerHost")
            .copied()
    }

    pub fn set_connection_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        opts.set(self.namespace, "connectionTimeout", timeout);
    }

    pub fn get_connection_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        opts.get::<Duration>(self.namespace, "connectionTimeout")
            .copied()
    }

    pub fn set_so_timeout(&self, opts: &mut FileSystemOptions, timeout: Duration) {
        opts.set(self.namespace, "soTimeout", timeout);
    }

    pub fn get_so_timeout(&self, opts: &FileSystemOptions) -> Option<Duration> {
        opts.get::<Duration>(self.namespace, "soTimeout").copied()
    }

    pub fn set_user_agent(&self, opts: &mut FileSystemOptions, agent: impl Into<String>) {
        opts.set(self.namespace, "userAgent", agent.into());
    }

    pub fn get_user_agent<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        self.get_str(opts, "userAgent")
    }

    /// Cookies sent with every request, as `name=value` pairs.
    pub fn set_cookies(
        &self,
        opts: &mut FileSystemOptions,
        cookies: Vec<String>,
    ) -> Result<(), HttpOptionError> {
        if let Some(bad) = cookies
            .iter()
            .find(|c| !matches!(c.split_once('='), Some((name, _)) if !name.is_empty()))
        {
            return Err(HttpOptionError::InvalidCookie(bad.clone()));
        }
        opts.set(self.namespace, "cookies", cookies);
        Ok(())
    }

    pub fn get_cookies<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a [String]> {
        opts.get::<Vec<String>>(self.namespace, "cookies")
            .map(Vec::as_slice)
    }

    pub(crate) fn table() -> &'static OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<HttpConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(
                    DefaultConfigBuilder::instance().option_table(),
                    |b: &HttpConfigBuilder| &b.default,
                )
                .text("proxyHost", |b: &HttpConfigBuilder, opts, host: String| {
                    b.set_proxy_host(opts, host)
                })
                .text("proxyPort", HttpConfigBuilder::set_proxy_port)
                .object(
                    "proxyAuthenticator",
                    HttpConfigBuilder::set_proxy_authenticator,
                )
                .text("urlCharset", |b: &HttpConfigBuilder, opts, charset: String| {
                    b.set_url_charset(opts, charset)
                })
                .text("followRedirect", HttpConfigBuilder::set_follow_redirect)
                .text("preemptiveAuth", HttpConfigBuilder::set_preemptive_auth)
                .text(
                    "maxTotalConnections",
                    HttpConfigBuilder::set_max_total_connections,
                )
                .text(
                    "maxConnectionsPerHost",
                    HttpConfigBuilder::set_max_connections_per_host,
                )
                .text("connectionTimeout", HttpConfigBuilder::set_connection_timeout)
                .text("soTimeout", HttpConfigBuilder::set_so_timeout)
                .text("userAgent", |b: &HttpConfigBuilder, opts, agent: String| {
                    b.set_user_agent(opts, agent)
                })
                .texts("cookies", HttpConfigBuilder::set_cookies)
        });
        &TABLE
    }
}

impl ConfigBuilder for HttpConfigBuilder {
    fn name(&self) -> &str {
        self.namespace
    }

    fn option_table(&self) -> &OptionTable<Self> {
        Self::table()
    }
}

#[cfg(test)]
mod tests {
    use fsopts::{
        AnyConfigBuilder, ApplyError, BuilderRegistry, DelegatingOptionsBuilder, ErrorKind,
        StaticUserAuthenticator,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn delegate() -> DelegatingOptionsBuilder {
        let registry = BuilderRegistry::builder()
            .with_builder("http", Arc::new(HttpConfigBuilder::new()))
            .build();
        DelegatingOptionsBuilder::new(registry)
    }

    #[test]
    fn test_http_conformance() {
        fsopts_test::test_builder_conformance("http", Arc::new(HttpConfigBuilder::new()));
    }

    #[test]
    fn test_proxy_options() {
        let delegate = delegate();
        let builder = HttpConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        delegate
            .set_config_string(&mut opts, "http", "proxyHost", "proxy")
            .unwrap();
        delegate
            .set_config_string(&mut opts, "http", "proxyPort", "8080")
            .unwrap();
        assert_eq!(builder.get_proxy_host(&opts), Some("proxy"));
        assert_eq!(builder.get_proxy_port(&opts), Some(8080));

        let err = delegate
            .set_config_string(&mut opts, "http", "proxyPort", "70000")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert_eq!(builder.get_proxy_port(&opts), Some(8080));

        let auth = Arc::new(StaticUserAuthenticator::new("USR", "PWD").with_domain("DOMAIN"));
        let obj = fsopts::ObjectRef::from_arc(auth.clone())
            .with_capability::<dyn UserAuthenticator>(auth.clone());
        delegate
            .set_config_object(&mut opts, "http", "proxyAuthenticator", obj)
            .unwrap();
        let stored = builder.get_proxy_authenticator(&opts).unwrap();
        assert!(std::ptr::addr_eq(Arc::as_ptr(&stored), Arc::as_ptr(&auth)));
    }

    #[test]
    fn test_timeouts_and_flags() {
        let delegate = delegate();
        let builder = HttpConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        assert!(builder.get_follow_redirect(&opts));
        delegate
            .set_config_string(&mut opts, "http", "followRedirect", "false")
            .unwrap();
        assert!(!builder.get_follow_redirect(&opts));

        let err = delegate
            .set_config_string(&mut opts, "http", "preemptiveAuth", "yes")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);

        delegate
            .set_config_string(&mut opts, "http", "connectionTimeout", "2500")
            .unwrap();
        assert_eq!(
            builder.get_connection_timeout(&opts),
            Some(Duration::milliseconds(2500))
        );
    }

    #[test]
    fn test_setter_rejections() {
        let delegate = delegate();
        let builder = HttpConfigBuilder::instance();
        let mut opts = FileSystemOptions::new();

        delegate
            .set_config_string(&mut opts, "http", "urlCharset", "UTF-8")
            .unwrap();
        let err = delegate
            .set_config_string(&mut opts, "http", "urlCharset", "")
            .unwrap_err();
        assert_eq!(err.code(), "target-invocation-failed");
        assert_eq!(builder.get_url_charset(&opts), Some("UTF-8"));

        delegate
            .set_config_strings(&mut opts, "http", "cookies", &["a=1", "b="])
            .unwrap();
        assert_eq!(
            builder.get_cookies(&opts),
            Some(&["a=1".to_string(), "b=".to_string()][..])
        );
        let err = builder
            .apply(
                &mut opts,
                "setCookies",
                fsopts::ConfigArg::Texts(vec!["=1".into()]),
            )
            .unwrap_err();
        assert!(matches!(err, ApplyError::Invocation(_)));
    }

    #[test]
    fn test_inherits_default_options() {
        let delegate = delegate();
        let mut opts = FileSystemOptions::new();
        delegate
            .set_config_string(&mut opts, "http", "rootURI", "http://host/base")
            .unwrap();
        let http = HttpConfigBuilder::instance();
        assert_eq!(http.defaults().get_root_uri(&opts), Some("http://host/base"));
        assert_eq!(DefaultConfigBuilder::instance().get_root_uri(&opts), None);
    }
}
