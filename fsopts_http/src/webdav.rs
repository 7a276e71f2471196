use std::{
    ops::Deref,
    sync::LazyLock,
};

use fsopts::{ConfigBuilder, FileSystemOptions, OptionTable};

use crate::HttpConfigBuilder;

/// Options for the `webdav` scheme.
///
/// Accepts all http options (stored separately from the `http` scheme's),
/// plus the webdav specific ones. The http getters are available through
/// `Deref`.
#[derive(Clone, Debug)]
pub struct WebdavConfigBuilder {
    http: HttpConfigBuilder,
}

impl Default for WebdavConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebdavConfigBuilder {
    const NAMESPACE: &'static str = "webdav";

    pub const fn new() -> Self {
        Self {
            http: HttpConfigBuilder::with_namespace(Self::NAMESPACE),
        }
    }

    pub fn instance() -> &'static Self {
        static INSTANCE: WebdavConfigBuilder = WebdavConfigBuilder::new();
        &INSTANCE
    }

    /// Whether to create versions of modified resources.
    pub fn set_versioning(&self, opts: &mut FileSystemOptions, versioning: bool) {
        opts.set(Self::NAMESPACE, "versioning", versioning);
    }

    pub fn is_versioning(&self, opts: &FileSystemOptions) -> bool {
        opts.get::<bool>(Self::NAMESPACE, "versioning")
            .copied()
            .unwrap_or(false)
    }

    pub fn set_creator_name(&self, opts: &mut FileSystemOptions, name: impl Into<String>) {
        opts.set(Self::NAMESPACE, "creatorName", name.into());
    }

    pub fn get_creator_name<'a>(&self, opts: &'a FileSystemOptions) -> Option<&'a str> {
        opts.get::<String>(Self::NAMESPACE, "creatorName")
            .map(String::as_str)
    }
}

impl Deref for WebdavConfigBuilder {
    type Target = HttpConfigBuilder;

    fn deref(&self) -> &Self::Target {
        &self.http
    }
}

impl ConfigBuilder for WebdavConfigBuilder {
    fn name(&self) -> &str {
        Self::NAMESPACE
    }

    fn option_table(&self) -> &OptionTable<Self> {
        static TABLE: LazyLock<OptionTable<WebdavConfigBuilder>> = LazyLock::new(|| {
            OptionTable::new()
                .inherit(HttpConfigBuilder::table(), |b: &WebdavConfigBuilder| &b.http)
                .text("versioning", WebdavConfigBuilder::set_versioning)
                .text("creatorName", |b: &WebdavConfigBuilder, opts, name: String| {
                    b.set_creator_name(opts, name)
                })
        });
        &TABLE
    }
}
