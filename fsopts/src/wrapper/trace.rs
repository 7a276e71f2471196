use std::any::Any;

use crate::{AnyConfigBuilder, ApplyError, ConfigArg, DynConfigBuilder, FileSystemOptions, OptionInfo};

/// Wrapper for a config builder that logs applied options with the
/// `tracing` crate.
///
/// * Applied options are logged at the `DEBUG` level
/// * Rejected options are logged at the `ERROR` level
///
/// Errors are always passed on to the caller.
///
/// [`AnyConfigBuilder::name`] reports the wrapper's name; the wrapped
/// builder stays reachable through [`TracedConfigBuilder::inner`].
pub struct TracedConfigBuilder {
    name: String,
    inner: DynConfigBuilder,
}

impl TracedConfigBuilder {
    /// Creates a new `TracedConfigBuilder` with the given name and inner builder.
    ///
    /// All logs will contain the name.
    pub fn new(name: impl Into<String>, inner: DynConfigBuilder) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &DynConfigBuilder {
        &self.inner
    }
}

impl std::fmt::Debug for TracedConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracedConfigBuilder")
            .field("name", &self.name)
            .field("inner", &self.inner.name())
            .finish()
    }
}

impl AnyConfigBuilder for TracedConfigBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> Vec<OptionInfo> {
        self.inner.describe()
    }

    fn apply(
        &self,
        opts: &mut FileSystemOptions,
        setter: &str,
        arg: ConfigArg,
    ) -> Result<(), ApplyError> {
        let shape = arg.shape();
        match self.inner.apply(opts, setter, arg) {
            Ok(()) => {
                tracing::debug!(builder = self.name.as_str(), setter, %shape, "apply::ok");
                Ok(())
            }
            Err(e) => {
                tracing::error!(builder = self.name.as_str(), setter, %shape, error = %e, "apply::failed");
                Err(e)
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
