//! Delegating option dispatcher for file system providers.
//!
//! Lets callers set scheme specific options by name, with values given as
//! text, text sequences, type references or objects, without knowing which
//! builder will handle them.
//!
//! See [`DelegatingOptionsBuilder`] and [`OptionTable`].

mod auth;
mod coerce;
mod default;
mod delegate;
mod error;
mod options;
mod registry;
mod table;
mod value;
pub mod wrapper;

pub use self::{
    auth::{AuthDataKind, StaticUserAuthenticator, UserAuthenticator},
    coerce::{FromText, ParamType, SetterOutcome},
    default::DefaultConfigBuilder,
    delegate::DelegatingOptionsBuilder,
    error::{ApplyError, BoxError, ConfigError, ErrorKind},
    options::FileSystemOptions,
    registry::{BuilderRegistry, OptionsProvider, RegistryBuilder},
    table::{AnyConfigBuilder, ConfigBuilder, DynConfigBuilder, OptionInfo, OptionTable, setter_name},
    value::{ConfigArg, ObjectRef, Shape, TypeRef},
};
