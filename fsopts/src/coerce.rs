//! Conversion of raw text into setter parameter types.

use std::{fmt, path::PathBuf};

use crate::BoxError;

/// Declared parameter type of a setter.
///
/// Used to order setter candidates, to describe options and to report
/// coercion failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamType {
    Text,
    Boolean,
    /// An integer kind, eg `u16`.
    Integer(&'static str),
    /// A value parsed from text, eg a path or a duration.
    Derived(&'static str),
    Array(Box<ParamType>),
    /// An object that must provide the named type or capability.
    Object(&'static str),
    /// A type reference whose instances must provide the named capability.
    Class(&'static str),
}

impl ParamType {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Boolean => f.write_str("boolean"),
            Self::Integer(name) | Self::Derived(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "[{inner}]"),
            Self::Object(name) => write!(f, "object<{name}>"),
            Self::Class(name) => write!(f, "class<{name}>"),
        }
    }
}

/// A setter parameter type that can be parsed from text.
///
/// Implement this for option value types of your own builders
/// (eg enum-like options) to use them with
/// [`crate::OptionTable::text`] and [`crate::OptionTable::texts`].
pub trait FromText: Sized + 'static {
    fn param_type() -> ParamType;

    fn from_text(text: &str) -> Result<Self, BoxError>;
}

impl FromText for String {
    fn param_type() -> ParamType {
        ParamType::Text
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.to_string())
    }
}

/// Only the canonical spellings `true` and `false` are accepted.
impl FromText for bool {
    fn param_type() -> ParamType {
        ParamType::Boolean
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.parse::<bool>()?)
    }
}

macro_rules! impl_from_text_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromText for $ty {
                fn param_type() -> ParamType {
                    ParamType::Integer(stringify!($ty))
                }

                fn from_text(text: &str) -> Result<Self, BoxError> {
                    Ok(text.parse::<$ty>()?)
                }
            }
        )*
    };
}

impl_from_text_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromText for PathBuf {
    fn param_type() -> ParamType {
        ParamType::Derived("path")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        if text.is_empty() {
            return Err("empty path".into());
        }
        Ok(PathBuf::from(text))
    }
}

impl FromText for url::Url {
    fn param_type() -> ParamType {
        ParamType::Derived("url")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(url::Url::parse(text)?)
    }
}

/// Durations are given as a whole number of milliseconds.
impl FromText for time::Duration {
    fn param_type() -> ParamType {
        ParamType::Derived("duration (ms)")
    }

    fn from_text(text: &str) -> Result<Self, BoxError> {
        let millis = text.parse::<u32>()?;
        Ok(time::Duration::milliseconds(millis.into()))
    }
}

/// Result of a setter invocation.
///
/// Lets option tables accept both infallible setters and setters that
/// reject values.
pub trait SetterOutcome {
    fn into_result(self) -> Result<(), BoxError>;
}

impl SetterOutcome for () {
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> SetterOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
