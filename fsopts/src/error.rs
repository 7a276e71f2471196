//! Error types returned by the option dispatcher.

use crate::{ParamType, Shape};

/// Boxed error used as the cause of coercion and setter faults.
///
/// Callers can `downcast_ref` the cause to the concrete error type,
/// eg [`std::num::ParseIntError`] for a malformed port number.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by every `set_config*` operation of
/// [`crate::DelegatingOptionsBuilder`].
///
/// Each variant identifies the scheme and option of the failed request.
/// Use [`ConfigError::code`] for a stable machine readable code.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No builder is registered for the scheme.
    ///
    /// `option` is set when the lookup was made for a `set_config*` request.
    #[error(
        "unknown scheme '{scheme}'{}: no provider registered",
        option_suffix(.option)
    )]
    UnknownScheme {
        scheme: String,
        option: Option<String>,
    },

    /// The builder has no setter for the option that accepts the supplied
    /// argument shape.
    #[error("scheme '{scheme}' has no option '{option}' accepting a {shape}")]
    NoSuchOption {
        scheme: String,
        option: String,
        shape: Shape,
    },

    /// The supplied value does not satisfy the declared parameter type,
    /// eg an object of the wrong type.
    #[error("invalid value for option '{option}' of scheme '{scheme}': {reason}")]
    InvalidValue {
        scheme: String,
        option: String,
        reason: String,
    },

    /// A text value could not be parsed into the declared parameter type.
    #[error(
        "cannot convert value for option '{option}' of scheme '{scheme}' to {target}{}",
        element_suffix(.element)
    )]
    Coercion {
        scheme: String,
        option: String,
        target: ParamType,
        /// Index of the failing element for sequence values.
        element: Option<usize>,
        #[source]
        source: BoxError,
    },

    /// The setter rejected the coerced value.
    #[error("option '{option}' of scheme '{scheme}' rejected the value")]
    Invocation {
        scheme: String,
        option: String,
        #[source]
        source: BoxError,
    },
}

fn option_suffix(option: &Option<String>) -> String {
    match option {
        Some(option) => format!(" (option '{option}')"),
        None => String::new(),
    }
}

fn element_suffix(element: &Option<usize>) -> String {
    match element {
        Some(index) => format!(" (element {index})"),
        None => String::new(),
    }
}

/// Fieldless tag for the [`ConfigError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownScheme,
    NoSuchOption,
    InvalidValue,
    Coercion,
    Invocation,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownScheme { .. } => ErrorKind::UnknownScheme,
            Self::NoSuchOption { .. } => ErrorKind::NoSuchOption,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::Coercion { .. } => ErrorKind::Coercion,
            Self::Invocation { .. } => ErrorKind::Invocation,
        }
    }

    /// Stable error code, suitable for matching in callers and for display
    /// in configuration tooling.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::UnknownScheme => "unknown-scheme",
            ErrorKind::NoSuchOption => "no-such-option",
            ErrorKind::InvalidValue => "config-value-invalid",
            ErrorKind::Coercion => "value-coercion-failed",
            ErrorKind::Invocation => "target-invocation-failed",
        }
    }

    pub fn scheme(&self) -> &str {
        match self {
            Self::UnknownScheme { scheme, .. }
            | Self::NoSuchOption { scheme, .. }
            | Self::InvalidValue { scheme, .. }
            | Self::Coercion { scheme, .. }
            | Self::Invocation { scheme, .. } => scheme,
        }
    }

    /// The option name of the request.
    ///
    /// `None` only for an [`ConfigError::UnknownScheme`] raised by a bare
    /// [`crate::BuilderRegistry::resolve`].
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::UnknownScheme { option, .. } => option.as_deref(),
            Self::NoSuchOption { option, .. }
            | Self::InvalidValue { option, .. }
            | Self::Coercion { option, .. }
            | Self::Invocation { option, .. } => Some(option),
        }
    }

    pub(crate) fn from_apply(
        scheme: &str,
        option: &str,
        shape: Shape,
        err: ApplyError,
    ) -> Self {
        let scheme = scheme.to_string();
        let option = option.to_string();
        match err {
            ApplyError::NoSuchOption => Self::NoSuchOption {
                scheme,
                option,
                shape,
            },
            ApplyError::InvalidValue(reason) => Self::InvalidValue {
                scheme,
                option,
                reason,
            },
            ApplyError::Coercion {
                target,
                element,
                source,
            } => Self::Coercion {
                scheme,
                option,
                target,
                element,
                source,
            },
            ApplyError::Invocation(source) => Self::Invocation {
                scheme,
                option,
                source,
            },
        }
    }
}

/// Failure of a single option table entry.
///
/// Builders report this without knowing which scheme they were resolved
/// for; the dispatcher turns it into a [`ConfigError`].
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("no matching setter")]
    NoSuchOption,
    #[error("{0}")]
    InvalidValue(String),
    #[error("cannot convert value to {target}{}", element_suffix(.element))]
    Coercion {
        target: ParamType,
        element: Option<usize>,
        #[source]
        source: BoxError,
    },
    #[error("setter rejected the value: {0}")]
    Invocation(#[source] BoxError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_codes_and_coordinates() {
        let err = ConfigError::UnknownScheme {
            scheme: "gopher".to_string(),
            option: None,
        };
        assert_eq!(err.code(), "unknown-scheme");
        assert_eq!(err.scheme(), "gopher");
        assert_eq!(err.option(), None);
        assert_eq!(
            err.to_string(),
            "unknown scheme 'gopher': no provider registered"
        );

        let err = ConfigError::UnknownScheme {
            scheme: "gopher".to_string(),
            option: Some("proxyHost".to_string()),
        };
        assert_eq!(err.option(), Some("proxyHost"));
        assert_eq!(
            err.to_string(),
            "unknown scheme 'gopher' (option 'proxyHost'): no provider registered"
        );

        let err = ConfigError::from_apply(
            "http",
            "proxyHost",
            Shape::Object,
            ApplyError::InvalidValue("nope".to_string()),
        );
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.code(), "config-value-invalid");
        assert_eq!(err.option(), Some("proxyHost"));
        assert_eq!(
            err.to_string(),
            "invalid value for option 'proxyHost' of scheme 'http': nope"
        );
    }

    #[test]
    fn test_coercion_message_names_element() {
        let source = "x".parse::<u16>().unwrap_err();
        let err = ConfigError::from_apply(
            "sftp",
            "ports",
            Shape::Texts,
            ApplyError::Coercion {
                target: ParamType::Integer("u16"),
                element: Some(2),
                source: Box::new(source),
            },
        );
        assert_eq!(
            err.to_string(),
            "cannot convert value for option 'ports' of scheme 'sftp' to u16 (element 2)"
        );
        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.downcast_ref::<std::num::ParseIntError>().is_some());
    }
}
