//! Authentication payloads.
//!
//! These values are stored in the options bag as-is; nothing here performs
//! authentication.

use std::{fmt, sync::Arc};

use crate::ObjectRef;

/// The kinds of data an authenticator can be asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthDataKind {
    Domain,
    Username,
    Password,
}

/// Capability of objects that supply credentials to a provider.
pub trait UserAuthenticator: fmt::Debug + Send + Sync {
    /// Return the requested credentials, or `None` for kinds the
    /// authenticator does not know.
    fn request(&self, kind: AuthDataKind) -> Option<String>;
}

/// Authenticator with fixed credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticUserAuthenticator {
    domain: Option<String>,
    username: String,
    password: String,
}

impl StaticUserAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            domain: None,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Wrap the authenticator for [`crate::DelegatingOptionsBuilder::set_config_object`].
    pub fn into_object_ref(self) -> ObjectRef {
        let auth = Arc::new(self);
        ObjectRef::from_arc(auth.clone()).with_capability::<dyn UserAuthenticator>(auth)
    }
}

impl UserAuthenticator for StaticUserAuthenticator {
    fn request(&self, kind: AuthDataKind) -> Option<String> {
        match kind {
            AuthDataKind::Domain => self.domain.clone(),
            AuthDataKind::Username => Some(self.username.clone()),
            AuthDataKind::Password => Some(self.password.clone()),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for StaticUserAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticUserAuthenticator")
            .field("domain", &self.domain)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_authenticator() {
        let auth = StaticUserAuthenticator::new("USR", "PWD").with_domain("DOMAIN");
        assert_eq!(auth.request(AuthDataKind::Domain).as_deref(), Some("DOMAIN"));
        assert_eq!(auth.request(AuthDataKind::Password).as_deref(), Some("PWD"));
        assert!(!format!("{auth:?}").contains("PWD"));

        let obj = auth.clone().into_object_ref();
        assert!(obj.is::<StaticUserAuthenticator>());
        let view = obj.view::<dyn UserAuthenticator>().unwrap();
        assert_eq!(view.request(AuthDataKind::Username).as_deref(), Some("USR"));
    }
}
