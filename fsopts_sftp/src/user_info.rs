use std::{fmt, sync::Arc};

use fsopts::{ObjectRef, TypeRef};

/// Interactive callbacks of an SSH session: host key confirmation and
/// credential prompts.
///
/// Types implementing this capability are passed to the `userinfo` option,
/// either as an object or as a type reference (see [`user_info_type`]).
pub trait UserInfo: fmt::Debug + Send + Sync + 'static {
    /// Answer a yes/no question, eg whether to accept an unknown host key.
    fn prompt_yes_no(&self, message: &str) -> bool;

    fn password(&self) -> Option<String> {
        None
    }

    fn passphrase(&self) -> Option<String> {
        None
    }

    /// Name of the implementing type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Accepts every host key and provides no credentials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrustEveryoneUserInfo;

impl TrustEveryoneUserInfo {
    pub fn type_ref() -> TypeRef {
        user_info_type::<Self>()
    }

    pub fn object_ref() -> ObjectRef {
        user_info_object(Self)
    }
}

impl UserInfo for TrustEveryoneUserInfo {
    fn prompt_yes_no(&self, _message: &str) -> bool {
        true
    }
}

/// Type reference for a [`UserInfo`] implementation.
///
/// Instances created from the reference expose the `dyn UserInfo` view the
/// `userinfo` option requires.
pub fn user_info_type<T>() -> TypeRef
where
    T: UserInfo + Default,
{
    TypeRef::with_constructor::<T, _>(|| user_info_object(T::default()))
}

pub(crate) fn user_info_object<T: UserInfo>(info: T) -> ObjectRef {
    let info = Arc::new(info);
    ObjectRef::from_arc(info.clone()).with_capability::<dyn UserInfo>(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_type_exposes_capability() {
        let ty = TrustEveryoneUserInfo::type_ref();
        assert!(ty.is::<TrustEveryoneUserInfo>());

        let obj = ty.instantiate();
        let info = obj.view::<dyn UserInfo>().unwrap();
        assert!(info.prompt_yes_no("accept host key?"));
        assert_eq!(info.password(), None);
        assert_eq!(
            info.type_name(),
            std::any::type_name::<TrustEveryoneUserInfo>()
        );
    }
}
