pub mod require;
pub use require::*;

use crate::{
    authenticator::{error::AuthorizationError, user::UserInformation},
    Permission,
};

/// Checks permissions of authenticated users.
///
/// The default instance performs no checks, which is what is used when authentication is
/// disabled.
#[derive(Clone, Debug, Default)]
pub struct Authorizer {
    enforcing: bool,
}

impl Authorizer {
    pub fn new(enforcing: bool) -> Self {
        Self { enforcing }
    }

    pub fn require(
        &self,
        user: &UserInformation,
        permission: Permission,
    ) -> Result<(), AuthorizationError> {
        if !self.enforcing {
            return Ok(());
        }

        user.require_permission(permission)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::authenticator::user::UserDetails;

    #[test]
    fn default_allows_anonymous() {
        let authorizer = Authorizer::default();
        assert!(authorizer
            .require(&UserInformation::Anonymous, Permission::DeleteDeviation)
            .is_ok());
    }

    #[test]
    fn enforcing_rejects_anonymous() {
        let authorizer = Authorizer::new(true);
        assert!(authorizer
            .require(&UserInformation::Anonymous, Permission::ReadDeviation)
            .is_err());
    }

    #[test]
    fn enforcing_checks_permissions() {
        let authorizer = Authorizer::new(true);
        let user = UserInformation::Authenticated(UserDetails {
            id: "alice".into(),
            permissions: vec![Permission::ReadDeviation],
        });

        assert!(authorizer.require(&user, Permission::ReadDeviation).is_ok());
        assert!(authorizer
            .require(&user, Permission::DeleteDeviation)
            .is_err());
    }
}
