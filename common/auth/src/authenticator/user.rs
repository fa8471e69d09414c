use super::error::AuthorizationError;
use crate::Permission;
use actix_http::{HttpMessage, Payload};
use actix_web::{FromRequest, HttpRequest};
use std::convert::Infallible;
use std::future::{ready, Ready};

/// The user authenticated by a validated access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDetails {
    pub id: String,
    pub permissions: Vec<Permission>,
}

impl UserDetails {
    pub fn require_permission(&self, permission: Permission) -> Result<(), AuthorizationError> {
        if self.permissions.contains(&permission) {
            Ok(())
        } else {
            Err(AuthorizationError::Failed(permission))
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UserInformation {
    Authenticated(UserDetails),
    #[default]
    Anonymous,
}

impl UserInformation {
    /// The id of the authenticated user, [`None`] for anonymous requests.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Authenticated(details) => Some(&details.id),
            Self::Anonymous => None,
        }
    }

    pub fn permissions(&self) -> &[Permission] {
        match self {
            Self::Authenticated(details) => &details.permissions,
            Self::Anonymous => &[],
        }
    }

    pub fn require_permission(&self, permission: Permission) -> Result<(), AuthorizationError> {
        match self {
            Self::Authenticated(details) => details.require_permission(permission),
            Self::Anonymous => Err(AuthorizationError::Failed(permission)),
        }
    }
}

/// Takes the user information from the request, falling back to anonymous.
impl FromRequest for UserInformation {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<UserInformation>()
            .cloned()
            .unwrap_or_default()))
    }
}
