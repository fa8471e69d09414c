use devtrack_entity::user;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The public shape of a user account. The password hash is never part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserHead {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserHead {
    pub fn from_entity(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }

    pub fn from_entities(users: &[user::Model]) -> Vec<Self> {
        users.iter().map(Self::from_entity).collect()
    }
}

/// Credentials presented for token issuing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// A refresh token presented in exchange for a fresh token pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}
