use crate::{model::UserHead, Error};
use devtrack_common::{
    db::limiter::LimiterTrait,
    model::{Paginated, PaginatedResults},
};
use devtrack_entity::user;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

#[derive(Default)]
pub struct UserService {}

impl UserService {
    pub fn new() -> Self {
        Self {}
    }

    /// List user accounts, ordered by username.
    pub async fn fetch_users<C: ConnectionTrait>(
        &self,
        paginated: Paginated,
        connection: &C,
    ) -> Result<PaginatedResults<UserHead>, Error> {
        let limiter = user::Entity::find()
            .order_by_asc(user::Column::Username)
            .limiting(connection, &paginated);

        let total = limiter.total().await?;

        Ok(PaginatedResults {
            total,
            items: UserHead::from_entities(&limiter.fetch().await?),
        })
    }

    pub async fn fetch_user<C: ConnectionTrait>(
        &self,
        username: &str,
        connection: &C,
    ) -> Result<Option<UserHead>, Error> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(connection)
            .await?
            .map(|user| UserHead::from_entity(&user)))
    }

    /// Verify a username/password pair against the stored bcrypt hash.
    ///
    /// Inactive accounts and accounts with a hash the verifier cannot parse fail verification,
    /// indistinguishable from a wrong password.
    pub async fn verify_credentials<C: ConnectionTrait>(
        &self,
        username: &str,
        password: &str,
        connection: &C,
    ) -> Result<user::Model, Error> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(connection)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !user.is_active {
            return Err(Error::InvalidCredentials);
        }

        if !bcrypt::verify(password, &user.password_hash).unwrap_or(false) {
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }
}
