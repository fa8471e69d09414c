#![allow(clippy::expect_used)]

pub mod auth;
pub mod call;

use devtrack_common as common;
use devtrack_common::db;
use devtrack_entity::user;
use postgresql_embedded::PostgreSQL;
use sea_orm::{ActiveModelTrait, Set};
use std::{env, path::PathBuf};
use test_context::AsyncTestContext;
use tracing::instrument;

/// A database-backed test fixture.
///
/// By default every test gets its own embedded PostgreSQL instance, torn down together with
/// the context. Setting `EXTERNAL_TEST_DB` runs the tests against a database configured
/// through the usual `DB_*` env vars instead.
#[allow(dead_code)]
pub struct DevtrackContext {
    pub db: common::db::Database,
    postgresql: Option<PostgreSQL>,
}

impl DevtrackContext {
    fn new(db: common::db::Database, postgresql: impl Into<Option<PostgreSQL>>) -> Self {
        Self {
            db,
            postgresql: postgresql.into(),
        }
    }

    /// Create a user directly in the database.
    ///
    /// First and last name stay empty, so the display name of the user is the username.
    pub async fn seed_user(&self, username: &str) -> Result<user::Model, anyhow::Error> {
        self.seed_user_with_hash(username, String::new()).await
    }

    /// Create a user whose password passes the credential check.
    pub async fn seed_user_with_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, anyhow::Error> {
        self.seed_user_with_hash(username, bcrypt::hash(password, 4)?)
            .await
    }

    async fn seed_user_with_hash(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<user::Model, anyhow::Error> {
        Ok(user::ActiveModel {
            username: Set(username.to_string()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            email: Set(format!("{username}@example.com")),
            password_hash: Set(password_hash),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await?)
    }
}

impl AsyncTestContext for DevtrackContext {
    #[instrument]
    #[allow(clippy::expect_used)]
    async fn setup() -> DevtrackContext {
        if env::var("EXTERNAL_TEST_DB").is_ok() {
            log::warn!("Using external database from 'DB_*' env vars");
            let config = common::config::Database::from_env().expect("DB config from env");

            let db = if env::var("EXTERNAL_TEST_DB_BOOTSTRAP").is_ok() {
                common::db::Database::bootstrap(&config).await
            } else {
                common::db::Database::new(&config).await
            }
            .expect("Configuring the database");

            return DevtrackContext::new(db, None);
        }

        let (db, postgresql) = db::embedded::create()
            .await
            .expect("Create an embedded database");

        DevtrackContext::new(db, postgresql)
    }
}

/// Absolute path of a test document under `etc/test-data`.
pub fn document_path(path: &str) -> PathBuf {
    let workspace_root: PathBuf = env!("CARGO_WORKSPACE_ROOT").into();
    workspace_root.join("etc/test-data").join(path)
}

#[cfg(test)]
mod test {
    use super::*;
    use test_context::test_context;
    use test_log::test;

    #[test_context(DevtrackContext)]
    #[test(tokio::test)]
    async fn seeded_users_are_queryable(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
        use sea_orm::EntityTrait;

        let seeded = ctx.seed_user("jdoe").await?;

        let found = user::Entity::find_by_id(seeded.id)
            .one(&ctx.db)
            .await?
            .expect("user should exist");

        assert_eq!(found.username, "jdoe");
        assert_eq!(found.display_name(), "jdoe");
        assert!(found.is_active);

        Ok(())
    }

    #[test]
    fn document_paths_stay_in_test_data() {
        let path = document_path("deviation-matrix.csv");
        assert!(path.ends_with("etc/test-data/deviation-matrix.csv"));
    }
}
