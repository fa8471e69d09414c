pub mod embedded;
pub mod limiter;

use anyhow::ensure;
use devtrack_migration::{Migrator, MigratorTrait};
use sea_orm::{
    prelude::async_trait, AccessMode, ConnectOptions, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, ExecResult, IsolationLevel, QueryResult, RuntimeErr,
    Statement, TransactionError, TransactionTrait,
};
use sqlx::error::ErrorKind;
use std::{error::Error, future::Future, ops::Deref, pin::Pin};
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct Database {
    db: DatabaseConnection,
}

impl Database {
    #[instrument(err)]
    pub async fn new(database: &crate::config::Database) -> Result<Self, anyhow::Error> {
        log::debug!(
            "connecting to database '{}' on {}:{}",
            database.name,
            database.host,
            database.port
        );

        let mut opt = ConnectOptions::new(database.to_url());
        opt.max_connections(database.max_conn);
        opt.min_connections(database.min_conn);
        opt.sqlx_logging_level(log::LevelFilter::Trace);

        let db = sea_orm::Database::connect(opt).await?;

        Ok(Self { db })
    }

    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        log::debug!("running migrations");
        Migrator::up(&self.db, None).await?;
        log::debug!("migrations applied");

        Ok(())
    }

    /// Drop and re-create the database, then apply all migrations.
    #[instrument(err)]
    pub async fn bootstrap(database: &crate::config::Database) -> Result<Self, anyhow::Error> {
        ensure!(
            database.url.is_none(),
            "cannot bootstrap a database configured with '--db-url'"
        );

        // connect to the maintenance database, the target may not exist yet
        let admin = crate::config::Database {
            name: "postgres".into(),
            ..database.clone()
        };

        log::info!("re-creating database '{}'", database.name);

        let db = sea_orm::Database::connect(admin.to_url()).await?;
        let backend = db.get_database_backend();
        for sql in [
            format!("DROP DATABASE IF EXISTS \"{}\";", database.name),
            format!("CREATE DATABASE \"{}\";", database.name),
        ] {
            db.execute(Statement::from_string(backend, sql)).await?;
        }
        db.close().await?;

        let db = Self::new(database).await?;
        db.migrate().await?;

        Ok(db)
    }

    #[instrument(skip(self), err)]
    pub async fn close(self) -> anyhow::Result<()> {
        Ok(self.db.close().await?)
    }
}

impl Deref for Database {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

#[async_trait::async_trait]
impl ConnectionTrait for Database {
    fn get_database_backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    async fn execute(&self, stmt: Statement) -> Result<ExecResult, DbErr> {
        self.db.execute(stmt).await
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        self.db.execute_unprepared(sql).await
    }

    async fn query_one(&self, stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        self.db.query_one(stmt).await
    }

    async fn query_all(&self, stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        self.db.query_all(stmt).await
    }

    fn support_returning(&self) -> bool {
        self.db.support_returning()
    }
}

#[async_trait::async_trait]
impl TransactionTrait for Database {
    async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.db.begin().await
    }

    async fn begin_with_config(
        &self,
        isolation_level: Option<IsolationLevel>,
        access_mode: Option<AccessMode>,
    ) -> Result<DatabaseTransaction, DbErr> {
        self.db
            .begin_with_config(isolation_level, access_mode)
            .await
    }

    async fn transaction<F, T, E>(&self, callback: F) -> Result<T, TransactionError<E>>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
        T: Send,
        E: Error + Send,
    {
        self.db.transaction(callback).await
    }

    async fn transaction_with_config<F, T, E>(
        &self,
        callback: F,
        isolation_level: Option<IsolationLevel>,
        access_mode: Option<AccessMode>,
    ) -> Result<T, TransactionError<E>>
    where
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
        T: Send,
        E: Error + Send,
    {
        self.db
            .transaction_with_config(callback, isolation_level, access_mode)
            .await
    }
}

/// Classification of database errors the services care about.
pub trait DatabaseErrors {
    /// `true` when the error is a unique constraint violation
    fn is_duplicate(&self) -> bool;
}

impl DatabaseErrors for DbErr {
    fn is_duplicate(&self) -> bool {
        match self {
            DbErr::Query(RuntimeErr::SqlxError(sqlx::error::Error::Database(err))) => {
                err.kind() == ErrorKind::UniqueViolation
            }
            _ => false,
        }
    }
}
