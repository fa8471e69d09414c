use anyhow::Context;
use postgresql_embedded::{PostgreSQL, Settings, VersionReq};
use tracing::{info_span, Instrument};

use super::Database;

/// Create a throwaway PostgreSQL instance together with a bootstrapped database.
///
/// The instance lives in a temporary directory and goes away with the returned handle.
pub async fn create() -> anyhow::Result<(Database, PostgreSQL)> {
    let version = VersionReq::parse(option_env!("POSTGRESQL_VERSION").unwrap_or("=17.2.0"))
        .context("valid psql version")?;

    log::info!("starting embedded database, version {version}");

    let settings = Settings {
        version,
        username: "postgres".to_string(),
        password: "devtrack".to_string(),
        temporary: true,
        ..Default::default()
    };

    let postgresql = async {
        let mut postgresql = PostgreSQL::new(settings);
        postgresql.setup().await.context("set up the instance")?;
        postgresql.start().await.context("start the instance")?;
        Ok::<_, anyhow::Error>(postgresql)
    }
    .instrument(info_span!("embedded database"))
    .await?;

    let config = crate::config::Database {
        username: "postgres".into(),
        password: "devtrack".into(),
        host: "localhost".into(),
        name: "test".into(),
        port: postgresql.settings().port,
        ..crate::config::Database::from_env()?
    };

    let db = Database::bootstrap(&config)
        .await
        .context("bootstrap the test database")?;

    Ok((db, postgresql))
}
