use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use anyhow::Context;
use devtrack_auth::{
    auth::AuthConfigArguments,
    authenticator::{actix::new_auth, Authenticator},
    authorizer::Authorizer,
    devmode,
};
use devtrack_common::{config, db};
use devtrack_entity::user;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use std::{process::ExitCode, sync::Arc};
use utoipa_actix_web::AppExt;
use utoipa_swagger_ui::SwaggerUi;

pub mod openapi;

#[cfg(test)]
mod test;

/// Run the API server
#[derive(clap::Args, Debug)]
pub struct Run {
    /// The address to listen on
    #[arg(long, env = "HTTP_SERVER_BIND_ADDR", default_value = "::1")]
    pub bind_addr: String,

    /// The port to listen on
    #[arg(long, env = "HTTP_SERVER_BIND_PORT", default_value_t = 8080)]
    pub bind_port: u16,

    /// Drop and re-create the database on startup
    #[arg(long, env)]
    pub bootstrap: bool,

    /// Development mode: a fixed token secret and an `admin` login on a fresh database
    #[arg(long, env)]
    pub devmode: bool,

    // flattened commands must go last
    //
    /// Database configuration
    #[command(flatten)]
    pub database: config::Database,

    #[command(flatten)]
    pub auth: AuthConfigArguments,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let authenticator = self
            .auth
            .split(self.devmode)?
            .map(Authenticator::new)
            .map(Arc::new);
        let authorizer = Authorizer::new(authenticator.is_some());

        if authenticator.is_none() {
            log::warn!("authentication and authorization are disabled");
        }

        let db = match self.bootstrap {
            true => db::Database::bootstrap(&self.database).await?,
            false => {
                let db = db::Database::new(&self.database).await?;
                db.migrate().await?;
                db
            }
        };

        if self.devmode {
            ensure_devmode_user(&db).await?;
        }

        log::info!("listening on [{}]:{}", self.bind_addr, self.bind_port);

        HttpServer::new(move || {
            let db = db.clone();
            let authenticator = authenticator.clone();

            App::new()
                .wrap(Compress::default())
                .wrap(Logger::default())
                .app_data(web::Data::new(authorizer.clone()))
                .into_utoipa_app()
                .openapi(openapi::openapi())
                .configure(|svc| {
                    // the token scope comes first, it must not sit behind the
                    // token validation of the API scope
                    devtrack_module_user::endpoints::configure_token(
                        svc,
                        db.clone(),
                        authenticator.clone(),
                    );
                })
                .service(
                    utoipa_actix_web::scope("/api")
                        .map(|scope| scope.wrap(new_auth(authenticator.clone())))
                        .configure(|svc| {
                            devtrack_module_deviation::configure(svc, db.clone());
                            devtrack_module_user::configure(svc, db.clone());
                        }),
                )
                .openapi_service(|api| {
                    SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", api)
                })
                .into_app()
        })
        .bind((self.bind_addr.as_str(), self.bind_port))?
        .run()
        .await
        .context("failed to run the HTTP server")?;

        Ok(ExitCode::SUCCESS)
    }
}

/// Create the devmode login on a fresh database. An existing account is left alone.
async fn ensure_devmode_user(db: &db::Database) -> anyhow::Result<()> {
    if user::Entity::find()
        .filter(user::Column::Username.eq(devmode::USERNAME))
        .one(db)
        .await?
        .is_some()
    {
        return Ok(());
    }

    log::warn!(
        "creating the devmode user '{}', do not use this in production",
        devmode::USERNAME
    );

    user::ActiveModel {
        username: Set(devmode::USERNAME.to_string()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        email: Set(format!("{}@localhost", devmode::USERNAME)),
        password_hash: Set(bcrypt::hash(devmode::PASSWORD, bcrypt::DEFAULT_COST)?),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}
