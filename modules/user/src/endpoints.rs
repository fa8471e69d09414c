#[cfg(test)]
mod test;

use crate::{
    model::{RefreshRequest, TokenRequest, UserHead},
    service::UserService,
    Error,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use devtrack_auth::{
    authenticator::{default::default_scopes, user::UserInformation, Authenticator, TokenPair},
    authorizer::Require,
    ReadUser,
};
use devtrack_common::{
    db::Database,
    model::{Paginated, PaginatedResults},
};
use std::sync::Arc;

/// Mount the user directory endpoints. These require an authenticated caller.
pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    let service = UserService::new();
    config
        .app_data(web::Data::new(db))
        .app_data(web::Data::new(service))
        .service(all)
        .service(me);
}

/// Mount the token endpoints. These live on their own scope, outside the authentication
/// middleware, so that a caller can obtain its first token.
pub fn configure_token(
    config: &mut utoipa_actix_web::service_config::ServiceConfig,
    db: Database,
    auth: Option<Arc<Authenticator>>,
) {
    let mut scope = utoipa_actix_web::scope("/api/token")
        .app_data(web::Data::new(db))
        .app_data(web::Data::new(UserService::new()));

    if let Some(auth) = auth {
        scope = scope.app_data(web::Data::from(auth));
    }

    config.service(scope.service(token).service(refresh));
}

/// List user accounts
#[utoipa::path(
    tag = "user",
    operation_id = "listUsers",
    params(
        Paginated,
    ),
    responses(
        (status = 200, description = "User accounts, ordered by username", body = PaginatedResults<UserHead>),
    ),
)]
#[get("/users")]
pub async fn all(
    service: web::Data<UserService>,
    db: web::Data<Database>,
    web::Query(paginated): web::Query<Paginated>,
    _: Require<ReadUser>,
) -> actix_web::Result<impl Responder> {
    let result = service.fetch_users(paginated, db.as_ref()).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Retrieve the account of the authenticated caller
#[utoipa::path(
    tag = "user",
    operation_id = "getCurrentUser",
    responses(
        (status = 200, description = "The caller's account", body = UserHead),
        (status = 404, description = "The caller has no matching account"),
    ),
)]
#[get("/users/me")]
pub async fn me(
    service: web::Data<UserService>,
    db: web::Data<Database>,
    user: UserInformation,
) -> actix_web::Result<impl Responder> {
    let Some(username) = user.user_id() else {
        return Ok(HttpResponse::NotFound().finish());
    };

    match service.fetch_user(username, db.as_ref()).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Issue a token pair for a username/password pair
#[utoipa::path(
    tag = "auth",
    operation_id = "issueToken",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "A fresh token pair", body = TokenPair),
        (status = 401, description = "The credentials did not verify"),
        (status = 503, description = "Token issuing is disabled"),
    ),
)]
#[post("")]
pub async fn token(
    service: web::Data<UserService>,
    db: web::Data<Database>,
    authenticator: Option<web::Data<Authenticator>>,
    web::Json(request): web::Json<TokenRequest>,
) -> actix_web::Result<impl Responder> {
    let authenticator = authenticator.ok_or(Error::AuthNotConfigured)?;

    let user = service
        .verify_credentials(&request.username, &request.password, db.as_ref())
        .await?;

    let pair = authenticator.issue(&user.username, &default_scopes())?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a fresh token pair
#[utoipa::path(
    tag = "auth",
    operation_id = "refreshToken",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "A fresh token pair", body = TokenPair),
        (status = 401, description = "The refresh token did not verify"),
        (status = 503, description = "Token issuing is disabled"),
    ),
)]
#[post("/refresh")]
pub async fn refresh(
    authenticator: Option<web::Data<Authenticator>>,
    web::Json(request): web::Json<RefreshRequest>,
) -> actix_web::Result<impl Responder> {
    let authenticator = authenticator.ok_or(Error::AuthNotConfigured)?;

    let pair = authenticator.refresh(&request.refresh)?;

    Ok(HttpResponse::Ok().json(pair))
}
