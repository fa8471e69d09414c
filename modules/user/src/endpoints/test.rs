use actix_web::{http::StatusCode, test as actix, App};
use devtrack_auth::authenticator::{Authenticator, AuthenticatorConfig, TokenPair};
use devtrack_test_context::{
    auth::{TestApp, TestAuthentication},
    DevtrackContext,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};
use serde_json::{json, Value};
use std::sync::Arc;
use test_context::test_context;
use test_log::test;
use utoipa_actix_web::AppExt;

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn users_listing(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    ctx.seed_user("psmith").await?;
    ctx.seed_user("jdoe").await?;

    let app = actix::init_service(
        App::new()
            .into_utoipa_app()
            .add_test_authorizer()
            .service(
                utoipa_actix_web::scope("/api")
                    .configure(|svc| super::configure(svc, ctx.db.clone())),
            )
            .into_app(),
    )
    .await;

    let request = actix::TestRequest::get().uri("/api/users").to_request();
    let response: Value = actix::call_and_read_body_json(&app, request).await;

    assert_eq!(response["total"], json!(2));
    assert_eq!(response["items"][0]["username"], json!("jdoe"));
    assert_eq!(response["items"][1]["username"], json!("psmith"));
    // the password hash stays internal
    assert_eq!(response["items"][0].get("password_hash"), None);

    let request = actix::TestRequest::get()
        .uri("/api/users?offset=1&limit=1")
        .to_request();
    let response: Value = actix::call_and_read_body_json(&app, request).await;

    assert_eq!(response["total"], json!(2));
    assert_eq!(response["items"][0]["username"], json!("psmith"));

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn current_user(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    ctx.seed_user("jdoe").await?;

    let app = actix::init_service(
        App::new()
            .into_utoipa_app()
            .add_test_authorizer()
            .service(
                utoipa_actix_web::scope("/api")
                    .configure(|svc| super::configure(svc, ctx.db.clone())),
            )
            .into_app(),
    )
    .await;

    // anonymous callers have no account

    let request = actix::TestRequest::get().uri("/api/users/me").to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = actix::TestRequest::get()
        .uri("/api/users/me")
        .to_request()
        .test_auth("jdoe");
    let response: Value = actix::call_and_read_body_json(&app, request).await;
    assert_eq!(response["username"], json!("jdoe"));
    assert_eq!(response["email"], json!("jdoe@example.com"));

    // authenticated, but with no matching account

    let request = actix::TestRequest::get()
        .uri("/api/users/me")
        .to_request()
        .test_auth("ghost");
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn token_flow(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let user = ctx.seed_user_with_password("jdoe", "s3cr3t").await?;
    let authenticator = Arc::new(Authenticator::new(AuthenticatorConfig::default()));

    let app = actix::init_service(
        App::new()
            .into_utoipa_app()
            .configure(|svc| {
                super::configure_token(svc, ctx.db.clone(), Some(authenticator.clone()))
            })
            .into_app(),
    )
    .await;

    // issue a pair and use the access token

    let request = actix::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "jdoe", "password": "s3cr3t" }))
        .to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let pair: TokenPair = actix::read_body_json(response).await;

    let details = authenticator.authenticate(&pair.access)?;
    assert_eq!(details.id, "jdoe");

    // wrong password, unknown user

    for (username, password) in [("jdoe", "wrong"), ("ghost", "s3cr3t")] {
        let request = actix::TestRequest::post()
            .uri("/api/token")
            .set_json(json!({ "username": username, "password": password }))
            .to_request();
        let response = actix::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // the refresh token buys a fresh pair

    let request = actix::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": pair.refresh }))
        .to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let next: TokenPair = actix::read_body_json(response).await;
    assert_eq!(authenticator.authenticate(&next.access)?.id, "jdoe");

    // an access token is no refresh token

    let request = actix::TestRequest::post()
        .uri("/api/token/refresh")
        .set_json(json!({ "refresh": pair.access }))
        .to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // a deactivated account no longer verifies

    let mut model = user.into_active_model();
    model.is_active = Set(false);
    model.update(&ctx.db).await?;

    let request = actix::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "jdoe", "password": "s3cr3t" }))
        .to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn token_issuing_disabled(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    ctx.seed_user_with_password("jdoe", "s3cr3t").await?;

    let app = actix::init_service(
        App::new()
            .into_utoipa_app()
            .configure(|svc| super::configure_token(svc, ctx.db.clone(), None))
            .into_app(),
    )
    .await;

    let request = actix::TestRequest::post()
        .uri("/api/token")
        .set_json(json!({ "username": "jdoe", "password": "s3cr3t" }))
        .to_request();
    let response = actix::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = actix::read_body_json(response).await;
    assert_eq!(body["error"], json!("Service unavailable"));

    Ok(())
}
