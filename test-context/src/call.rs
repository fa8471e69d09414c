use crate::auth::TestApp;
use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    App, Error,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::future::Future;
use utoipa_actix_web::{service_config::ServiceConfig, AppExt};

/// Allows passing an `impl Service` around as a reference when driving endpoints in tests.
pub trait CallService {
    /// Send the request, returning the raw response
    fn call_service(&self, r: Request) -> impl Future<Output = ServiceResponse>;
    /// Send the request, returning the response body
    fn call_and_read_body(&self, r: Request) -> impl Future<Output = Bytes>;
    /// Send the request, deserializing the response body from JSON
    fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> impl Future<Output = T>;
}

impl<S> CallService for S
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    async fn call_service(&self, r: Request) -> ServiceResponse {
        actix_web::test::call_service(self, r).await
    }

    async fn call_and_read_body(&self, r: Request) -> Bytes {
        actix_web::test::call_and_read_body(self, r).await
    }

    async fn call_and_read_body_json<T: DeserializeOwned>(&self, r: Request) -> T {
        actix_web::test::call_and_read_body_json(self, r).await
    }
}

/// Build a test application from a configure function, mounted under `/api` and
/// with a non-enforcing authorizer.
pub async fn caller<F>(f: F) -> anyhow::Result<impl CallService>
where
    F: FnOnce(&mut ServiceConfig),
{
    Ok(actix_web::test::init_service(
        App::new()
            .into_utoipa_app()
            .add_test_authorizer()
            .service(utoipa_actix_web::scope("/api").configure(f))
            .into_app(),
    )
    .await)
}
