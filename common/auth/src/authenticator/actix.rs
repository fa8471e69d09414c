use super::{user::UserInformation, Authenticator};
use actix_http::HttpMessage;
use actix_web::{dev::ServiceRequest, Error};
use actix_web_extras::middleware::Condition;
use actix_web_httpauth::{extractors::bearer::BearerAuth, middleware::HttpAuthentication};
use futures::{future::LocalBoxFuture, FutureExt};
use std::sync::Arc;

/// Validate the bearer token of a request, attaching the user to it.
pub async fn bearer_validator(
    req: ServiceRequest,
    auth: BearerAuth,
    authenticator: Arc<Authenticator>,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    match authenticator.authenticate(auth.token()) {
        Ok(details) => {
            req.extensions_mut()
                .insert(UserInformation::Authenticated(details));
            Ok(req)
        }
        Err(err) => Err((err.into(), req)),
    }
}

/// Create the token validation middleware.
///
/// Without an authenticator, the middleware is disabled and all requests pass through
/// anonymously.
#[allow(clippy::type_complexity)]
pub fn new_auth(
    auth: Option<Arc<Authenticator>>,
) -> Condition<
    HttpAuthentication<
        BearerAuth,
        impl Fn(
            ServiceRequest,
            BearerAuth,
        ) -> LocalBoxFuture<'static, Result<ServiceRequest, (Error, ServiceRequest)>>,
    >,
> {
    Condition::from_option(auth.map(move |authenticator| {
        HttpAuthentication::bearer(move |req, auth| {
            let authenticator = authenticator.clone();
            async move { bearer_validator(req, auth, authenticator).await }.boxed_local()
        })
    }))
}
