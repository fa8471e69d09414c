use crate::{
    authenticator::{error::AuthorizationError, user::UserInformation},
    authorizer::Authorizer,
};
use actix_http::HttpMessage;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use devtrack_common::error::ErrorInformation;
use std::marker::PhantomData;

/// An extractor running a permission check before the handler body.
///
/// Handlers list `Require<SomePermission>` as an argument and ignore the value. The
/// [`Authorizer`] must be registered as application data.
pub struct Require<T: Requirement>(PhantomData<T>);

/// A check against the authorizer. Implemented by the permission marker types.
pub trait Requirement {
    fn enforce(authorizer: &Authorizer, user: &UserInformation) -> Result<(), RequirementError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    #[error("authorizer not registered in the application")]
    MissingAuthorizer,
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

impl ResponseError for RequirementError {
    fn error_response(&self) -> HttpResponse<actix_http::body::BoxBody> {
        match self {
            Self::MissingAuthorizer => HttpResponse::InternalServerError()
                .json(ErrorInformation::new("MissingAuthorizer", self)),
            Self::Authorization(err) => err.error_response(),
        }
    }
}

impl<T: Requirement> FromRequest for Require<T> {
    type Error = RequirementError;
    type Future = core::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<Authorizer>>() {
            Some(authorizer) => {
                let extensions = req.extensions();
                let user = extensions.get::<UserInformation>();

                T::enforce(authorizer, user.unwrap_or(&UserInformation::Anonymous))
                    .map(|()| Require(PhantomData))
            }
            None => Err(RequirementError::MissingAuthorizer),
        };

        core::future::ready(result)
    }
}
