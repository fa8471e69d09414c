use crate::Permission;
use actix_http::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use devtrack_common::error::ErrorInformation;

#[derive(Clone, Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("authentication failed")]
    Failed,
}

impl ResponseError for AuthenticationError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Failed => HttpResponse::Unauthorized().json(ErrorInformation::new(
                "Unauthorized",
                "Authentication failed",
            )),
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("missing permission: {0}")]
    Failed(Permission),
}

impl ResponseError for AuthorizationError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Failed(permission) => HttpResponse::Forbidden().json(
                ErrorInformation::new("Forbidden", "Missing permission").with_details(permission),
            ),
        }
    }
}
