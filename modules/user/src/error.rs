use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use devtrack_common::error::ErrorInformation;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("token issuing is not configured")]
    AuthNotConfigured,
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Database(err) => {
                HttpResponse::InternalServerError().json(ErrorInformation::new("Database error", err))
            }
            Self::InvalidCredentials => {
                HttpResponse::Unauthorized().json(ErrorInformation::new("Unauthorized", self))
            }
            Self::AuthNotConfigured => HttpResponse::ServiceUnavailable()
                .json(ErrorInformation::new("Service unavailable", self)),
        }
    }
}
