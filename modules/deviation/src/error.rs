use actix_web::body::BoxBody;
use actix_web::{HttpResponse, ResponseError};
use devtrack_common::error::ErrorInformation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ResponseError for Error {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Database(err) => HttpResponse::InternalServerError()
                .json(ErrorInformation::new("Database error", err)),
            Self::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorInformation::new("Bad request", msg))
            }
        }
    }
}
