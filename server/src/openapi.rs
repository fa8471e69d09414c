use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Devtrack API",
    description = "Deviation tracking for manufacturing quality teams",
))]
pub struct ApiDoc;

/// The base API document. Path and schema entries are collected from the
/// mounted services.
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
