
use crate::deviation::{
    model::{
        CreateDeviationRequest, DeviationDetails, ReorderRequest, UpdateDeviationRequest,
    },
    service::DeviationService,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use devtrack_auth::{
    authenticator::user::UserInformation, authorizer::Require, CreateDeviation, DeleteDeviation,
    ReadDeviation, UpdateDeviation,
};
use devtrack_common::{
    db::Database,
    model::{Paginated, PaginatedResults},
};

pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    let service = DeviationService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(partial_update)
        .service(delete_deviation)
        .service(reorder_actions);
}

#[derive(Clone, Debug, Default, serde::Deserialize, utoipa::IntoParams)]
struct ListFilter {
    /// Restrict the listing to deviations the caller created or is responsible on
    #[serde(default)]
    my_deviations: bool,
}

/// List deviations
#[utoipa::path(
    tag = "deviation",
    operation_id = "listDeviations",
    params(
        ListFilter,
        Paginated,
    ),
    responses(
        (status = 200, description = "Matching deviations", body = PaginatedResults<crate::deviation::model::DeviationSummary>),
    ),
)]
#[get("/deviations")]
pub async fn all(
    service: web::Data<DeviationService>,
    db: web::Data<Database>,
    web::Query(filter): web::Query<ListFilter>,
    web::Query(paginated): web::Query<Paginated>,
    user: UserInformation,
    _: Require<ReadDeviation>,
) -> actix_web::Result<impl Responder> {
    let mine_for = match filter.my_deviations {
        true => user.user_id(),
        false => None,
    };

    let result = service
        .fetch_deviations(mine_for, paginated, db.as_ref())
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Create a deviation
#[utoipa::path(
    tag = "deviation",
    operation_id = "createDeviation",
    request_body = CreateDeviationRequest,
    responses(
        (status = 201, description = "The new deviation", body = DeviationDetails),
        (status = 400, description = "The dev_number is already taken, or a reference is invalid"),
    ),
)]
#[post("/deviations")]
pub async fn create(
    service: web::Data<DeviationService>,
    web::Json(request): web::Json<CreateDeviationRequest>,
    user: UserInformation,
    _: Require<CreateDeviation>,
) -> actix_web::Result<impl Responder> {
    let result = service.create_deviation(request, user.user_id()).await?;

    Ok(HttpResponse::Created().json(result))
}

/// Retrieve deviation details
#[utoipa::path(
    tag = "deviation",
    operation_id = "getDeviation",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    responses(
        (status = 200, description = "Matching deviation", body = DeviationDetails),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[get("/deviations/{dev_number}")]
pub async fn get(
    service: web::Data<DeviationService>,
    db: web::Data<Database>,
    dev_number: web::Path<String>,
    _: Require<ReadDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.fetch_deviation(&dev_number, db.as_ref()).await? {
        Some(deviation) => Ok(HttpResponse::Ok().json(deviation)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update a deviation
#[utoipa::path(
    tag = "deviation",
    operation_id = "updateDeviation",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    request_body = UpdateDeviationRequest,
    responses(
        (status = 200, description = "The updated deviation", body = DeviationDetails),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[put("/deviations/{dev_number}")]
pub async fn update(
    service: web::Data<DeviationService>,
    dev_number: web::Path<String>,
    web::Json(request): web::Json<UpdateDeviationRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.update_deviation(&dev_number, request).await? {
        Some(deviation) => Ok(HttpResponse::Ok().json(deviation)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update a subset of the fields of a deviation
#[utoipa::path(
    tag = "deviation",
    operation_id = "patchDeviation",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    request_body = UpdateDeviationRequest,
    responses(
        (status = 200, description = "The updated deviation", body = DeviationDetails),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[patch("/deviations/{dev_number}")]
pub async fn partial_update(
    service: web::Data<DeviationService>,
    dev_number: web::Path<String>,
    web::Json(request): web::Json<UpdateDeviationRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.update_deviation(&dev_number, request).await? {
        Some(deviation) => Ok(HttpResponse::Ok().json(deviation)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a deviation, including all of its actions
#[utoipa::path(
    tag = "deviation",
    operation_id = "deleteDeviation",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    responses(
        (status = 204, description = "The deviation was deleted"),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[delete("/deviations/{dev_number}")]
pub async fn delete_deviation(
    service: web::Data<DeviationService>,
    dev_number: web::Path<String>,
    _: Require<DeleteDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.delete_deviation(&dev_number).await? {
        true => Ok(HttpResponse::NoContent().finish()),
        false => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Reorder the actions of a deviation
///
/// Applies the requested order values in one transaction. Actions of the deviation which are
/// not named in the request keep their current order value.
#[utoipa::path(
    tag = "deviation",
    operation_id = "reorderActions",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "The deviation with the new action order", body = DeviationDetails),
        (status = 400, description = "A referenced action does not belong to the deviation"),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[patch("/deviations/{dev_number}/reorder_actions")]
pub async fn reorder_actions(
    service: web::Data<DeviationService>,
    dev_number: web::Path<String>,
    web::Json(request): web::Json<ReorderRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    match service
        .reorder_actions(&dev_number, &request.new_order)
        .await?
    {
        Some(deviation) => Ok(HttpResponse::Ok().json(deviation)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}
