#[cfg(test)]
mod test;

use crate::action::{
    model::{ActionDetails, CreateActionRequest, UpdateActionRequest},
    service::ActionService,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use devtrack_auth::{authorizer::Require, ReadDeviation, UpdateDeviation};
use devtrack_common::db::Database;

pub fn configure(config: &mut utoipa_actix_web::service_config::ServiceConfig, db: Database) {
    let service = ActionService::new(db);
    config
        .app_data(web::Data::new(service))
        .service(all)
        .service(create)
        .service(get)
        .service(update)
        .service(partial_update)
        .service(delete_action);
}

/// List the actions of a deviation
#[utoipa::path(
    tag = "action",
    operation_id = "listActions",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    responses(
        (status = 200, description = "The actions of the deviation, in presentation order", body = Vec<ActionDetails>),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[get("/deviations/{dev_number}/actions")]
pub async fn all(
    service: web::Data<ActionService>,
    db: web::Data<Database>,
    dev_number: web::Path<String>,
    _: Require<ReadDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.fetch_actions(&dev_number, db.as_ref()).await? {
        Some(actions) => Ok(HttpResponse::Ok().json(actions)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create an action under a deviation
#[utoipa::path(
    tag = "action",
    operation_id = "createAction",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
    ),
    request_body = CreateActionRequest,
    responses(
        (status = 201, description = "The new action", body = ActionDetails),
        (status = 400, description = "A reference of the payload is invalid"),
        (status = 404, description = "Matching deviation not found"),
    ),
)]
#[post("/deviations/{dev_number}/actions")]
pub async fn create(
    service: web::Data<ActionService>,
    dev_number: web::Path<String>,
    web::Json(request): web::Json<CreateActionRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    match service.create_action(&dev_number, request).await? {
        Some(action) => Ok(HttpResponse::Created().json(action)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Retrieve action details
#[utoipa::path(
    tag = "action",
    operation_id = "getAction",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
        ("action_id", Path, description = "Id of the action"),
    ),
    responses(
        (status = 200, description = "Matching action", body = ActionDetails),
        (status = 404, description = "The action does not exist, or belongs to another deviation"),
    ),
)]
#[get("/deviations/{dev_number}/actions/{action_id}")]
pub async fn get(
    service: web::Data<ActionService>,
    db: web::Data<Database>,
    path: web::Path<(String, i32)>,
    _: Require<ReadDeviation>,
) -> actix_web::Result<impl Responder> {
    let (dev_number, action_id) = path.into_inner();

    match service.fetch_action(&dev_number, action_id, db.as_ref()).await? {
        Some(action) => Ok(HttpResponse::Ok().json(action)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update an action
#[utoipa::path(
    tag = "action",
    operation_id = "updateAction",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
        ("action_id", Path, description = "Id of the action"),
    ),
    request_body = UpdateActionRequest,
    responses(
        (status = 200, description = "The updated action", body = ActionDetails),
        (status = 404, description = "The action does not exist, or belongs to another deviation"),
    ),
)]
#[put("/deviations/{dev_number}/actions/{action_id}")]
pub async fn update(
    service: web::Data<ActionService>,
    path: web::Path<(String, i32)>,
    web::Json(request): web::Json<UpdateActionRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    let (dev_number, action_id) = path.into_inner();

    match service.update_action(&dev_number, action_id, request).await? {
        Some(action) => Ok(HttpResponse::Ok().json(action)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update a subset of the fields of an action
#[utoipa::path(
    tag = "action",
    operation_id = "patchAction",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
        ("action_id", Path, description = "Id of the action"),
    ),
    request_body = UpdateActionRequest,
    responses(
        (status = 200, description = "The updated action", body = ActionDetails),
        (status = 404, description = "The action does not exist, or belongs to another deviation"),
    ),
)]
#[patch("/deviations/{dev_number}/actions/{action_id}")]
pub async fn partial_update(
    service: web::Data<ActionService>,
    path: web::Path<(String, i32)>,
    web::Json(request): web::Json<UpdateActionRequest>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    let (dev_number, action_id) = path.into_inner();

    match service.update_action(&dev_number, action_id, request).await? {
        Some(action) => Ok(HttpResponse::Ok().json(action)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete an action
#[utoipa::path(
    tag = "action",
    operation_id = "deleteAction",
    params(
        ("dev_number", Path, description = "Business identifier of the deviation"),
        ("action_id", Path, description = "Id of the action"),
    ),
    responses(
        (status = 204, description = "The action was deleted"),
        (status = 404, description = "The action does not exist, or belongs to another deviation"),
    ),
)]
#[delete("/deviations/{dev_number}/actions/{action_id}")]
pub async fn delete_action(
    service: web::Data<ActionService>,
    path: web::Path<(String, i32)>,
    _: Require<UpdateDeviation>,
) -> actix_web::Result<impl Responder> {
    let (dev_number, action_id) = path.into_inner();

    match service.delete_action(&dev_number, action_id).await? {
        true => Ok(HttpResponse::NoContent().finish()),
        false => Ok(HttpResponse::NotFound().finish()),
    }
}
