use crate::test::caller;
use actix_web::{http::StatusCode, test::TestRequest};
use devtrack_test_context::{call::CallService, DevtrackContext};
use serde_json::{json, Value};
use test_context::test_context;
use test_log::test;

async fn seed_deviation(app: &impl CallService, dev_number: &str) -> Result<(), anyhow::Error> {
    let request = TestRequest::post()
        .uri("/api/deviations")
        .set_json(json!({ "dev_number": dev_number }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn action_crud(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    seed_deviation(&app, "DEV25-0001").await?;

    // create

    let request = TestRequest::post()
        .uri("/api/deviations/DEV25-0001/actions")
        .set_json(json!({
            "action_description": "Contain affected stock",
            "action_responsible": "Jo Farmer",
        }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let action: Value = actix_web::test::read_body_json(response).await;

    assert_eq!(action["action_description"], json!("Contain affected stock"));
    assert_eq!(action["order"], json!(1));
    assert_eq!(action["status"], json!("Not Started"));
    assert_eq!(action["reminder_sent"], json!(false));
    let id = &action["id"];

    // list and read back

    let request = TestRequest::get()
        .uri("/api/deviations/DEV25-0001/actions")
        .to_request();
    let actions: Value = app.call_and_read_body_json(request).await;
    assert_eq!(actions.as_array().map(Vec::len), Some(1));

    let request = TestRequest::get()
        .uri(&format!("/api/deviations/DEV25-0001/actions/{id}"))
        .to_request();
    let action: Value = app.call_and_read_body_json(request).await;
    assert_eq!(action["action_responsible"], json!("Jo Farmer"));

    // update, fully and partially

    let request = TestRequest::put()
        .uri(&format!("/api/deviations/DEV25-0001/actions/{id}"))
        .set_json(json!({ "status": "In Progress" }))
        .to_request();
    let action: Value = app.call_and_read_body_json(request).await;
    assert_eq!(action["status"], json!("In Progress"));
    assert_eq!(action["action_responsible"], json!("Jo Farmer"));

    let request = TestRequest::patch()
        .uri(&format!("/api/deviations/DEV25-0001/actions/{id}"))
        .set_json(json!({ "reminder_sent": true }))
        .to_request();
    let action: Value = app.call_and_read_body_json(request).await;
    assert_eq!(action["reminder_sent"], json!(true));
    assert_eq!(action["status"], json!("In Progress"));

    // delete

    let request = TestRequest::delete()
        .uri(&format!("/api/deviations/DEV25-0001/actions/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = TestRequest::get()
        .uri(&format!("/api/deviations/DEV25-0001/actions/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn actions_are_scoped(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let app = caller(ctx).await?;
    seed_deviation(&app, "DEV25-0001").await?;
    seed_deviation(&app, "DEV25-0002").await?;

    let request = TestRequest::post()
        .uri("/api/deviations/DEV25-0001/actions")
        .set_json(json!({ "action_description": "scoped" }))
        .to_request();
    let action: Value = app.call_and_read_body_json(request).await;
    let id = &action["id"];

    // through the wrong deviation, the action does not exist

    let request = TestRequest::get()
        .uri(&format!("/api/deviations/DEV25-0002/actions/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::delete()
        .uri(&format!("/api/deviations/DEV25-0002/actions/{id}"))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // neither do actions of an unknown deviation

    let request = TestRequest::post()
        .uri("/api/deviations/DEV25-9999/actions")
        .set_json(json!({ "action_description": "lost" }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = TestRequest::get()
        .uri("/api/deviations/DEV25-9999/actions")
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(actix_web::test)]
async fn responsible_users(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let jdoe = ctx.seed_user("jdoe").await?;
    let app = caller(ctx).await?;
    seed_deviation(&app, "DEV25-0001").await?;

    let request = TestRequest::post()
        .uri("/api/deviations/DEV25-0001/actions")
        .set_json(json!({
            "action_description": "owned",
            "action_responsible_users": [jdoe.id],
        }))
        .to_request();
    let action: Value = app.call_and_read_body_json(request).await;
    assert_eq!(action["action_responsible_users"], json!(["jdoe"]));

    // an unknown user id is rejected

    let request = TestRequest::post()
        .uri("/api/deviations/DEV25-0001/actions")
        .set_json(json!({
            "action_description": "orphaned",
            "action_responsible_users": [4711],
        }))
        .to_request();
    let response = app.call_service(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_web::test::read_body_json(response).await;
    assert_eq!(body["error"], json!("Bad request"));

    Ok(())
}
