use crate::{
    action::{
        model::{CreateActionRequest, UpdateActionRequest},
        service::ActionService,
    },
    deviation::service::DeviationService,
    Error,
};
use devtrack_entity::action::ActionStatus;
use devtrack_test_context::DevtrackContext;
use serde_json::json;
use test_context::test_context;
use test_log::test;

fn action_request(description: &str) -> CreateActionRequest {
    serde_json::from_value(json!({ "action_description": description }))
        .expect("a valid action payload")
}

async fn seed_deviation(ctx: &DevtrackContext, dev_number: &str) -> Result<(), anyhow::Error> {
    DeviationService::new(ctx.db.clone())
        .create_deviation(
            serde_json::from_value(json!({ "dev_number": dev_number }))?,
            None,
        )
        .await?;
    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn create_appends_after_the_highest_order(
    ctx: &DevtrackContext,
) -> Result<(), anyhow::Error> {
    seed_deviation(ctx, "DEV25-0001").await?;
    let service = ActionService::new(ctx.db.clone());

    for description in ["first", "second"] {
        service
            .create_action("DEV25-0001", action_request(description))
            .await?;
    }
    service
        .create_action(
            "DEV25-0001",
            serde_json::from_value(json!({
                "action_description": "parked",
                "order": 10,
            }))?,
        )
        .await?;
    service
        .create_action("DEV25-0001", action_request("appended"))
        .await?;

    let actions = service
        .fetch_actions("DEV25-0001", &ctx.db)
        .await?
        .expect("deviation should exist");

    assert_eq!(
        actions
            .iter()
            .map(|action| (action.head.action_description.as_str(), action.head.order))
            .collect::<Vec<_>>(),
        vec![("first", 1), ("second", 2), ("parked", 10), ("appended", 11)]
    );

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn taken_orders_are_rejected(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    seed_deviation(ctx, "DEV25-0001").await?;
    let service = ActionService::new(ctx.db.clone());

    let first = service
        .create_action("DEV25-0001", action_request("first"))
        .await?
        .expect("deviation should exist");
    service
        .create_action("DEV25-0001", action_request("second"))
        .await?;

    let err = service
        .create_action(
            "DEV25-0001",
            serde_json::from_value(json!({
                "action_description": "clash",
                "order": 1,
            }))?,
        )
        .await
        .expect_err("a taken order should fail");
    assert!(matches!(err, Error::BadRequest(_)));
    assert!(err.to_string().contains("already taken"));

    let err = service
        .update_action(
            "DEV25-0001",
            first.head.id,
            UpdateActionRequest {
                order: Some(2),
                ..Default::default()
            },
        )
        .await
        .expect_err("moving onto a taken order should fail");
    assert!(err.to_string().contains("already taken"));

    // the same order is free under another deviation
    seed_deviation(ctx, "DEV25-0002").await?;
    let other = service
        .create_action(
            "DEV25-0002",
            serde_json::from_value(json!({
                "action_description": "elsewhere",
                "order": 1,
            }))?,
        )
        .await?
        .expect("deviation should exist");
    assert_eq!(other.head.order, 1);

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn actions_are_scoped_to_their_deviation(
    ctx: &DevtrackContext,
) -> Result<(), anyhow::Error> {
    seed_deviation(ctx, "DEV25-0001").await?;
    seed_deviation(ctx, "DEV25-0002").await?;
    let service = ActionService::new(ctx.db.clone());

    let action = service
        .create_action("DEV25-0001", action_request("scoped"))
        .await?
        .expect("deviation should exist");
    let id = action.head.id;

    assert!(service.fetch_action("DEV25-0002", id, &ctx.db).await?.is_none());
    assert!(service
        .update_action("DEV25-0002", id, UpdateActionRequest::default())
        .await?
        .is_none());
    assert!(!service.delete_action("DEV25-0002", id).await?);

    // the action is still reachable through its own deviation
    assert!(service.fetch_action("DEV25-0001", id, &ctx.db).await?.is_some());
    assert!(service.delete_action("DEV25-0001", id).await?);
    assert!(service.fetch_action("DEV25-0001", id, &ctx.db).await?.is_none());

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn update_touches_only_provided_fields(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    seed_deviation(ctx, "DEV25-0001").await?;
    let service = ActionService::new(ctx.db.clone());

    let action = service
        .create_action(
            "DEV25-0001",
            serde_json::from_value(json!({
                "action_description": "Rework assembly fixture",
                "action_responsible": "Jo Farmer",
                "action_expiration_date": "2025-10-01",
            }))?,
        )
        .await?
        .expect("deviation should exist");

    let updated = service
        .update_action(
            "DEV25-0001",
            action.head.id,
            UpdateActionRequest {
                status: Some(ActionStatus::Done),
                ..Default::default()
            },
        )
        .await?
        .expect("action should exist");

    assert_eq!(updated.head.status, ActionStatus::Done);
    assert_eq!(updated.head.action_responsible.as_deref(), Some("Jo Farmer"));
    assert_eq!(
        updated.head.action_description,
        "Rework assembly fixture"
    );

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn responsible_users_replace_as_a_set(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let jdoe = ctx.seed_user("jdoe").await?;
    let psmith = ctx.seed_user("psmith").await?;
    seed_deviation(ctx, "DEV25-0001").await?;
    let service = ActionService::new(ctx.db.clone());

    let action = service
        .create_action(
            "DEV25-0001",
            serde_json::from_value(json!({
                "action_description": "owned",
                "action_responsible_users": [jdoe.id, jdoe.id],
            }))?,
        )
        .await?
        .expect("deviation should exist");
    // duplicate ids collapse to a single link
    assert_eq!(action.action_responsible_users, vec!["jdoe"]);

    let updated = service
        .update_action(
            "DEV25-0001",
            action.head.id,
            UpdateActionRequest {
                action_responsible_users: Some(vec![psmith.id]),
                ..Default::default()
            },
        )
        .await?
        .expect("action should exist");
    assert_eq!(updated.action_responsible_users, vec!["psmith"]);

    // an absent list leaves the links alone
    let untouched = service
        .update_action(
            "DEV25-0001",
            action.head.id,
            UpdateActionRequest {
                status: Some(ActionStatus::InProgress),
                ..Default::default()
            },
        )
        .await?
        .expect("action should exist");
    assert_eq!(untouched.action_responsible_users, vec!["psmith"]);

    // an empty list unlinks everyone
    let cleared = service
        .update_action(
            "DEV25-0001",
            action.head.id,
            UpdateActionRequest {
                action_responsible_users: Some(vec![]),
                ..Default::default()
            },
        )
        .await?
        .expect("action should exist");
    assert!(cleared.action_responsible_users.is_empty());

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn unknown_responsible_users_are_rejected(
    ctx: &DevtrackContext,
) -> Result<(), anyhow::Error> {
    seed_deviation(ctx, "DEV25-0001").await?;
    let service = ActionService::new(ctx.db.clone());

    let err = service
        .create_action(
            "DEV25-0001",
            serde_json::from_value(json!({
                "action_description": "orphaned",
                "action_responsible_users": [4711],
            }))?,
        )
        .await
        .expect_err("an unknown user id should fail");
    assert!(err.to_string().contains("responsible user ids are unknown"));

    // the failed create left nothing behind
    let actions = service
        .fetch_actions("DEV25-0001", &ctx.db)
        .await?
        .expect("deviation should exist");
    assert!(actions.is_empty());

    Ok(())
}

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn unknown_deviation_reports_not_found(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    let service = ActionService::new(ctx.db.clone());

    assert!(service
        .create_action("DEV25-9999", action_request("lost"))
        .await?
        .is_none());
    assert!(service.fetch_actions("DEV25-9999", &ctx.db).await?.is_none());
    assert!(service.fetch_action("DEV25-9999", 1, &ctx.db).await?.is_none());
    assert!(!service.delete_action("DEV25-9999", 1).await?);

    Ok(())
}
