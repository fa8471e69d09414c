use crate::ensure_devmode_user;
use devtrack_auth::devmode;
use devtrack_module_user::service::UserService;
use devtrack_test_context::DevtrackContext;
use test_context::test_context;
use test_log::test;

#[test_context(DevtrackContext)]
#[test(tokio::test)]
async fn devmode_user_is_seeded_once(ctx: &DevtrackContext) -> Result<(), anyhow::Error> {
    ensure_devmode_user(&ctx.db).await?;
    ensure_devmode_user(&ctx.db).await?;

    let service = UserService::new();
    let users = service.fetch_users(Default::default(), &ctx.db).await?;
    assert_eq!(users.total, 1);

    // the seeded credentials can log in
    let user = service
        .verify_credentials(devmode::USERNAME, devmode::PASSWORD, &ctx.db)
        .await?;
    assert_eq!(user.username, devmode::USERNAME);

    Ok(())
}

#[test]
fn openapi_document_has_a_title() {
    let doc = crate::openapi::openapi();
    assert_eq!(doc.info.title, "Devtrack API");
}
