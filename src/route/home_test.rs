use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_account, test_app_state},
    init_openapi_route,
};

#[sqlx::test]
async fn test_dashboard_redirects_until_onboarded(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let member = generate_test_account(
        &app_state.db,
        &mut redis_conn,
        &app_state.config,
        "owner@qmta.pk",
        "secret1",
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);
    let bearer = format!("Bearer {}", member.token);

    // When not onboarded
    let resp = cli
        .get("/api/dashboard")
        .header("authorization", &bearer)
        .send()
        .await;

    // Expect redirect
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header("location", "/account-type");

    // When the role is chosen but its details are missing
    cli.post("/api/onboarding/account-type")
        .header("authorization", &bearer)
        .body_json(&json!({"account_type": "trader"}))
        .send()
        .await
        .assert_status_is_ok();
    let resp = cli
        .get("/api/dashboard")
        .header("authorization", &bearer)
        .send()
        .await;

    // Expect redirect to the role form
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header("location", "/trader-details");
    let json = resp.json().await;
    json.value()
        .object()
        .get("redirect_to")
        .assert_string("/trader-details");

    // When onboarded as a role without details form
    cli.post("/api/onboarding/account-type")
        .header("authorization", &bearer)
        .body_json(&json!({"account_type": "medical_store_owner"}))
        .send()
        .await
        .assert_status_is_ok();
    cli.post("/api/onboarding/language")
        .header("authorization", &bearer)
        .body_json(&json!({"language": "english"}))
        .send()
        .await
        .assert_status_is_ok();
    let resp = cli
        .get("/api/home")
        .header("authorization", &bearer)
        .send()
        .await;

    // Expect dashboard
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("greeting")
        .assert_string("Welcome to QMTA Portal, owner");
    body.get("account_type").assert_string("medical_store_owner");
    body.get("language").assert_string("english");

    // When signed out
    let resp = cli
        .get("/api/dashboard")
        .header("authorization", "Bearer expired-token")
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_shell_and_pages(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);

    // When shell
    let resp = cli.get("/api/shell").send().await;

    // Expect shell
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("menu").array().assert_len(4);
    let contacts = body.get("quick_contacts").array();
    contacts.assert_len(4);
    contacts
        .get(0)
        .object()
        .get("href")
        .assert_string("/contact/supplier");

    // When contact pages
    let resp = cli.get("/api/pages/contact/supplier").send().await;
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("title")
        .assert_string("Contact Supplier");
    let resp = cli.get("/api/pages/contact/unknown").send().await;
    resp.assert_status_is_ok();
    resp.json()
        .await
        .value()
        .object()
        .get("title")
        .assert_string("Contact");

    // When about page in urdu
    let resp = cli
        .get("/api/pages/about")
        .query("lang", &"urdu")
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("title").assert_string("ہمارے بارے میں");
    body.get("language").assert_string("urdu");
    Ok(())
}
