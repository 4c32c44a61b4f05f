use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::test_utils::{generate_test_account, test_app_state},
    init_openapi_route,
};

#[sqlx::test]
async fn test_state_of_new_account(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let member = generate_test_account(
        &app_state.db,
        &mut redis_conn,
        &app_state.config,
        "member@qmta.pk",
        "secret1",
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/onboarding/state")
        .header("authorization", format!("Bearer {}", member.token))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("state").assert_string("needs_account_type");
    body.get("redirect_to").assert_string("/account-type");
    body.get("onboarding_completed").assert_bool(false);
    body.get("account_type").assert_null();

    // When without session
    let resp = cli
        .get("/api/onboarding/state")
        .header("authorization", "Bearer expired-token")
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let json = resp.json().await;
    json.value().object().get("redirect_to").assert_string("/auth");
    Ok(())
}

#[sqlx::test]
async fn test_account_types_in_urdu(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/onboarding/account-types")
        .query("lang", &"urdu")
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let options = json.value().object().get("options").array();
    options.assert_len(5);
    let ids: Vec<String> = options
        .iter()
        .map(|x| x.object().get("id").string().to_string())
        .collect();
    assert!(!ids.contains(&"medical_rep".to_string()));
    assert!(ids.contains(&"medical_store_owner".to_string()));
    Ok(())
}

#[sqlx::test]
async fn test_trader_account_type(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let member = generate_test_account(
        &app_state.db,
        &mut redis_conn,
        &app_state.config,
        "member@qmta.pk",
        "secret1",
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/onboarding/account-type")
        .header("authorization", format!("Bearer {}", member.token))
        .body_json(&json!({"account_type": "trader"}))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("message").assert_string("Successfully saved!");
    body.get("state").assert_string("needs_role_profile");
    body.get("redirect_to").assert_string("/trader-details");
    let profile: (Option<String>, String) = sqlx::query_as(
        "SELECT account_type, onboarding_state FROM public.profiles WHERE id = $1",
    )
    .bind(member.account.id)
    .fetch_one(&app_state.db)
    .await?;
    assert_eq!(profile.0.as_deref(), Some("trader"));
    assert_eq!(profile.1, "needs_role_profile");
    Ok(())
}

#[sqlx::test]
async fn test_language_before_account_type(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, _) = test_app_state(pool)?;
    let mut redis_conn = app_state.redis_conn.get()?;
    let member = generate_test_account(
        &app_state.db,
        &mut redis_conn,
        &app_state.config,
        "member@qmta.pk",
        "secret1",
    )
    .await?;
    let app = init_openapi_route(app_state.clone(), &app_state.config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/onboarding/language")
        .header("authorization", format!("Bearer {}", member.token))
        .body_json(&json!({"language": "english"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::CONFLICT);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("message")
        .assert_string("Please complete the previous step first");
    body.get("redirect_to").assert_string("/account-type");
    let profile: (Option<String>, bool) =
        sqlx::query_as("SELECT language, onboarding_completed FROM public.profiles WHERE id = $1")
            .bind(member.account.id)
            .fetch_one(&app_state.db)
            .await?;
    assert_eq!(profile, (None, false));
    Ok(())
}

#[sqlx::test]
async fn test_medical_store_owner_skips_role_form(pool: PgPool) -> anyhow::Result<()> {
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

    // When account type
    let resp = cli
        .post("/api/onboarding/account-type")
        .header("authorization", format!("Bearer {}", member.token))
        .body_json(&json!({"account_type": "medical_store_owner"}))
        .send()
        .await;

    // Expect account type
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("state").assert_string("needs_language");
    body.get("redirect_to").assert_string("/language-selection");

    // When language
    let resp = cli
        .post("/api/onboarding/language")
        .header("authorization", format!("Bearer {}", member.token))
        .body_json(&json!({"language": "urdu"}))
        .send()
        .await;

    // Expect language, answered in urdu
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    body.get("message").assert_string("کامیابی سے محفوظ ہو گیا!");
    body.get("state").assert_string("onboarded");
    body.get("redirect_to").assert_string("/home");

    // When account type again
    let resp = cli
        .post("/api/onboarding/account-type")
        .header("authorization", format!("Bearer {}", member.token))
        .body_json(&json!({"account_type": "trader"}))
        .send()
        .await;

    // Expect refusal in the stored language
    resp.assert_status(StatusCode::CONFLICT);
    let json = resp.json().await;
    let body = json.value().object();
    body.get("message").assert_string("پہلے پچھلا مرحلہ مکمل کریں");
    body.get("redirect_to").assert_string("/home");
    Ok(())
}
