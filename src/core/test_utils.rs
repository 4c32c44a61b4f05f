use std::sync::Arc;

use chrono::Local;
use redis::ConnectionLike;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::{
        security::{generate_refresh_token_from_account, generate_token_from_account, hash_password},
        session::add_session,
        storage::MemoryBlobStore,
    },
    factory::account::blank_profile,
    model::{account::Account, profile::Profile},
    repository::account::create_account,
    settings::{get_config, Config},
    AppState,
};

pub struct TestAccount {
    pub account: Account,
    pub profile: Profile,
    pub token: String,
    pub refresh_token: String,
}

/// Creates an account with a blank profile and a live session.
pub async fn generate_test_account<C: ConnectionLike>(
    db: &PgPool,
    redis_conn: &mut C,
    config: &Config,
    email: &str,
    password: &str,
) -> anyhow::Result<TestAccount> {
    let now = Local::now().fixed_offset();
    let account = Account {
        id: Uuid::now_v7(),
        email: email.to_lowercase(),
        password: hash_password(password).map_err(|err| anyhow::anyhow!(err))?,
        created_date: Some(now),
        updated_date: Some(now),
    };
    let profile = blank_profile(&account);
    let mut tx = db.begin().await?;
    create_account(&mut tx, &account, &profile).await?;
    tx.commit().await?;

    let token = generate_token_from_account(&account, config)?;
    let refresh_token = generate_refresh_token_from_account(&account, config)?;
    add_session(redis_conn, &account, config, &token, &refresh_token)?;

    Ok(TestAccount {
        account,
        profile,
        token,
        refresh_token,
    })
}

/// App state on the test database, served under `/api`, with an in-memory
/// blob store the test can inspect.
pub fn test_app_state(pool: PgPool) -> anyhow::Result<(Arc<AppState>, Arc<MemoryBlobStore>)> {
    test_app_state_with_config(pool, get_config()?)
}

/// Same as [`test_app_state`] on top of a caller-tuned config.
pub fn test_app_state_with_config(
    pool: PgPool,
    mut config: Config,
) -> anyhow::Result<(Arc<AppState>, Arc<MemoryBlobStore>)> {
    config.prefix = Some("/api".to_string());
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let blob_store = Arc::new(MemoryBlobStore::new(&config.storage_public_url));
    let app_state = Arc::new(AppState {
        db: pool,
        redis_conn: redis_pool,
        blob_store: blob_store.clone(),
        config,
    });
    Ok((app_state, blob_store))
}
