use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::{
        account::{Account, TABLE_NAME},
        profile::{Profile, TABLE_NAME as PROFILE_TABLE_NAME},
    },
};

pub async fn get_account_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Account>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], Some(1));
    let account = binds_query_as::<Account>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(account)
}

/// Emails are stored lowercased; lookups normalize the same way.
pub async fn get_account_by_email(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
) -> anyhow::Result<Option<Account>> {
    let stmt = query_builder(None, TABLE_NAME, &["email = $1".to_string()], Some(1));
    let account = binds_query_as::<Account>(
        &stmt,
        vec![SqlxBinds::String(email.trim().to_lowercase())],
    )
    .fetch_optional(&mut **tx)
    .await?;
    Ok(account)
}

/// Inserts the account and its blank profile row.
pub async fn create_account(
    tx: &mut Transaction<'_, Postgres>,
    account: &Account,
    profile: &Profile,
) -> anyhow::Result<()> {
    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, email, password, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5)
        "#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.password)
    .bind(account.created_date)
    .bind(account.updated_date)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        format!(
            r#"
        INSERT INTO {} (id, email, username, account_type, language, onboarding_completed,
            onboarding_state, created_date, updated_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
            PROFILE_TABLE_NAME
        )
        .as_str(),
    )
    .bind(account.id)
    .bind(&profile.email)
    .bind(&profile.username)
    .bind(&profile.account_type)
    .bind(&profile.language)
    .bind(profile.onboarding_completed)
    .bind(&profile.onboarding_state)
    .bind(profile.created_date)
    .bind(profile.updated_date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
