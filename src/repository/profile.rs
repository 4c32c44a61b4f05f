use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        onboarding::OnboardingStep,
        sqlx_utils::{binds_query, binds_query_as, query_builder, update_builder, SqlxBinds},
    },
    model::{
        enums::{AccountType, Language},
        profile::{Profile, TABLE_NAME},
    },
};

pub async fn get_profile_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
) -> anyhow::Result<Option<Profile>> {
    let stmt = query_builder(None, TABLE_NAME, &["id = $1".to_string()], Some(1));
    let profile = binds_query_as::<Profile>(&stmt, vec![SqlxBinds::Uuid(*id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(profile)
}

pub async fn update_account_type(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    account_type: AccountType,
    next_step: OnboardingStep,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<u64> {
    let stmt = update_builder(
        TABLE_NAME,
        &["account_type", "onboarding_state", "updated_date"],
        "id",
    );
    let res = binds_query(
        &stmt,
        vec![
            SqlxBinds::String(account_type.as_str().to_string()),
            SqlxBinds::String(next_step.as_str().to_string()),
            SqlxBinds::DateTimeFixedOffset(*now),
            SqlxBinds::Uuid(*id),
        ],
    )
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

/// Language and completion flag are written in one statement so the profile
/// never shows one without the other.
pub async fn update_language(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    language: Language,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<u64> {
    let stmt = update_builder(
        TABLE_NAME,
        &[
            "language",
            "onboarding_completed",
            "onboarding_state",
            "updated_date",
        ],
        "id",
    );
    let res = binds_query(
        &stmt,
        vec![
            SqlxBinds::String(language.as_str().to_string()),
            SqlxBinds::Bool(true),
            SqlxBinds::String(OnboardingStep::Onboarded.as_str().to_string()),
            SqlxBinds::DateTimeFixedOffset(*now),
            SqlxBinds::Uuid(*id),
        ],
    )
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

pub async fn update_onboarding_state(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    step: OnboardingStep,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<u64> {
    let stmt = update_builder(TABLE_NAME, &["onboarding_state", "updated_date"], "id");
    let res = binds_query(
        &stmt,
        vec![
            SqlxBinds::String(step.as_str().to_string()),
            SqlxBinds::DateTimeFixedOffset(*now),
            SqlxBinds::Uuid(*id),
        ],
    )
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

/// Administrative reset back to account type selection.
pub async fn reset_onboarding(
    tx: &mut Transaction<'_, Postgres>,
    id: &Uuid,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<u64> {
    let stmt = update_builder(
        TABLE_NAME,
        &[
            "account_type",
            "language",
            "onboarding_completed",
            "onboarding_state",
            "updated_date",
        ],
        "id",
    );
    let res = binds_query(
        &stmt,
        vec![
            SqlxBinds::OptionString(None),
            SqlxBinds::OptionString(None),
            SqlxBinds::Bool(false),
            SqlxBinds::String(OnboardingStep::NeedsAccountType.as_str().to_string()),
            SqlxBinds::DateTimeFixedOffset(*now),
            SqlxBinds::Uuid(*id),
        ],
    )
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}
