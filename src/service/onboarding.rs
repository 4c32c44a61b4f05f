use chrono::{DateTime, FixedOffset};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    core::{
        error::OnboardingError,
        onboarding::{derive_state, state_after_account_type, OnboardingState, RoleForm},
    },
    model::{
        enums::{AccountType, Language},
        profile::Profile,
    },
    repository::{
        profile::{get_profile_by_id, update_account_type, update_language, update_onboarding_state},
        role_profile::role_profile_exists,
    },
};

/// Freshly loaded profile together with the state derived from it.
#[derive(Debug, Clone)]
pub struct Progress {
    pub profile: Profile,
    pub state: OnboardingState,
}

async fn has_role_profile(
    tx: &mut Transaction<'_, Postgres>,
    profile: &Profile,
) -> anyhow::Result<bool> {
    match profile.account_type().and_then(RoleForm::for_account_type) {
        Some(form) => role_profile_exists(tx, form, &profile.id).await,
        None => Ok(false),
    }
}

/// Loads the profile of `account_id` and derives its onboarding state. A
/// stored state tag that disagrees with the derived state is rewritten.
pub async fn load_progress(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    now: &DateTime<FixedOffset>,
) -> anyhow::Result<Progress> {
    let Some(mut profile) = get_profile_by_id(tx, account_id).await? else {
        anyhow::bail!("profile of account {} not found", account_id);
    };
    let has_role_profile = has_role_profile(tx, &profile).await?;
    let state = derive_state(&profile, has_role_profile);
    let tag = state.step().as_str();
    if profile.onboarding_state != tag {
        tracing::warn!(
            "repair onboarding state of {}: stored {} derived {}",
            account_id,
            profile.onboarding_state,
            tag
        );
        update_onboarding_state(tx, account_id, state.step(), now).await?;
        profile.onboarding_state = tag.to_string();
    }
    Ok(Progress { profile, state })
}

/// Records the account type. Allowed while no role profile has been
/// submitted for the current choice.
pub async fn select_account_type(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    account_type: AccountType,
    now: &DateTime<FixedOffset>,
) -> Result<OnboardingState, OnboardingError> {
    let progress = load_progress(tx, account_id, now).await?;
    match progress.state {
        OnboardingState::NeedsAccountType | OnboardingState::NeedsRoleProfile(_) => {}
        state => return Err(OnboardingError::OutOfOrder(state)),
    }
    let mut next = state_after_account_type(account_type);
    if let OnboardingState::NeedsRoleProfile(form) = next {
        if role_profile_exists(tx, form, account_id).await? {
            next = OnboardingState::NeedsLanguage;
        }
    }
    update_account_type(tx, account_id, account_type, next.step(), now).await?;
    tracing::info!(
        "account {} selected {}: {} -> {}",
        account_id,
        account_type,
        progress.state,
        next
    );
    Ok(next)
}

/// Sets the preferred language. From NeedsLanguage this completes
/// onboarding; once onboarded it only changes the preference.
pub async fn select_language(
    tx: &mut Transaction<'_, Postgres>,
    account_id: &Uuid,
    language: Language,
    now: &DateTime<FixedOffset>,
) -> Result<OnboardingState, OnboardingError> {
    let progress = load_progress(tx, account_id, now).await?;
    match progress.state {
        OnboardingState::NeedsLanguage | OnboardingState::Onboarded => {}
        state => return Err(OnboardingError::OutOfOrder(state)),
    }
    update_language(tx, account_id, language, now).await?;
    tracing::info!(
        "account {} selected {}: {} -> {}",
        account_id,
        language,
        progress.state,
        OnboardingState::Onboarded
    );
    Ok(OnboardingState::Onboarded)
}
