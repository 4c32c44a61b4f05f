use chrono::Local;
use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        gate::{guard, GateDecision, SessionState},
        i18n::Translator,
        security::get_account_from_token,
    },
    model::{account::Account, enums::Language},
    schema::common::ApiError,
    service::onboarding::{load_progress, Progress},
    AppState,
};

pub mod auth;
pub mod home;
#[cfg(test)]
mod home_test;
pub mod onboarding;
#[cfg(test)]
mod onboarding_test;
pub mod role_profile;
pub mod translation;

pub(crate) async fn begin(
    state: &AppState,
    module: &str,
    function: &str,
) -> Result<Transaction<'static, Postgres>, ApiError> {
    state
        .db
        .begin()
        .await
        .map_err(|err| ApiError::internal(module, function, "begin transaction", err))
}

pub(crate) async fn commit(
    tx: Transaction<'_, Postgres>,
    module: &str,
    function: &str,
) -> Result<(), ApiError> {
    tx.commit()
        .await
        .map_err(|err| ApiError::internal(module, function, "commit transaction", err))
}

/// Runs the session gate for a bearer token. No live session answers 401
/// pointing at the sign-in screen.
pub(crate) async fn authenticate(
    state: &AppState,
    tx: &mut Transaction<'_, Postgres>,
    token: Option<String>,
    tr: &Translator,
    module: &str,
    function: &str,
) -> Result<Account, ApiError> {
    let mut redis_conn = state
        .redis_conn
        .get()
        .map_err(|err| ApiError::internal(module, function, "get redis pool connection", err))?;
    let account = get_account_from_token(tx, &mut redis_conn, token)
        .await
        .map_err(|err| ApiError::internal(module, function, "get account from token", err))?;
    match guard(SessionState::from(account)) {
        GateDecision::Allow(account) => Ok(account),
        GateDecision::Wait | GateDecision::RedirectTo(_) => Err(ApiError::unauthorized(tr)),
    }
}

/// Signed-in account with its onboarding progress and locale.
pub(crate) struct Caller {
    pub account: Account,
    pub progress: Progress,
    pub tr: Translator,
}

/// Authenticates the request and loads the caller's onboarding progress. The
/// locale is the stored profile language, else `lang`, else English.
pub(crate) async fn caller(
    state: &AppState,
    tx: &mut Transaction<'_, Postgres>,
    token: Option<String>,
    lang: Option<Language>,
    module: &str,
    function: &str,
) -> Result<Caller, ApiError> {
    let tr = Translator::resolve(None, lang);
    let account = authenticate(state, tx, token, &tr, module, function).await?;
    let now = Local::now().fixed_offset();
    let progress = load_progress(tx, &account.id, &now)
        .await
        .map_err(|err| {
            ApiError::internal_localized(module, function, "load onboarding state", err, &tr)
        })?;
    let tr = Translator::resolve(progress.profile.language(), lang);
    Ok(Caller {
        account,
        progress,
        tr,
    })
}
