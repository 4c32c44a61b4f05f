use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::{error::OnboardingError, i18n::Translator, security::BearerAuthorization},
    model::enums::{AccountType, Language},
    schema::{
        common::ApiError,
        onboarding::{
            AccountTypeOption, AccountTypeOptionsResponse, AccountTypeRequest, LanguageRequest,
            OnboardingStateResponse, OnboardingStateResponses, TransitionResponse,
            TransitionResponses,
        },
    },
    service::onboarding::{select_account_type, select_language},
    AppState,
};

use super::{begin, caller, commit};

const MODULE: &str = "route.onboarding";

#[derive(Tags)]
enum ApiOnboardingTags {
    Onboarding,
}

pub struct ApiOnboarding;

#[OpenApi]
impl ApiOnboarding {
    /// Current onboarding state and the screen the client should show
    #[oai(
        path = "/onboarding/state",
        method = "get",
        tag = "ApiOnboardingTags::Onboarding"
    )]
    async fn onboarding_state(
        &self,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> OnboardingStateResponses {
        get_state(&state, auth.0.token, lang.0)
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/onboarding/account-types",
        method = "get",
        tag = "ApiOnboardingTags::Onboarding"
    )]
    async fn onboarding_account_types(
        &self,
        lang: Query<Option<Language>>,
    ) -> Json<AccountTypeOptionsResponse> {
        let tr = Translator::resolve(None, lang.0);
        let options = AccountType::ALL
            .into_iter()
            // legacy alias, chosen through medical_representative
            .filter(|x| *x != AccountType::MedicalRep)
            .map(|x| AccountTypeOption {
                id: x,
                label: tr.t(x.label_key()),
            })
            .collect();
        Json(AccountTypeOptionsResponse {
            title: tr.t("selectAccountType"),
            options,
        })
    }

    #[oai(
        path = "/onboarding/account-type",
        method = "post",
        tag = "ApiOnboardingTags::Onboarding"
    )]
    async fn onboarding_account_type(
        &self,
        json: Json<AccountTypeRequest>,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> TransitionResponses {
        set_account_type(&state, auth.0.token, lang.0, json.account_type)
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/onboarding/language",
        method = "post",
        tag = "ApiOnboardingTags::Onboarding"
    )]
    async fn onboarding_language(
        &self,
        json: Json<LanguageRequest>,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> TransitionResponses {
        set_language(&state, auth.0.token, lang.0, json.language)
            .await
            .unwrap_or_else(Into::into)
    }
}

fn transition_error(err: OnboardingError, tr: &Translator, function: &str) -> ApiError {
    match err {
        OnboardingError::OutOfOrder(current) => {
            ApiError::conflict(tr.t("stepNotAvailable"), Some(current.route()))
        }
        OnboardingError::Persistence(err) => {
            ApiError::internal_localized(MODULE, function, "store transition", err, tr)
        }
    }
}

async fn get_state(
    state: &AppState,
    token: Option<String>,
    lang: Option<Language>,
) -> Result<OnboardingStateResponses, ApiError> {
    let function = "onboarding_state";
    let mut tx = begin(state, MODULE, function).await?;
    let caller = caller(state, &mut tx, token, lang, MODULE, function).await?;
    // keeps a repaired state tag
    commit(tx, MODULE, function).await?;

    let profile = &caller.progress.profile;
    Ok(OnboardingStateResponses::Ok(Json(OnboardingStateResponse {
        state: caller.progress.state.step(),
        redirect_to: caller.progress.state.route().to_string(),
        account_type: profile.account_type(),
        language: profile.language(),
        onboarding_completed: profile.onboarding_completed,
    })))
}

async fn set_account_type(
    state: &AppState,
    token: Option<String>,
    lang: Option<Language>,
    account_type: AccountType,
) -> Result<TransitionResponses, ApiError> {
    let function = "onboarding_account_type";
    let mut tx = begin(state, MODULE, function).await?;
    let caller = caller(state, &mut tx, token, lang, MODULE, function).await?;
    let now = Local::now().fixed_offset();
    let next = select_account_type(&mut tx, &caller.account.id, account_type, &now)
        .await
        .map_err(|err| transition_error(err, &caller.tr, function))?;
    commit(tx, MODULE, function).await?;
    Ok(TransitionResponses::Ok(Json(TransitionResponse::new(
        caller.tr.t("successfullySaved"),
        next,
    ))))
}

async fn set_language(
    state: &AppState,
    token: Option<String>,
    lang: Option<Language>,
    language: Language,
) -> Result<TransitionResponses, ApiError> {
    let function = "onboarding_language";
    let mut tx = begin(state, MODULE, function).await?;
    let caller = caller(state, &mut tx, token, lang, MODULE, function).await?;
    let now = Local::now().fixed_offset();
    let next = select_language(&mut tx, &caller.account.id, language, &now)
        .await
        .map_err(|err| transition_error(err, &caller.tr, function))?;
    commit(tx, MODULE, function).await?;
    // answered in the language just chosen
    let tr = Translator::new(language);
    Ok(TransitionResponses::Ok(Json(TransitionResponse::new(
        tr.t("successfullySaved"),
        next,
    ))))
}
