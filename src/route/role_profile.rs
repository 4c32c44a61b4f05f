use std::sync::Arc;

use chrono::Local;
use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::{
    core::{
        error::SubmitError, i18n::Translator, onboarding::OnboardingState,
        security::BearerAuthorization, validation::ValidationError,
    },
    model::enums::Language,
    schema::{
        common::{ApiError, InternalServerErrorResponse},
        role_profile::{
            MedicalRepForm, OrderBookerForm, RoleProfileCreatedResponse, RoleProfileResponses,
            SupplierForm, TraderForm,
        },
    },
    service::role_profile::{submit_role_profile, RoleProfileDraft},
    AppState,
};

use super::{begin, caller};

const MODULE: &str = "route.role_profile";

#[derive(Tags)]
enum ApiRoleProfileTags {
    RoleProfile,
}

pub struct ApiRoleProfile;

#[OpenApi]
impl ApiRoleProfile {
    #[oai(
        path = "/role-profile/trader",
        method = "post",
        tag = "ApiRoleProfileTags::RoleProfile"
    )]
    async fn role_profile_trader(
        &self,
        form: TraderForm,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> RoleProfileResponses {
        let draft = form.into_draft(state.config.max_upload_size).await;
        submit(&state, auth.0.token, lang.0, draft, "role_profile_trader")
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/role-profile/supplier",
        method = "post",
        tag = "ApiRoleProfileTags::RoleProfile"
    )]
    async fn role_profile_supplier(
        &self,
        form: SupplierForm,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> RoleProfileResponses {
        let draft = form.into_draft(state.config.max_upload_size).await;
        submit(&state, auth.0.token, lang.0, draft, "role_profile_supplier")
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/role-profile/medical-rep",
        method = "post",
        tag = "ApiRoleProfileTags::RoleProfile"
    )]
    async fn role_profile_medical_rep(
        &self,
        form: MedicalRepForm,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> RoleProfileResponses {
        let draft = form.into_draft(state.config.max_upload_size).await;
        submit(&state, auth.0.token, lang.0, draft, "role_profile_medical_rep")
            .await
            .unwrap_or_else(Into::into)
    }

    #[oai(
        path = "/role-profile/order-booker",
        method = "post",
        tag = "ApiRoleProfileTags::RoleProfile"
    )]
    async fn role_profile_order_booker(
        &self,
        form: OrderBookerForm,
        state: Data<&Arc<AppState>>,
        lang: Query<Option<Language>>,
        auth: BearerAuthorization,
    ) -> RoleProfileResponses {
        let draft = form.into_draft(state.config.max_upload_size).await;
        submit(&state, auth.0.token, lang.0, draft, "role_profile_order_booker")
            .await
            .unwrap_or_else(Into::into)
    }
}

fn internal(function: &str, step: &str, err: &str, message: String) -> ApiError {
    let mut res = InternalServerErrorResponse::new(MODULE, function, step, err);
    res.message = message;
    ApiError::InternalServerError(res)
}

fn submit_error(err: SubmitError, tr: &Translator, function: &str) -> ApiError {
    match err {
        SubmitError::Validation(err) => ApiError::validation(&err.0, tr),
        SubmitError::OutOfOrder(current) => {
            ApiError::conflict(tr.t("stepNotAvailable"), Some(current.route()))
        }
        SubmitError::AlreadySubmitted => ApiError::conflict(
            tr.t("profileAlreadyExists"),
            Some(OnboardingState::NeedsLanguage.route()),
        ),
        SubmitError::Storage(err) => internal(
            function,
            "upload picture",
            &err.to_string(),
            tr.t("uploadFailed"),
        ),
        SubmitError::Persistence(err) => internal(
            function,
            "store role profile",
            &err.to_string(),
            tr.t("failedToCreateProfile"),
        ),
    }
}

async fn submit(
    state: &AppState,
    token: Option<String>,
    lang: Option<Language>,
    draft: Result<RoleProfileDraft, ValidationError>,
    function: &str,
) -> Result<RoleProfileResponses, ApiError> {
    let mut tx = begin(state, MODULE, function).await?;
    let caller = caller(state, &mut tx, token, lang, MODULE, function).await?;
    let draft = draft.map_err(|err| ApiError::validation(&err.0, &caller.tr))?;

    let now = Local::now().fixed_offset();
    let id = submit_role_profile(tx, state.blob_store.as_ref(), &caller.account.id, draft, &now)
        .await
        .map_err(|err| submit_error(err, &caller.tr, function))?;
    let next = OnboardingState::NeedsLanguage;
    Ok(RoleProfileResponses::Created(Json(
        RoleProfileCreatedResponse {
            id: id.to_string(),
            message: caller.tr.t("profileCreated"),
            state: next.step(),
            redirect_to: next.route().to_string(),
        },
    )))
}
