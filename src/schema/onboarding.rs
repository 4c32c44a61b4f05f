use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use crate::{
    core::onboarding::{OnboardingState, OnboardingStep},
    impl_api_error,
    model::enums::{AccountType, Language},
};

use super::common::{
    BadRequestResponse, ConflictResponse, InternalServerErrorResponse, UnauthorizedResponse,
    ValidationErrorResponse,
};

#[derive(Object, Deserialize)]
pub struct AccountTypeRequest {
    pub account_type: AccountType,
}

#[derive(Object, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Object, Deserialize)]
pub struct OnboardingStateResponse {
    pub state: OnboardingStep,
    pub redirect_to: String,
    pub account_type: Option<AccountType>,
    pub language: Option<Language>,
    pub onboarding_completed: bool,
}

#[derive(Object, Deserialize)]
pub struct TransitionResponse {
    pub message: String,
    pub state: OnboardingStep,
    pub redirect_to: String,
}

impl TransitionResponse {
    pub fn new(message: String, state: OnboardingState) -> Self {
        Self {
            message,
            state: state.step(),
            redirect_to: state.route().to_string(),
        }
    }
}

#[derive(Object, Deserialize)]
pub struct AccountTypeOption {
    pub id: AccountType,
    pub label: String,
}

#[derive(Object, Deserialize)]
pub struct AccountTypeOptionsResponse {
    pub title: String,
    pub options: Vec<AccountTypeOption>,
}

#[derive(ApiResponse)]
pub enum OnboardingStateResponses {
    #[oai(status = 200)]
    Ok(Json<OnboardingStateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 422)]
    UnprocessableEntity(Json<ValidationErrorResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum TransitionResponses {
    #[oai(status = 200)]
    Ok(Json<TransitionResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 409)]
    Conflict(Json<ConflictResponse>),

    #[oai(status = 422)]
    UnprocessableEntity(Json<ValidationErrorResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

impl_api_error!(OnboardingStateResponses, TransitionResponses);
