use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use crate::{
    impl_api_error,
    model::enums::{AccountType, Language},
};

use super::common::{
    BadRequestResponse, ConflictResponse, InternalServerErrorResponse, RedirectResponse,
    UnauthorizedResponse, ValidationErrorResponse,
};

#[derive(Object, Deserialize, Debug, Clone)]
pub struct LinkItem {
    pub label: String,
    pub href: String,
}

#[derive(Object, Deserialize)]
pub struct ShellResponse {
    pub title: String,
    pub subtitle: String,
    pub search_placeholder: String,
    pub menu: Vec<LinkItem>,
    pub quick_contacts_title: String,
    pub quick_contacts: Vec<LinkItem>,
    pub language: Language,
}

#[derive(Object, Deserialize)]
pub struct PageResponse {
    pub title: String,
    pub body: String,
    pub language: Language,
}

#[derive(Object, Deserialize)]
pub struct DashboardResponse {
    pub greeting: String,
    pub message: String,
    pub email: String,
    pub username: Option<String>,
    pub account_type: Option<AccountType>,
    pub account_type_label: Option<String>,
    pub language: Language,
}

#[derive(ApiResponse)]
pub enum ShellResponses {
    #[oai(status = 200)]
    Ok(Json<ShellResponse>),
}

#[derive(ApiResponse)]
pub enum PageResponses {
    #[oai(status = 200)]
    Ok(Json<PageResponse>),
}

#[derive(ApiResponse)]
pub enum DashboardResponses {
    #[oai(status = 200)]
    Ok(Json<DashboardResponse>),

    /// Onboarding is not finished; `Location` names the next step.
    #[oai(status = 303)]
    SeeOther(Json<RedirectResponse>, #[oai(header = "Location")] String),

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

impl_api_error!(DashboardResponses);
