use std::collections::BTreeMap;

use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use crate::model::enums::Language;

#[derive(Object, Deserialize)]
pub struct TranslationTableResponse {
    pub language: Language,
    pub entries: BTreeMap<String, String>,
}

#[derive(Object, Deserialize)]
pub struct TranslationLookupResponse {
    pub language: Language,
    pub key: String,
    pub value: String,
    /// False when the key is unknown and `value` is the key itself.
    pub found: bool,
}

#[derive(ApiResponse)]
pub enum TranslationTableResponses {
    #[oai(status = 200)]
    Ok(Json<TranslationTableResponse>),
}

#[derive(ApiResponse)]
pub enum TranslationLookupResponses {
    #[oai(status = 200)]
    Ok(Json<TranslationLookupResponse>),
}
