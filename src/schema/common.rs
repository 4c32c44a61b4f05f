use std::collections::BTreeMap;

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::core::{client_route, i18n::Translator, validation::FieldErrors};

#[derive(Object, Deserialize, Serialize, Debug)]
pub struct BadRequestResponse {
    pub message: String,
}

/// Answer of the session gate for a missing or dead session.
#[derive(Object, Deserialize, Serialize, Debug)]
pub struct UnauthorizedResponse {
    pub message: String,
    pub redirect_to: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self::new(&Translator::default())
    }
}

impl UnauthorizedResponse {
    pub fn new(tr: &Translator) -> Self {
        Self {
            message: tr.t("sessionRequired"),
            redirect_to: client_route::AUTH.to_string(),
        }
    }
}

/// The request does not fit the current state; `redirect_to` is the screen
/// the client should show instead.
#[derive(Object, Deserialize, Serialize, Debug)]
pub struct ConflictResponse {
    pub message: String,
    pub redirect_to: Option<String>,
}

#[derive(Object, Deserialize, Serialize, Debug)]
pub struct RedirectResponse {
    pub redirect_to: String,
}

#[derive(Object, Deserialize, Serialize, Debug)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrorResponse {
    pub fn new(errors: &FieldErrors, tr: &Translator) -> Self {
        Self {
            message: tr.t("fixFormErrors"),
            errors: errors.localize(tr),
        }
    }
}

#[derive(Object, Deserialize, Serialize, Debug)]
pub struct InternalServerErrorResponse {
    pub message: String,
}

impl InternalServerErrorResponse {
    /// Logs the failing step; the client only gets a generic message.
    pub fn new(module: &str, function: &str, step: &str, err: &str) -> Self {
        tracing::error!("{}.{} failed to {}: {}", module, function, step, err);
        Self {
            message: "Internal Server Error".to_string(),
        }
    }

    pub fn localized(module: &str, function: &str, step: &str, err: &str, tr: &Translator) -> Self {
        let mut res = Self::new(module, function, step, err);
        res.message = tr.t("errorOccurred");
        res
    }
}

/// Failure of a request handler, convertible into every `*Responses` enum of
/// this crate through [`impl_api_error`](crate::impl_api_error).
#[derive(Debug)]
pub enum ApiError {
    BadRequest(BadRequestResponse),
    Unauthorized(UnauthorizedResponse),
    Conflict(ConflictResponse),
    UnprocessableEntity(ValidationErrorResponse),
    InternalServerError(InternalServerErrorResponse),
}

impl ApiError {
    pub fn internal(module: &str, function: &str, step: &str, err: impl ToString) -> Self {
        ApiError::InternalServerError(InternalServerErrorResponse::new(
            module,
            function,
            step,
            &err.to_string(),
        ))
    }

    pub fn internal_localized(
        module: &str,
        function: &str,
        step: &str,
        err: impl ToString,
        tr: &Translator,
    ) -> Self {
        ApiError::InternalServerError(InternalServerErrorResponse::localized(
            module,
            function,
            step,
            &err.to_string(),
            tr,
        ))
    }

    pub fn bad_request(message: String) -> Self {
        ApiError::BadRequest(BadRequestResponse { message })
    }

    pub fn unauthorized(tr: &Translator) -> Self {
        ApiError::Unauthorized(UnauthorizedResponse::new(tr))
    }

    pub fn conflict(message: String, redirect_to: Option<&str>) -> Self {
        ApiError::Conflict(ConflictResponse {
            message,
            redirect_to: redirect_to.map(|x| x.to_string()),
        })
    }

    pub fn validation(errors: &FieldErrors, tr: &Translator) -> Self {
        ApiError::UnprocessableEntity(ValidationErrorResponse::new(errors, tr))
    }
}

/// Implements `From<ApiError>` for response enums carrying the variants
/// `BadRequest`, `Unauthorized`, `Conflict`, `UnprocessableEntity` and
/// `InternalServerError`.
#[macro_export]
macro_rules! impl_api_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$crate::schema::common::ApiError> for $ty {
                fn from(err: $crate::schema::common::ApiError) -> Self {
                    use poem_openapi::payload::Json;
                    use $crate::schema::common::ApiError;
                    match err {
                        ApiError::BadRequest(x) => Self::BadRequest(Json(x)),
                        ApiError::Unauthorized(x) => Self::Unauthorized(Json(x)),
                        ApiError::Conflict(x) => Self::Conflict(Json(x)),
                        ApiError::UnprocessableEntity(x) => Self::UnprocessableEntity(Json(x)),
                        ApiError::InternalServerError(x) => Self::InternalServerError(Json(x)),
                    }
                }
            }
        )+
    };
}
