use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::Deserialize;

use crate::{
    core::{
        onboarding::OnboardingStep,
        validation::{is_valid_email, ValidationError, Validator},
    },
    impl_api_error,
};

use super::common::{
    BadRequestResponse, ConflictResponse, InternalServerErrorResponse, UnauthorizedResponse,
    ValidationErrorResponse,
};

#[derive(Object, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug)]
pub struct SignUpData {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<SignUpData, ValidationError> {
        let mut v = Validator::new();
        let email = v.required("email", &self.email, Some(255)).to_lowercase();
        if !email.is_empty() && !is_valid_email(&email) {
            v.add("email", "invalidEmail");
        }
        let username = v.min_chars("username", &self.username, 3, "usernameLength");
        v.max_chars("username", &username, 50);
        // passwords are taken verbatim, whitespace included
        if self.password.chars().count() < 6 {
            v.add("password", "passwordLength");
        } else if self.password.chars().count() > 100 {
            v.add("password", "fieldTooLong");
        }
        if self.password != self.confirm_password {
            v.add("confirm_password", "passwordsDontMatch");
        }
        v.finish(SignUpData {
            email,
            username,
            password: self.password.clone(),
        })
    }
}

#[derive(Object, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let mut v = Validator::new();
        let email = v.required("email", &self.email, Some(255)).to_lowercase();
        if self.password.is_empty() {
            v.add("password", "fieldRequired");
        }
        v.finish((email, self.password.clone()))
    }
}

#[derive(Object, Deserialize)]
pub struct TokenResponse {
    pub exp: String,
    pub exp_in: i32,
    pub exp_refresh_token: String,
    pub refresh_token: String,
    pub token: String,
    pub token_type: String,
    pub message: String,
    pub state: OnboardingStep,
    pub redirect_to: String,
}

#[derive(ApiResponse)]
pub enum SignUpResponses {
    #[oai(status = 201)]
    Created(Json<TokenResponse>),

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
pub enum SignInResponses {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

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

#[derive(Object, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(ApiResponse)]
pub enum RefreshTokenResponses {
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

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
pub enum SignOutResponses {
    #[oai(status = 204)]
    NoContent,

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

impl_api_error!(
    SignUpResponses,
    SignInResponses,
    RefreshTokenResponses,
    SignOutResponses
);

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str, username: &str, password: &str, confirm: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_sign_up_valid() {
        let data = sign_up(" A@B.com ", " ali ", "secret1", "secret1")
            .validate()
            .unwrap();
        assert_eq!(data.email, "a@b.com");
        assert_eq!(data.username, "ali");
        assert_eq!(data.password, "secret1");
    }

    #[test]
    fn test_sign_up_field_errors() {
        let err = sign_up("not-an-email", "al", "12345", "54321")
            .validate()
            .unwrap_err();
        assert_eq!(err.0.get("email"), Some("invalidEmail"));
        assert_eq!(err.0.get("username"), Some("usernameLength"));
        assert_eq!(err.0.get("password"), Some("passwordLength"));
        assert_eq!(err.0.get("confirm_password"), Some("passwordsDontMatch"));
    }

    #[test]
    fn test_sign_up_username_too_long() {
        let err = sign_up("a@b.com", &"x".repeat(51), "secret1", "secret1")
            .validate()
            .unwrap_err();
        assert_eq!(err.0.get("username"), Some("fieldTooLong"));
        assert_eq!(err.0.len(), 1);
    }

    #[test]
    fn test_sign_in_requires_fields() {
        let err = SignInRequest {
            email: " ".to_string(),
            password: "".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.0.get("email"), Some("fieldRequired"));
        assert_eq!(err.0.get("password"), Some("fieldRequired"));
    }
}
