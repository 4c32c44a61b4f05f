pub mod auth;
pub mod common;
pub mod home;
pub mod onboarding;
pub mod role_profile;
pub mod translation;
