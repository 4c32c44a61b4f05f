pub mod onboarding;
pub mod role_profile;
