pub mod account;
pub mod profile;
pub mod role_profile;
