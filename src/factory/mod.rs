pub mod account;
pub mod trader_profile;
