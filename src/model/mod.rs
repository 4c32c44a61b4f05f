pub mod account;
pub mod enums;
pub mod medical_rep_profile;
pub mod order_booker_profile;
pub mod profile;
pub mod supplier_profile;
pub mod trader_profile;
