pub mod client_route;
pub mod db;
pub mod error;
pub mod gate;
pub mod i18n;
pub mod onboarding;
pub mod security;
pub mod session;
pub mod sqlx_utils;
pub mod storage;
pub mod test_utils;
pub mod utils;
pub mod validation;
