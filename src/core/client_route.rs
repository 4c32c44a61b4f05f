//! Paths of the browser client screens that responses point at.

pub const INDEX: &str = "/";
pub const AUTH: &str = "/auth";
pub const ACCOUNT_TYPE: &str = "/account-type";
pub const TRADER_DETAILS: &str = "/trader-details";
pub const SUPPLIER_DETAILS: &str = "/supplier-details";
pub const MEDICAL_REP_DETAILS: &str = "/medical-rep-details";
pub const ORDER_BOOKER_DETAILS: &str = "/order-booker-details";
pub const LANGUAGE_SELECTION: &str = "/language-selection";
pub const DASHBOARD: &str = "/dashboard";
pub const HOME: &str = "/home";
pub const ABOUT: &str = "/about";
pub const COMMUNITY: &str = "/community";
pub const COMPLAINTS: &str = "/complaints";

pub fn contact(kind: &str) -> String {
    format!("/contact/{}", kind)
}
