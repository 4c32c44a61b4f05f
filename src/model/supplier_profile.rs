use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.supplier_profiles";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct SupplierProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub item_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub license_picture_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}
