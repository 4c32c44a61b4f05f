use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.trader_profiles";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct TraderProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub shop_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub availability_status: String,
    pub open_hours: Option<String>,
    pub item_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub license_picture_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}
