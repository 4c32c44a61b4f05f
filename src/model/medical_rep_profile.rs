use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

pub const TABLE_NAME: &str = "public.medical_rep_profiles";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct MedicalRepProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub company_name: String,
    pub contact_number: String,
    pub cnic_number: String,
    pub coverage_area: String,
    pub profile_picture_url: Option<String>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}
