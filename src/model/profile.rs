use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use super::enums::{AccountType, Language};

pub const TABLE_NAME: &str = "public.profiles";

/// Per-account onboarding progress and preferences. `id` equals the account id.
#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub account_type: Option<String>,
    pub language: Option<String>,
    pub onboarding_completed: bool,
    pub onboarding_state: String,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
}

impl Profile {
    /// Unknown stored values read as unset so the sequencer sends the user
    /// back to the matching selection screen.
    pub fn account_type(&self) -> Option<AccountType> {
        self.account_type.as_deref().and_then(|x| x.parse().ok())
    }

    pub fn language(&self) -> Option<Language> {
        self.language.as_deref().and_then(|x| x.parse().ok())
    }

    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}
