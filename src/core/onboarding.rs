//! Onboarding sequencer.
//!
//! The state is always derived from the stored profile plus whether the
//! account's role-profile row exists. The `onboarding_state` column is a
//! mirror of the derived tag written alongside every transition; it is never
//! read back as the source of truth.

use std::fmt;

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::model::{
    enums::AccountType, medical_rep_profile, order_booker_profile, profile::Profile,
    supplier_profile, trader_profile,
};

use super::client_route;

/// Business-details form an account type has to fill in.
#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleForm {
    Trader,
    Supplier,
    MedicalRep,
    OrderBooker,
}

impl RoleForm {
    /// `None` for account types without a dedicated form; those skip
    /// straight to language selection.
    pub fn for_account_type(account_type: AccountType) -> Option<Self> {
        match account_type {
            AccountType::Trader => Some(RoleForm::Trader),
            AccountType::Supplier => Some(RoleForm::Supplier),
            AccountType::MedicalRepresentative | AccountType::MedicalRep => {
                Some(RoleForm::MedicalRep)
            }
            AccountType::OrderBooker => Some(RoleForm::OrderBooker),
            AccountType::MedicalStoreOwner => None,
        }
    }

    pub fn route(&self) -> &'static str {
        match self {
            RoleForm::Trader => client_route::TRADER_DETAILS,
            RoleForm::Supplier => client_route::SUPPLIER_DETAILS,
            RoleForm::MedicalRep => client_route::MEDICAL_REP_DETAILS,
            RoleForm::OrderBooker => client_route::ORDER_BOOKER_DETAILS,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            RoleForm::Trader => trader_profile::TABLE_NAME,
            RoleForm::Supplier => supplier_profile::TABLE_NAME,
            RoleForm::MedicalRep => medical_rep_profile::TABLE_NAME,
            RoleForm::OrderBooker => order_booker_profile::TABLE_NAME,
        }
    }

    pub fn title_key(&self) -> &'static str {
        match self {
            RoleForm::Trader => "traderDetails",
            RoleForm::Supplier => "supplierDetails",
            RoleForm::MedicalRep => "medicalRepDetails",
            RoleForm::OrderBooker => "orderBookerDetails",
        }
    }
}

/// Tag form of [`OnboardingState`], as exposed over the API and mirrored in
/// `profiles.onboarding_state`.
#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Unauthenticated,
    NeedsAccountType,
    NeedsRoleProfile,
    NeedsLanguage,
    Onboarded,
}

impl OnboardingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStep::Unauthenticated => "unauthenticated",
            OnboardingStep::NeedsAccountType => "needs_account_type",
            OnboardingStep::NeedsRoleProfile => "needs_role_profile",
            OnboardingStep::NeedsLanguage => "needs_language",
            OnboardingStep::Onboarded => "onboarded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    Unauthenticated,
    NeedsAccountType,
    NeedsRoleProfile(RoleForm),
    NeedsLanguage,
    Onboarded,
}

impl OnboardingState {
    pub fn step(&self) -> OnboardingStep {
        match self {
            OnboardingState::Unauthenticated => OnboardingStep::Unauthenticated,
            OnboardingState::NeedsAccountType => OnboardingStep::NeedsAccountType,
            OnboardingState::NeedsRoleProfile(_) => OnboardingStep::NeedsRoleProfile,
            OnboardingState::NeedsLanguage => OnboardingStep::NeedsLanguage,
            OnboardingState::Onboarded => OnboardingStep::Onboarded,
        }
    }

    /// Screen the client must show for this state.
    pub fn route(&self) -> &'static str {
        match self {
            OnboardingState::Unauthenticated => client_route::AUTH,
            OnboardingState::NeedsAccountType => client_route::ACCOUNT_TYPE,
            OnboardingState::NeedsRoleProfile(form) => form.route(),
            OnboardingState::NeedsLanguage => client_route::LANGUAGE_SELECTION,
            OnboardingState::Onboarded => client_route::HOME,
        }
    }

    pub fn is_onboarded(&self) -> bool {
        matches!(self, OnboardingState::Onboarded)
    }
}

impl fmt::Display for OnboardingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.step().as_str())
    }
}

/// State after a successful account type selection.
pub fn state_after_account_type(account_type: AccountType) -> OnboardingState {
    match RoleForm::for_account_type(account_type) {
        Some(form) => OnboardingState::NeedsRoleProfile(form),
        None => OnboardingState::NeedsLanguage,
    }
}

/// Derives the first incomplete onboarding state of an authenticated account.
///
/// `has_role_profile` tells whether a row exists in the role table matching
/// the profile's account type; it is ignored for account types without a form.
pub fn derive_state(profile: &Profile, has_role_profile: bool) -> OnboardingState {
    let account_type = match profile.account_type() {
        Some(val) => val,
        None => return OnboardingState::NeedsAccountType,
    };
    if let Some(form) = RoleForm::for_account_type(account_type) {
        if !has_role_profile {
            return OnboardingState::NeedsRoleProfile(form);
        }
    }
    if profile.language().is_none() || !profile.onboarding_completed {
        return OnboardingState::NeedsLanguage;
    }
    OnboardingState::Onboarded
}
