use std::{fmt, str::FromStr};

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Trader,
    Supplier,
    MedicalRepresentative,
    MedicalStoreOwner,
    OrderBooker,
    /// Legacy spelling of `medical_representative` still accepted by the schema.
    MedicalRep,
}

impl AccountType {
    pub const ALL: [AccountType; 6] = [
        AccountType::Trader,
        AccountType::Supplier,
        AccountType::MedicalRepresentative,
        AccountType::MedicalStoreOwner,
        AccountType::OrderBooker,
        AccountType::MedicalRep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Trader => "trader",
            AccountType::Supplier => "supplier",
            AccountType::MedicalRepresentative => "medical_representative",
            AccountType::MedicalStoreOwner => "medical_store_owner",
            AccountType::OrderBooker => "order_booker",
            AccountType::MedicalRep => "medical_rep",
        }
    }

    /// Translation key of the human label.
    pub fn label_key(&self) -> &'static str {
        match self {
            AccountType::Trader => "trader",
            AccountType::Supplier => "supplier",
            AccountType::MedicalRepresentative | AccountType::MedicalRep => {
                "medicalRepresentative"
            }
            AccountType::MedicalStoreOwner => "medicalStoreOwner",
            AccountType::OrderBooker => "orderBooker",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountType::ALL
            .into_iter()
            .find(|x| x.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("account_type", s))
    }
}

#[derive(Enum, Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Urdu,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Urdu => "urdu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Language::English),
            "urdu" => Ok(Language::Urdu),
            _ => Err(UnknownVariant::new("language", s)),
        }
    }
}

#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Multinational,
    Net,
    Surgical,
    Homeopathic,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Multinational => "multinational",
            ItemCategory::Net => "net",
            ItemCategory::Surgical => "surgical",
            ItemCategory::Homeopathic => "homeopathic",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multinational" => Ok(ItemCategory::Multinational),
            "net" => Ok(ItemCategory::Net),
            "surgical" => Ok(ItemCategory::Surgical),
            "homeopathic" => Ok(ItemCategory::Homeopathic),
            _ => Err(UnknownVariant::new("item_category", s)),
        }
    }
}

#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Easypaisa,
    Jazzcash,
    BankAccount,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Easypaisa => "easypaisa",
            PaymentMethod::Jazzcash => "jazzcash",
            PaymentMethod::BankAccount => "bank_account",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easypaisa" => Ok(PaymentMethod::Easypaisa),
            "jazzcash" => Ok(PaymentMethod::Jazzcash),
            // the supplier screen historically posted the camelCase label key
            "bank_account" | "bankAccount" => Ok(PaymentMethod::BankAccount),
            _ => Err(UnknownVariant::new("payment_method", s)),
        }
    }
}

#[derive(Enum, Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[oai(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    Active,
    Inactive,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Active => "active",
            AvailabilityStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for AvailabilityStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AvailabilityStatus::Active),
            "inactive" => Ok(AvailabilityStatus::Inactive),
            _ => Err(UnknownVariant::new("availability_status", s)),
        }
    }
}
