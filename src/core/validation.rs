use std::{collections::BTreeMap, str::FromStr};

use super::i18n::Translator;

/// Field name to translation key of the first failed rule for that field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, &'static str>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message_key: &'static str) {
        self.0.entry(field.to_string()).or_insert(message_key);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn localize(&self, tr: &Translator) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, key)| (field.clone(), tr.t(key)))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct ValidationError(pub FieldErrors);

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Collects field errors while converting raw form input into typed values.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message_key: &'static str) {
        self.errors.add(field, message_key);
    }

    /// Trimmed non-empty text, optionally capped at `max` characters.
    pub fn required(&mut self, field: &str, value: &str, max: Option<usize>) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "fieldRequired");
        } else if max.is_some_and(|max| char_count(value) > max) {
            self.add(field, "fieldTooLong");
        }
        value.to_string()
    }

    /// Trimmed text of at least `min` characters, reported with `message_key`.
    pub fn min_chars(
        &mut self,
        field: &str,
        value: &str,
        min: usize,
        message_key: &'static str,
    ) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, "fieldRequired");
        } else if char_count(value) < min {
            self.add(field, message_key);
        }
        value.to_string()
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if char_count(value.trim()) > max {
            self.add(field, "fieldTooLong");
        }
    }

    /// Blank input reads as absent.
    pub fn optional(&mut self, field: &str, value: Option<&str>, max: usize) -> Option<String> {
        let value = value.map(str::trim).filter(|x| !x.is_empty())?;
        if char_count(value) > max {
            self.add(field, "fieldTooLong");
        }
        Some(value.to_string())
    }

    pub fn choice<T: FromStr + Default>(&mut self, field: &str, value: Option<&str>) -> T {
        match value.map(str::trim).filter(|x| !x.is_empty()) {
            None => T::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                self.add(field, "invalidOption");
                T::default()
            }),
        }
    }

    /// Non-empty set of known values; duplicates collapse, order of first
    /// appearance is kept.
    pub fn at_least_one<T: FromStr + PartialEq>(
        &mut self,
        field: &str,
        values: &[String],
        empty_key: &'static str,
    ) -> Vec<T> {
        let mut result: Vec<T> = vec![];
        for raw in values.iter().map(|x| x.trim()).filter(|x| !x.is_empty()) {
            match raw.parse::<T>() {
                Ok(val) => {
                    if !result.contains(&val) {
                        result.push(val);
                    }
                }
                Err(_) => {
                    self.add(field, "invalidOption");
                    return result;
                }
            }
        }
        if result.is_empty() {
            self.add(field, empty_key);
        }
        result
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::enums::{ItemCategory, Language, PaymentMethod};

    use super::*;

    #[test]
    fn test_required_rules() {
        let mut v = Validator::new();
        assert_eq!(v.required("shop_name", "  Al-Amin  ", Some(100)), "Al-Amin");
        v.required("owner_name", "   ", Some(100));
        v.required("address", &"x".repeat(501), Some(500));
        assert_eq!(v.errors().get("shop_name"), None);
        assert_eq!(v.errors().get("owner_name"), Some("fieldRequired"));
        assert_eq!(v.errors().get("address"), Some("fieldTooLong"));
    }

    #[test]
    fn test_lengths_count_characters() {
        let mut v = Validator::new();
        // 100 Urdu characters is more than 100 bytes but within the limit
        v.required("shop_name", &"د".repeat(100), Some(100));
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_min_chars() {
        let mut v = Validator::new();
        v.min_chars("contact_number", "030012345", 10, "invalidContactNumber");
        v.min_chars("cnic_number", "12345-1234567-1", 13, "invalidCnic");
        assert_eq!(
            v.errors().get("contact_number"),
            Some("invalidContactNumber")
        );
        assert_eq!(v.errors().get("cnic_number"), None);
    }

    #[test]
    fn test_optional_blank_is_none() {
        let mut v = Validator::new();
        assert_eq!(v.optional("open_hours", Some("  "), 100), None);
        assert_eq!(v.optional("open_hours", None, 100), None);
        assert_eq!(
            v.optional("open_hours", Some("9am - 9pm"), 100),
            Some("9am - 9pm".to_string())
        );
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_at_least_one() {
        let mut v = Validator::new();
        let categories: Vec<ItemCategory> = v.at_least_one(
            "item_categories",
            &["surgical".to_string(), "surgical".to_string(), "net".to_string()],
            "selectCategory",
        );
        assert_eq!(categories, vec![ItemCategory::Surgical, ItemCategory::Net]);
        let payments: Vec<PaymentMethod> =
            v.at_least_one("payment_methods", &[], "selectPaymentMethod");
        assert!(payments.is_empty());
        assert_eq!(
            v.errors().get("payment_methods"),
            Some("selectPaymentMethod")
        );
        let mut v = Validator::new();
        let _: Vec<PaymentMethod> =
            v.at_least_one("payment_methods", &["cash".to_string()], "selectPaymentMethod");
        assert_eq!(v.errors().get("payment_methods"), Some("invalidOption"));
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("email", "fieldRequired");
        errors.add("email", "invalidEmail");
        assert_eq!(errors.get("email"), Some("fieldRequired"));
        let localized = errors.localize(&Translator::new(Language::English));
        assert_eq!(localized["email"], "This field is required");
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_finish() {
        let v = Validator::new();
        assert_eq!(v.finish(1).unwrap(), 1);
        let mut v = Validator::new();
        v.add("x", "fieldRequired");
        let err = v.finish(1).unwrap_err();
        assert_eq!(err.0.len(), 1);
    }
}
