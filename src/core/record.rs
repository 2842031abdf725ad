//! The inventory record and the intake form it is built from

use crate::core::category::ClothCategory;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

/// Characters left unescaped in a receipt path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One garment's intake entry
///
/// Records are immutable once appended. JSON field names are camelCase and
/// match the persisted slot format. Reading is lenient about numbers: older
/// slots stored every form field as a string, so `"15000"` and `15000` both
/// decode, and an empty optional price decodes as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub cloth_id: String,
    pub owner_name: String,
    pub owner_mobile: String,
    pub cloth_category: ClothCategory,
    /// Age in months
    #[serde(deserialize_with = "lenient::required")]
    pub cloth_age: u32,
    #[serde(deserialize_with = "lenient::required")]
    pub purchase_price: u64,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub rental_price: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub resale_price: Option<u64>,
    /// Localized display date, fixed at creation
    pub date: String,
    /// ISO-8601 creation instant
    pub created_at: String,
}

impl InventoryRecord {
    /// Address of this record's printable receipt
    pub fn receipt_path(&self) -> String {
        receipt_path(&self.cloth_id)
    }

    /// Case-insensitive substring match on owner name, cloth id and category
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.owner_name.to_lowercase().contains(needle)
            || self.cloth_id.to_lowercase().contains(needle)
            || self
                .cloth_category
                .as_str()
                .to_lowercase()
                .contains(needle)
    }
}

/// Receipt address for a cloth id, with the id percent-encoded
pub fn receipt_path(cloth_id: &str) -> String {
    format!("/receipt/{}", utf8_percent_encode(cloth_id, PATH_SEGMENT))
}

/// Intake form input
///
/// Carries the constraints the intake form enforces before submission:
/// a non-blank owner name, a ten-digit mobile number, one of the known
/// categories and non-negative whole numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IntakeForm {
    #[validate(custom(function = "not_blank"))]
    pub owner_name: String,

    #[validate(custom(function = "ten_digit_mobile"))]
    pub owner_mobile: String,

    #[validate(custom(function = "known_category"))]
    pub cloth_category: String,

    #[serde(deserialize_with = "lenient::whole_required")]
    pub cloth_age: u32,

    #[serde(deserialize_with = "lenient::whole_required")]
    pub purchase_price: u64,

    #[serde(default, deserialize_with = "lenient::whole_optional")]
    pub rental_price: Option<u64>,

    #[serde(default, deserialize_with = "lenient::whole_optional")]
    pub resale_price: Option<u64>,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", "is required"))
    } else {
        Ok(())
    }
}

fn ten_digit_mobile(value: &str) -> Result<(), ValidationError> {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = MOBILE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap());
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(invalid("mobile", "must be exactly 10 digits"))
    }
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    match value.parse::<ClothCategory>() {
        Ok(_) => Ok(()),
        Err(_) => Err(invalid(
            "category",
            "must be one of Evening Gown, Cocktail Dress, Formal Dress",
        )),
    }
}

/// Number decoding that tolerates the string-typed legacy format
///
/// Stored records truncate fractions the way the old string fields were
/// read. Intake input goes through the `whole_*` variants, which reject them.
mod lenient {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    /// 2^64, the first float above every `u64`
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

    fn from_float(f: f64, truncate: bool) -> Result<u64, String> {
        if !f.is_finite() || f < 0.0 {
            return Err(format!("expected a non-negative number, got {}", f));
        }
        if f >= U64_LIMIT {
            return Err(format!("number {} is out of range", f));
        }
        if !truncate && f.fract() != 0.0 {
            return Err(format!("expected a whole number, got {}", f));
        }
        Ok(f.trunc() as u64)
    }

    /// `None` for an empty string, otherwise a non-negative whole number
    fn decode(raw: Raw, truncate: bool) -> Result<Option<u64>, String> {
        match raw {
            Raw::Int(n) => Ok(Some(n)),
            Raw::Float(f) => from_float(f, truncate).map(Some),
            Raw::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                if let Ok(n) = s.parse::<u64>() {
                    return Ok(Some(n));
                }
                match s.parse::<f64>() {
                    Ok(f) => from_float(f, truncate).map(Some),
                    Err(_) => Err(format!("expected a non-negative number, got '{}'", s)),
                }
            }
        }
    }

    fn narrow<T: TryFrom<u64>>(n: u64) -> Result<T, String> {
        T::try_from(n).map_err(|_| format!("number {} is out of range", n))
    }

    fn decode_required<'de, D, T>(deserializer: D, truncate: bool) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let raw = Raw::deserialize(deserializer)?;
        match decode(raw, truncate).map_err(D::Error::custom)? {
            Some(n) => narrow(n).map_err(D::Error::custom),
            None => Err(D::Error::custom("a value is required")),
        }
    }

    fn decode_optional<'de, D, T>(deserializer: D, truncate: bool) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
            return Ok(None);
        };
        match decode(raw, truncate).map_err(D::Error::custom)? {
            Some(n) => narrow(n).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }

    pub fn required<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        decode_required(deserializer, true)
    }

    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        decode_optional(deserializer, true)
    }

    pub fn whole_required<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        decode_required(deserializer, false)
    }

    pub fn whole_optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        decode_optional(deserializer, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> IntakeForm {
        IntakeForm {
            owner_name: "Asha Rao".to_string(),
            owner_mobile: "9876543210".to_string(),
            cloth_category: "Evening Gown".to_string(),
            cloth_age: 6,
            purchase_price: 15000,
            rental_price: None,
            resale_price: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let mut f = form();
        f.owner_name = "   ".to_string();
        let errors = f.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_mobile_must_be_ten_digits() {
        for bad in ["987654321", "98765432101", "98765x3210", "+919876543"] {
            let mut f = form();
            f.owner_mobile = bad.to_string();
            assert!(f.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut f = form();
        f.cloth_category = "Lehenga".to_string();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_form_accepts_string_numbers() {
        let f: IntakeForm = serde_json::from_value(json!({
            "ownerName": "Asha Rao",
            "ownerMobile": "9876543210",
            "clothCategory": "Evening Gown",
            "clothAge": "6",
            "purchasePrice": "15000",
            "rentalPrice": "",
            "resalePrice": 9000
        }))
        .unwrap();
        assert_eq!(f.cloth_age, 6);
        assert_eq!(f.purchase_price, 15000);
        assert_eq!(f.rental_price, None);
        assert_eq!(f.resale_price, Some(9000));
    }

    #[test]
    fn test_form_rejects_negative_numbers() {
        let result = serde_json::from_value::<IntakeForm>(json!({
            "ownerName": "Asha Rao",
            "ownerMobile": "9876543210",
            "clothCategory": "Evening Gown",
            "clothAge": -1,
            "purchasePrice": 15000
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_form_rejects_fractional_numbers() {
        for price in [json!(15000.9), json!("15000.5")] {
            let result = serde_json::from_value::<IntakeForm>(json!({
                "ownerName": "Asha Rao",
                "ownerMobile": "9876543210",
                "clothCategory": "Evening Gown",
                "clothAge": 6,
                "purchasePrice": price
            }));
            assert!(result.is_err(), "{} should be rejected", price);
        }
    }

    #[test]
    fn test_form_accepts_whole_floats() {
        let f: IntakeForm = serde_json::from_value(json!({
            "ownerName": "Asha Rao",
            "ownerMobile": "9876543210",
            "clothCategory": "Evening Gown",
            "clothAge": 6.0,
            "purchasePrice": "15000.0"
        }))
        .unwrap();
        assert_eq!(f.cloth_age, 6);
        assert_eq!(f.purchase_price, 15000);
    }

    #[test]
    fn test_out_of_range_floats_are_rejected() {
        let result = serde_json::from_value::<IntakeForm>(json!({
            "ownerName": "Asha Rao",
            "ownerMobile": "9876543210",
            "clothCategory": "Evening Gown",
            "clothAge": 6,
            "purchasePrice": "1e30"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_record_truncates_fractions() {
        let record: InventoryRecord = serde_json::from_value(json!({
            "ownerName": "Meera",
            "ownerMobile": "9123456780",
            "clothCategory": "Formal Dress",
            "clothId": "LUX-FDR-1700000000000-123",
            "clothAge": "12",
            "purchasePrice": "8000.75",
            "date": "14 November 2023",
            "createdAt": "2023-11-14T22:13:20.000Z"
        }))
        .unwrap();
        assert_eq!(record.purchase_price, 8000);
    }

    #[test]
    fn test_legacy_record_decodes() {
        let record: InventoryRecord = serde_json::from_value(json!({
            "id": "LUX-FDR-1700000000000-123",
            "ownerName": "Meera",
            "ownerMobile": "9123456780",
            "clothCategory": "Formal Dress",
            "clothId": "LUX-FDR-1700000000000-123",
            "clothAge": "12",
            "purchasePrice": "8000",
            "rentalPrice": "1200",
            "resalePrice": "",
            "date": "14 November 2023",
            "createdAt": "2023-11-14T22:13:20.000Z"
        }))
        .unwrap();
        assert_eq!(record.cloth_age, 12);
        assert_eq!(record.rental_price, Some(1200));
        assert_eq!(record.resale_price, None);
    }

    #[test]
    fn test_absent_prices_are_not_serialized() {
        let record = InventoryRecord {
            cloth_id: "LUX-EVG-1-001".to_string(),
            owner_name: "Asha Rao".to_string(),
            owner_mobile: "9876543210".to_string(),
            cloth_category: ClothCategory::EveningGown,
            cloth_age: 6,
            purchase_price: 15000,
            rental_price: None,
            resale_price: None,
            date: "17 October 2026".to_string(),
            created_at: "2026-10-17T04:30:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("rentalPrice").is_none());
        assert_eq!(value["purchasePrice"], 15000);
        assert_eq!(value["clothCategory"], "Evening Gown");
    }

    #[test]
    fn test_receipt_path_encodes_id() {
        assert_eq!(
            receipt_path("LUX-EVG-1760000000000-042"),
            "/receipt/LUX-EVG-1760000000000-042"
        );
        assert_eq!(receipt_path("a b/c"), "/receipt/a%20b%2Fc");
    }
}
