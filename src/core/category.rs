//! Garment categories accepted at intake

use crate::core::error::InventoryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The three garment categories the boutique takes in
///
/// Serialized as the display name ("Evening Gown"), which is also the value
/// persisted in the inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClothCategory {
    EveningGown,
    CocktailDress,
    FormalDress,
}

impl ClothCategory {
    /// All categories, in the order they are offered on the intake form
    pub const ALL: [ClothCategory; 3] = [
        ClothCategory::EveningGown,
        ClothCategory::CocktailDress,
        ClothCategory::FormalDress,
    ];

    /// Display name, as entered on the form and stored in records
    pub fn as_str(&self) -> &'static str {
        match self {
            ClothCategory::EveningGown => "Evening Gown",
            ClothCategory::CocktailDress => "Cocktail Dress",
            ClothCategory::FormalDress => "Formal Dress",
        }
    }

    /// Fixed three-letter code embedded in cloth ids
    pub fn code(&self) -> &'static str {
        match self {
            ClothCategory::EveningGown => "EVG",
            ClothCategory::CocktailDress => "CDR",
            ClothCategory::FormalDress => "FDR",
        }
    }

    /// Reverse lookup from a three-letter code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for ClothCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothCategory {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InventoryError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for ClothCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClothCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClothCategory::EveningGown.code(), "EVG");
        assert_eq!(ClothCategory::CocktailDress.code(), "CDR");
        assert_eq!(ClothCategory::FormalDress.code(), "FDR");
    }

    #[test]
    fn test_parse_known_names() {
        assert_eq!(
            "Cocktail Dress".parse::<ClothCategory>().unwrap(),
            ClothCategory::CocktailDress
        );
        assert_eq!(ClothCategory::from_code("FDR"), Some(ClothCategory::FormalDress));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!(matches!(
            "evening gown".parse::<ClothCategory>(),
            Err(InventoryError::UnknownCategory(_))
        ));
        assert!("".parse::<ClothCategory>().is_err());
        assert_eq!(ClothCategory::from_code("undefined"), None);
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&ClothCategory::EveningGown).unwrap();
        assert_eq!(json, "\"Evening Gown\"");

        let err = serde_json::from_str::<ClothCategory>("\"Kurta\"").unwrap_err();
        assert!(err.to_string().contains("Unknown cloth category 'Kurta'"));
    }
}
