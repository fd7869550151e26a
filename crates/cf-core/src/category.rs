//! Activity category enum as the single source of truth for category strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known activity categories.
///
/// Stored records keep the category as a plain string so that unknown values
/// survive a round-trip; this enum is what the calculator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Transport,
    Energy,
    Food,
    Shopping,
    Other,
}

impl Category {
    /// Every known category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Transport,
        Self::Energy,
        Self::Food,
        Self::Shopping,
        Self::Other,
    ];

    /// String representation used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Energy => "energy",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transport" => Ok(Self::Transport),
            "energy" => Ok(Self::Energy),
            "food" => Ok(Self::Food),
            "shopping" => Ok(Self::Shopping),
            "other" => Ok(Self::Other),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in &Category::ALL {
            let s = variant.to_string();
            let parsed: Category = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        let parsed: Category = " TransPort ".parse().expect("should parse");
        assert_eq!(parsed, Category::Transport);
    }

    #[test]
    fn unknown_category_errors() {
        let result: Result<Category, _> = "travel".parse();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown category: travel");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Shopping).unwrap();
        assert_eq!(json, r#""shopping""#);
        let parsed: Category = serde_json::from_str(r#""ENERGY""#).unwrap();
        assert_eq!(parsed, Category::Energy);
    }
}
