//! Common types used throughout xrpl-history
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Account that is shown to the user as a known-good example
pub const EXAMPLE_ACCOUNT: &str = "rLNaPoKeeBjZe2qs6x52yVPZpZ8td4dc6w";

// ============================================================================
// Page Size
// ============================================================================

/// Number of transactions requested per page
///
/// Only the values offered by the page-size selector are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Fifty,
    Hundred,
    HundredFifty,
    TwoHundred,
}

impl PageSize {
    /// All selectable page sizes, smallest first
    pub const ALL: [PageSize; 5] = [
        PageSize::Ten,
        PageSize::Fifty,
        PageSize::Hundred,
        PageSize::HundredFifty,
        PageSize::TwoHundred,
    ];

    /// The `limit` sent to the ledger
    pub const fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
            PageSize::HundredFifty => 150,
            PageSize::TwoHundred => 200,
        }
    }

    /// Human-readable list of the allowed values, e.g. for help text
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|size| size.get().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| {
                format!(
                    "page size must be one of {}, got {value}",
                    Self::allowed_values()
                )
            })
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a number"))?;
        Self::try_from(value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10, PageSize::Ten)]
    #[test_case(50, PageSize::Fifty)]
    #[test_case(100, PageSize::Hundred)]
    #[test_case(150, PageSize::HundredFifty)]
    #[test_case(200, PageSize::TwoHundred)]
    fn test_page_size_from_allowed_value(value: u32, expected: PageSize) {
        assert_eq!(PageSize::try_from(value).unwrap(), expected);
        assert_eq!(expected.get(), value);
    }

    #[test_case(0)]
    #[test_case(20)]
    #[test_case(1000)]
    fn test_page_size_rejects_other_values(value: u32) {
        let err = PageSize::try_from(value).unwrap_err();
        assert!(err.contains("10, 50, 100, 150, 200"));
    }

    #[test]
    fn test_page_size_default() {
        assert_eq!(PageSize::default(), PageSize::Ten);
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!(" 50 ".parse::<PageSize>().unwrap(), PageSize::Fifty);
        assert!("fifty".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_page_size_serde() {
        let size: PageSize = serde_json::from_str("150").unwrap();
        assert_eq!(size, PageSize::HundredFifty);
        assert_eq!(serde_json::to_string(&PageSize::Ten).unwrap(), "10");
        assert!(serde_json::from_str::<PageSize>("7").is_err());
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
