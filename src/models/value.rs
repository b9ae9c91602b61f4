//! Captured field values as reported to the host.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One decoded picture in a photo grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Grid slot this picture occupies (0-based, visual order)
    pub slot: usize,
    /// Source file the picture was loaded from
    pub path: PathBuf,
    /// Decoded pixel width
    pub width: u32,
    /// Decoded pixel height
    pub height: u32,
}

/// The normalized value of a field, shaped by its kind.
///
/// Created empty when a field becomes active, mutated on every edit, and
/// handed to the host on each change and on deactivation. Presenters never
/// keep a value past deactivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Raw text (name, username, email, code digits, phone, large text)
    Text(String),
    /// Selected calendar date
    Date(NaiveDate),
    /// Single-choice selection
    SingleSelect {
        /// Identifier of the chosen option
        id: String,
        /// Label of the chosen option
        label: String,
    },
    /// Multi-choice selection as an identifier → label map
    MultiSelect(BTreeMap<String, String>),
    /// One element of a range field's configured values
    Range(String),
    /// Slot-ordered decoded pictures
    Photos(Vec<Photo>),
}

impl FieldValue {
    /// Canonical textual form of the value, used in answer summaries.
    ///
    /// Dates render as ISO `YYYY-MM-DD`; selections render their labels;
    /// photos render as their source paths.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) | Self::Range(text) => text.clone(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::SingleSelect { label, .. } => label.clone(),
            Self::MultiSelect(map) => map.values().cloned().collect::<Vec<_>>().join(", "),
            Self::Photos(photos) => photos
                .iter()
                .map(|p| p.path.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Whether the value holds nothing the user entered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) | Self::Range(text) => text.is_empty(),
            Self::Date(_) | Self::SingleSelect { .. } => false,
            Self::MultiSelect(map) => map.is_empty(),
            Self::Photos(photos) => photos.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_canonical_text_is_iso() {
        let value = FieldValue::Date(NaiveDate::from_ymd_opt(2019, 12, 12).unwrap());
        assert_eq!(value.as_text(), "2019-12-12");
    }

    #[test]
    fn test_multi_select_text_joins_labels() {
        let mut map = BTreeMap::new();
        map.insert("rust".to_string(), "Rust".to_string());
        map.insert("go".to_string(), "Go".to_string());
        let value = FieldValue::MultiSelect(map);
        // BTreeMap iterates in key order
        assert_eq!(value.as_text(), "Go, Rust");
    }

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
        assert!(FieldValue::MultiSelect(BTreeMap::new()).is_empty());
        assert!(!FieldValue::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).is_empty());
    }
}
