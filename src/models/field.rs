//! Field configuration types: the closed set of field kinds and the
//! per-field value object the host builds once and never mutates.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CODE_LENGTH;

/// One selectable option in a `Select` field: a stable identifier plus the
/// label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable identifier reported to the host
    pub id: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Creates an option from an (identifier, label) pair.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Parameters for a `VerificationCode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFieldConfig {
    /// Number of digits the code consists of
    #[serde(default = "default_code_length")]
    pub length: usize,
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

impl Default for CodeFieldConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Parameters for a `Date` field.
///
/// Dates in TOML definitions are quoted ISO strings (e.g. `"1995-06-15"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateFieldConfig {
    /// Earliest selectable date (inclusive)
    #[serde(default)]
    pub min: Option<NaiveDate>,
    /// Latest selectable date (inclusive)
    #[serde(default)]
    pub max: Option<NaiveDate>,
    /// Date shown before the user touches the picker
    #[serde(default)]
    pub default: Option<NaiveDate>,
}

/// Parameters for a `Select` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectFieldConfig {
    /// Ordered list of selectable options
    pub options: Vec<SelectOption>,
    /// Whether more than one option may be checked at once
    #[serde(default)]
    pub multiple: bool,
    /// Minimum number of selections (multi-select only)
    #[serde(default)]
    pub min_selection: Option<usize>,
    /// Maximum number of selections (multi-select only)
    #[serde(default)]
    pub max_selection: Option<usize>,
}

/// Parameters for a `Range` field: the ordered list of values the wheel
/// picker spins over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFieldConfig {
    /// Ordered selectable values
    pub values: Vec<String>,
}

impl RangeFieldConfig {
    /// Index of the value preselected on first render (middle of the list).
    #[must_use]
    pub fn default_index(&self) -> usize {
        self.values.len() / 2
    }
}

/// Parameters for a `PhotoSelect` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFieldConfig {
    /// Number of grid slots available for pictures
    #[serde(default = "default_photo_slots")]
    pub slots: usize,
}

fn default_photo_slots() -> usize {
    4
}

impl Default for PhotoFieldConfig {
    fn default() -> Self {
        Self {
            slots: default_photo_slots(),
        }
    }
}

/// The closed set of field kinds.
///
/// Each variant carries only the parameters that kind needs; kinds without
/// parameters are unit variants. The set is deliberately closed; widgets
/// and validation switch over it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form name entry (any non-empty text)
    Name,
    /// Handle entry restricted to `[a-z0-9_]{3,32}`
    Username,
    /// Email address entry
    Email,
    /// Fixed-length numeric code entry
    VerificationCode(CodeFieldConfig),
    /// Calendar date wheel
    Date(DateFieldConfig),
    /// Phone number with country prefix
    Phone,
    /// Single- or multiple-choice option list
    Select(SelectFieldConfig),
    /// Multi-line free text
    LargeText,
    /// Wheel picker over a fixed list of values
    Range(RangeFieldConfig),
    /// Picture grid filled from an external picker
    PhotoSelect(PhotoFieldConfig),
}

impl FieldKind {
    /// Short lowercase name used in messages and answer summaries.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::VerificationCode(_) => "verification_code",
            Self::Date(_) => "date",
            Self::Phone => "phone",
            Self::Select(_) => "select",
            Self::LargeText => "large_text",
            Self::Range(_) => "range",
            Self::PhotoSelect(_) => "photo_select",
        }
    }

    /// Whether this kind captures keystrokes into a text buffer.
    #[must_use]
    pub const fn is_text_entry(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Username | Self::Email | Self::Phone | Self::LargeText
        )
    }
}

/// Immutable description of one form field.
///
/// Constructed once per field by the host and never mutated afterwards.
/// `key` is the stable token the host stores the field's value under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Unique, stable lookup key for the captured value
    pub key: String,
    /// Which widget and validation rule apply
    pub kind: FieldKind,
    /// Prompt shown above the input
    pub title: String,
    /// Hint text shown while the input is empty
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FieldConfig {
    /// Creates a field configuration.
    pub fn new(key: impl Into<String>, kind: FieldKind, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            title: title.into(),
            placeholder: None,
        }
    }

    /// Sets the placeholder hint.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Validates the configuration.
    ///
    /// Fails fast on kind-required payload that is missing or incoherent;
    /// a field that fails here must never reach a presenter.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            anyhow::bail!("Field key cannot be empty");
        }
        if self.title.trim().is_empty() {
            anyhow::bail!("Field '{}' has an empty title", self.key);
        }

        match &self.kind {
            FieldKind::VerificationCode(code) => {
                if code.length == 0 {
                    anyhow::bail!("Field '{}': code length must be at least 1", self.key);
                }
            }
            FieldKind::Date(date) => {
                if let (Some(min), Some(max)) = (date.min, date.max) {
                    if min > max {
                        anyhow::bail!(
                            "Field '{}': min date {} is after max date {}",
                            self.key,
                            min,
                            max
                        );
                    }
                }
                if let Some(default) = date.default {
                    if date.min.is_some_and(|min| default < min)
                        || date.max.is_some_and(|max| default > max)
                    {
                        anyhow::bail!(
                            "Field '{}': default date {} is outside the configured bounds",
                            self.key,
                            default
                        );
                    }
                }
            }
            FieldKind::Select(select) => {
                if select.options.is_empty() {
                    anyhow::bail!(
                        "Field '{}': select requires a non-empty options list",
                        self.key
                    );
                }
                if select.options.iter().any(|o| o.id.trim().is_empty()) {
                    anyhow::bail!(
                        "Field '{}': select options need non-empty identifiers",
                        self.key
                    );
                }
                if let (Some(min), Some(max)) = (select.min_selection, select.max_selection) {
                    if min > max {
                        anyhow::bail!(
                            "Field '{}': min_selection {} exceeds max_selection {}",
                            self.key,
                            min,
                            max
                        );
                    }
                }
                if select
                    .max_selection
                    .is_some_and(|max| max > select.options.len())
                {
                    anyhow::bail!(
                        "Field '{}': max_selection exceeds the number of options",
                        self.key
                    );
                }
            }
            FieldKind::Range(range) => {
                if range.values.is_empty() {
                    anyhow::bail!(
                        "Field '{}': range requires a non-empty values list",
                        self.key
                    );
                }
            }
            FieldKind::PhotoSelect(photos) => {
                if photos.slots == 0 {
                    anyhow::bail!("Field '{}': photo grid needs at least one slot", self.key);
                }
            }
            FieldKind::Name
            | FieldKind::Username
            | FieldKind::Email
            | FieldKind::Phone
            | FieldKind::LargeText => {}
        }

        Ok(())
    }

    /// Verification code parameters, `None` for any other kind.
    #[must_use]
    pub const fn code_config(&self) -> Option<&CodeFieldConfig> {
        match &self.kind {
            FieldKind::VerificationCode(code) => Some(code),
            _ => None,
        }
    }

    /// Date picker parameters, `None` for any other kind.
    #[must_use]
    pub const fn date_config(&self) -> Option<&DateFieldConfig> {
        match &self.kind {
            FieldKind::Date(date) => Some(date),
            _ => None,
        }
    }

    /// Select list parameters, `None` for any other kind.
    #[must_use]
    pub const fn select_config(&self) -> Option<&SelectFieldConfig> {
        match &self.kind {
            FieldKind::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Range picker parameters, `None` for any other kind.
    #[must_use]
    pub const fn range_config(&self) -> Option<&RangeFieldConfig> {
        match &self.kind {
            FieldKind::Range(range) => Some(range),
            _ => None,
        }
    }

    /// Photo grid parameters, `None` for any other kind.
    #[must_use]
    pub const fn photo_config(&self) -> Option<&PhotoFieldConfig> {
        match &self.kind {
            FieldKind::PhotoSelect(photos) => Some(photos),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_config_builder() {
        let field = FieldConfig::new("email", FieldKind::Email, "What's your email?")
            .with_placeholder("you@example.com");
        assert_eq!(field.key, "email");
        assert_eq!(field.placeholder.as_deref(), Some("you@example.com"));
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_empty_key_rejected() {
        let field = FieldConfig::new("", FieldKind::Name, "Name?");
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_select_without_options_rejected() {
        let field = FieldConfig::new(
            "pick",
            FieldKind::Select(SelectFieldConfig {
                options: Vec::new(),
                multiple: false,
                min_selection: None,
                max_selection: None,
            }),
            "Pick one",
        );
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_select_min_max_coherence() {
        let field = FieldConfig::new(
            "pick",
            FieldKind::Select(SelectFieldConfig {
                options: vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")],
                multiple: true,
                min_selection: Some(2),
                max_selection: Some(1),
            }),
            "Pick some",
        );
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_date_bounds_ordering() {
        let field = FieldConfig::new(
            "birthday",
            FieldKind::Date(DateFieldConfig {
                min: NaiveDate::from_ymd_opt(2000, 1, 1),
                max: NaiveDate::from_ymd_opt(1990, 1, 1),
                default: None,
            }),
            "Birthday?",
        );
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_default_date_within_bounds() {
        let field = FieldConfig::new(
            "birthday",
            FieldKind::Date(DateFieldConfig {
                min: NaiveDate::from_ymd_opt(1990, 1, 1),
                max: NaiveDate::from_ymd_opt(2000, 1, 1),
                default: NaiveDate::from_ymd_opt(2005, 6, 15),
            }),
            "Birthday?",
        );
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_zero_length_code_rejected() {
        let field = FieldConfig::new(
            "code",
            FieldKind::VerificationCode(CodeFieldConfig { length: 0 }),
            "Code?",
        );
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_range_default_index_is_middle() {
        let range = RangeFieldConfig {
            values: vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
        };
        assert_eq!(range.default_index(), 2);
    }

    #[test]
    fn test_kind_accessors_wrong_kind() {
        let field = FieldConfig::new("name", FieldKind::Name, "Name?");
        assert!(field.select_config().is_none());
        assert!(field.date_config().is_none());
        assert!(field.range_config().is_none());
        assert!(field.code_config().is_none());
        assert!(field.photo_config().is_none());
    }
}
