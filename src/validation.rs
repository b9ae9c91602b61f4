//! Per-kind readiness rules.
//!
//! `Rules` holds the compiled patterns and maps a field's current raw input
//! to a readiness flag plus the normalized value reported to the host.
//! Validation failures are not errors: `ready = false` is the expected
//! steady state while the user types.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::constants::PHONE_MIN_DIGITS;
use crate::models::{Country, FieldConfig, FieldKind, FieldValue, Photo, SelectOption};

/// Username pattern: lowercase letters, digits, underscore, 3–32 chars.
/// Input is matched as-is; uppercase is rejected, not folded.
const USERNAME_PATTERN: &str = "^[a-z0-9_]{3,32}$";

/// Permissive email pattern: local part, domain, 2–64 letter final label.
const EMAIL_PATTERN: &str = r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$";

/// Snapshot of a presenter's raw input state, shaped by the field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput<'a> {
    /// Text buffer contents (name, username, email, large text)
    Text(&'a str),
    /// Digits entered into a verification code widget
    Code(&'a str),
    /// Currently selected date
    Date(NaiveDate),
    /// Phone country plus locally entered digits
    Phone {
        /// Selected country (provides the calling code)
        country: &'a Country,
        /// Locally entered digits, without the prefix
        digits: &'a str,
    },
    /// Single-choice selection, if any
    SingleSelect(Option<&'a SelectOption>),
    /// Accumulated multi-choice selection
    MultiSelect(&'a BTreeMap<String, String>),
    /// Currently picked range value, if any
    Range(Option<&'a str>),
    /// Decoded pictures, slot-ordered
    Photos(&'a [Photo]),
}

/// Result of evaluating a field's input: the readiness gate plus the
/// normalized value pushed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Whether the host may advance past this field
    pub ready: bool,
    /// Normalized value for the host's store
    pub value: FieldValue,
}

/// Compiled validation rules, built once at startup and injected wherever
/// readiness is computed.
#[derive(Debug, Clone)]
pub struct Rules {
    username: Regex,
    email: Regex,
}

impl Rules {
    /// Compiles the validation patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            username: Regex::new(USERNAME_PATTERN)
                .context("Failed to compile username pattern")?,
            email: Regex::new(EMAIL_PATTERN).context("Failed to compile email pattern")?,
        })
    }

    /// Evaluates a field's raw input against its kind's rule.
    ///
    /// Pure: same config and input always produce the same evaluation.
    /// A kind/input mismatch (a programming error in the presenter) is
    /// treated as not ready with an empty text value.
    #[must_use]
    pub fn evaluate(&self, config: &FieldConfig, input: &FieldInput<'_>) -> Evaluation {
        match (&config.kind, input) {
            (FieldKind::Name | FieldKind::LargeText, FieldInput::Text(text)) => Evaluation {
                ready: !text.is_empty(),
                value: FieldValue::Text((*text).to_string()),
            },
            (FieldKind::Username, FieldInput::Text(text)) => Evaluation {
                ready: self.username.is_match(text),
                value: FieldValue::Text((*text).to_string()),
            },
            (FieldKind::Email, FieldInput::Text(text)) => Evaluation {
                ready: self.email.is_match(text),
                value: FieldValue::Text((*text).to_string()),
            },
            (FieldKind::VerificationCode(code), FieldInput::Code(digits)) => Evaluation {
                ready: digits.chars().count() == code.length,
                value: FieldValue::Text((*digits).to_string()),
            },
            // A date picker always carries a selection, so the field is
            // ready from first render
            (FieldKind::Date(_), FieldInput::Date(date)) => Evaluation {
                ready: true,
                value: FieldValue::Date(*date),
            },
            (FieldKind::Phone, FieldInput::Phone { country, digits }) => Evaluation {
                ready: digits.chars().count() > PHONE_MIN_DIGITS,
                value: FieldValue::Text(format!("+{}{}", country.calling_code, digits)),
            },
            (FieldKind::Select(select), FieldInput::SingleSelect(selection)) if !select.multiple => {
                match selection {
                    Some(option) => Evaluation {
                        ready: true,
                        value: FieldValue::SingleSelect {
                            id: option.id.clone(),
                            label: option.label.clone(),
                        },
                    },
                    None => Evaluation {
                        ready: false,
                        value: FieldValue::Text(String::new()),
                    },
                }
            }
            (FieldKind::Select(select), FieldInput::MultiSelect(map)) if select.multiple => {
                Evaluation {
                    ready: !map.is_empty(),
                    value: FieldValue::MultiSelect((*map).clone()),
                }
            }
            (FieldKind::Range(_), FieldInput::Range(selection)) => match selection {
                Some(value) => Evaluation {
                    ready: true,
                    value: FieldValue::Range((*value).to_string()),
                },
                None => Evaluation {
                    ready: false,
                    value: FieldValue::Text(String::new()),
                },
            },
            (FieldKind::PhotoSelect(_), FieldInput::Photos(photos)) => Evaluation {
                ready: !photos.is_empty(),
                value: FieldValue::Photos(photos.to_vec()),
            },
            _ => Evaluation {
                ready: false,
                value: FieldValue::Text(String::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{by_iso, CodeFieldConfig, DateFieldConfig, SelectFieldConfig};

    fn rules() -> Rules {
        Rules::new().unwrap()
    }

    fn text_eval(kind: FieldKind, text: &str) -> Evaluation {
        let config = FieldConfig::new("f", kind, "?");
        rules().evaluate(&config, &FieldInput::Text(text))
    }

    #[test]
    fn test_name_ready_iff_non_empty() {
        assert!(!text_eval(FieldKind::Name, "").ready);
        assert!(text_eval(FieldKind::Name, "J").ready);
    }

    #[test]
    fn test_username_pattern() {
        assert!(!text_eval(FieldKind::Username, "ab").ready);
        assert!(text_eval(FieldKind::Username, "abc").ready);
        assert!(!text_eval(FieldKind::Username, "ABC").ready);
        assert!(text_eval(FieldKind::Username, "user_42").ready);
        assert!(!text_eval(FieldKind::Username, "user-42").ready);
        // 33 chars is one past the limit
        let long = "a".repeat(33);
        assert!(!text_eval(FieldKind::Username, &long).ready);
        let max = "a".repeat(32);
        assert!(text_eval(FieldKind::Username, &max).ready);
    }

    #[test]
    fn test_email_pattern() {
        assert!(text_eval(FieldKind::Email, "a@b.co").ready);
        assert!(!text_eval(FieldKind::Email, "a@b").ready);
        assert!(text_eval(FieldKind::Email, "a.b+c@sub.domain.io").ready);
        assert!(!text_eval(FieldKind::Email, "not an email").ready);
    }

    #[test]
    fn test_verification_code_length_gate() {
        let config = FieldConfig::new(
            "code",
            FieldKind::VerificationCode(CodeFieldConfig { length: 6 }),
            "?",
        );
        let r = rules();
        assert!(!r.evaluate(&config, &FieldInput::Code("12345")).ready);
        let eval = r.evaluate(&config, &FieldInput::Code("123456"));
        assert!(eval.ready);
        assert_eq!(eval.value, FieldValue::Text("123456".to_string()));
    }

    #[test]
    fn test_date_always_ready() {
        let config = FieldConfig::new("d", FieldKind::Date(DateFieldConfig::default()), "?");
        let date = NaiveDate::from_ymd_opt(1995, 6, 15).unwrap();
        let eval = rules().evaluate(&config, &FieldInput::Date(date));
        assert!(eval.ready);
        assert_eq!(eval.value, FieldValue::Date(date));
    }

    #[test]
    fn test_phone_prefix_and_threshold() {
        let config = FieldConfig::new("p", FieldKind::Phone, "?");
        let us = by_iso("US").unwrap();
        let r = rules();
        // 5 digits is not enough; the rule is strictly more than 5
        let eval = r.evaluate(&config, &FieldInput::Phone { country: us, digits: "55501" });
        assert!(!eval.ready);
        let eval = r.evaluate(&config, &FieldInput::Phone { country: us, digits: "555012" });
        assert!(eval.ready);
        assert_eq!(eval.value, FieldValue::Text("+1555012".to_string()));
    }

    #[test]
    fn test_single_select() {
        let config = FieldConfig::new(
            "s",
            FieldKind::Select(SelectFieldConfig {
                options: vec![SelectOption::new("a", "A")],
                multiple: false,
                min_selection: None,
                max_selection: None,
            }),
            "?",
        );
        let r = rules();
        assert!(!r.evaluate(&config, &FieldInput::SingleSelect(None)).ready);
        let option = SelectOption::new("a", "A");
        let eval = r.evaluate(&config, &FieldInput::SingleSelect(Some(&option)));
        assert!(eval.ready);
        assert_eq!(
            eval.value,
            FieldValue::SingleSelect { id: "a".to_string(), label: "A".to_string() }
        );
    }

    #[test]
    fn test_multi_select_empty_not_ready() {
        let config = FieldConfig::new(
            "s",
            FieldKind::Select(SelectFieldConfig {
                options: vec![SelectOption::new("a", "A")],
                multiple: true,
                min_selection: None,
                max_selection: None,
            }),
            "?",
        );
        let r = rules();
        let empty = BTreeMap::new();
        assert!(!r.evaluate(&config, &FieldInput::MultiSelect(&empty)).ready);
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), "A".to_string());
        assert!(r.evaluate(&config, &FieldInput::MultiSelect(&map)).ready);
    }

    #[test]
    fn test_photos_ready_after_commit() {
        let config = FieldConfig::new(
            "ph",
            FieldKind::PhotoSelect(crate::models::PhotoFieldConfig { slots: 4 }),
            "?",
        );
        let r = rules();
        assert!(!r.evaluate(&config, &FieldInput::Photos(&[])).ready);
        let photos = vec![Photo {
            slot: 0,
            path: "a.png".into(),
            width: 4,
            height: 4,
        }];
        assert!(r.evaluate(&config, &FieldInput::Photos(&photos)).ready);
    }

    #[test]
    fn test_mismatched_input_not_ready() {
        let config = FieldConfig::new("n", FieldKind::Name, "?");
        let eval = rules().evaluate(&config, &FieldInput::Code("123"));
        assert!(!eval.ready);
    }
}
