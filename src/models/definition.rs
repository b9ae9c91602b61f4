//! Loadable form definitions: an ordered list of field configurations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::field::{
    CodeFieldConfig, DateFieldConfig, FieldConfig, FieldKind, PhotoFieldConfig, RangeFieldConfig,
    SelectFieldConfig, SelectOption,
};

/// An ordered set of fields making up one onboarding form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form title shown in the header
    #[serde(default)]
    pub title: Option<String>,
    /// Fields in presentation order
    pub fields: Vec<FieldConfig>,
}

impl FormDefinition {
    /// Loads a definition from a TOML file and validates every field.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read form definition: {}", path.display()))?;

        let definition: Self = toml::from_str(&content).context(format!(
            "Failed to parse form definition: {}",
            path.display()
        ))?;

        definition.validate()?;
        Ok(definition)
    }

    /// Validates the definition: at least one field, valid field payloads,
    /// and unique keys.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            anyhow::bail!("Form definition contains no fields");
        }

        for field in &self.fields {
            field.validate()?;
        }

        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|f| f.key == field.key) {
                anyhow::bail!("Duplicate field key '{}'", field.key);
            }
        }

        Ok(())
    }

    /// Built-in demo form exercising every field kind.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            title: Some("Welcome aboard".to_string()),
            fields: vec![
                FieldConfig::new("name", FieldKind::Name, "What's your name?")
                    .with_placeholder("Jane Doe"),
                FieldConfig::new("username", FieldKind::Username, "Pick a username")
                    .with_placeholder("lowercase, digits, underscore"),
                FieldConfig::new("email", FieldKind::Email, "What's your email address?")
                    .with_placeholder("you@example.com"),
                FieldConfig::new(
                    "code",
                    FieldKind::VerificationCode(CodeFieldConfig::default()),
                    "Enter the code we sent you",
                ),
                FieldConfig::new(
                    "birthday",
                    FieldKind::Date(DateFieldConfig {
                        min: chrono::NaiveDate::from_ymd_opt(1920, 1, 1),
                        max: chrono::NaiveDate::from_ymd_opt(2012, 12, 31),
                        default: chrono::NaiveDate::from_ymd_opt(1995, 6, 15),
                    }),
                    "When were you born?",
                ),
                FieldConfig::new("phone", FieldKind::Phone, "What's your phone number?")
                    .with_placeholder("digits only"),
                FieldConfig::new(
                    "interests",
                    FieldKind::Select(SelectFieldConfig {
                        options: vec![
                            SelectOption::new("music", "Music"),
                            SelectOption::new("sports", "Sports"),
                            SelectOption::new("books", "Books"),
                            SelectOption::new("travel", "Travel"),
                            SelectOption::new("cooking", "Cooking"),
                        ],
                        multiple: true,
                        min_selection: Some(1),
                        max_selection: None,
                    }),
                    "What are you into?",
                ),
                FieldConfig::new(
                    "referral",
                    FieldKind::Select(SelectFieldConfig {
                        options: vec![
                            SelectOption::new("friend", "A friend told me"),
                            SelectOption::new("search", "Found it searching"),
                            SelectOption::new("social", "Social media"),
                            SelectOption::new("other", "Something else"),
                        ],
                        multiple: false,
                        min_selection: None,
                        max_selection: None,
                    }),
                    "How did you hear about us?",
                ),
                FieldConfig::new("bio", FieldKind::LargeText, "Tell us about yourself")
                    .with_placeholder("A few sentences is plenty"),
                FieldConfig::new(
                    "height",
                    FieldKind::Range(RangeFieldConfig {
                        values: (140..=210).map(|cm| format!("{cm} cm")).collect(),
                    }),
                    "How tall are you?",
                ),
                FieldConfig::new(
                    "photos",
                    FieldKind::PhotoSelect(PhotoFieldConfig::default()),
                    "Add some pictures",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_definition_is_valid() {
        let demo = FormDefinition::demo();
        assert!(demo.validate().is_ok());
        assert_eq!(demo.fields.len(), 11);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let definition = FormDefinition {
            title: None,
            fields: vec![
                FieldConfig::new("name", FieldKind::Name, "Name?"),
                FieldConfig::new("name", FieldKind::Email, "Email?"),
            ],
        };
        assert!(definition.validate().is_err());
    }

    #[test]
    fn test_empty_definition_rejected() {
        let definition = FormDefinition {
            title: None,
            fields: Vec::new(),
        };
        assert!(definition.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let demo = FormDefinition::demo();
        let toml = toml::to_string_pretty(&demo).unwrap();
        let parsed: FormDefinition = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, demo);
    }
}
