//! Form host: owns the field list, the captured values, and the readiness
//! gate, and receives updates through the reporting interface.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::models::{FieldConfig, FieldValue, FormDefinition};

/// Reporting interface between field components and the host.
///
/// Components push every readiness/value change through this interface,
/// including redundant ones, so implementations must be idempotent. The
/// photo-picker capability is optional; components check before calling.
pub trait FormDelegate {
    /// Declares whether the current field's value is acceptable to advance
    /// past.
    fn set_ready(&mut self, ready: bool);

    /// Reports the current normalized value for the field identified by
    /// `key`.
    fn set_value(&mut self, key: &str, value: FieldValue);

    /// Looks up a stored value so a presenter can pre-populate a field
    /// when a form is revisited.
    fn value_for(&self, key: &str) -> Option<&FieldValue>;

    /// Whether this host can present a photo picker. Defaults to no.
    fn photo_picker_supported(&self) -> bool {
        false
    }

    /// Asks the host to present its photo picker. Only called when
    /// `photo_picker_supported` returned true. Defaults to a no-op.
    fn request_photo_picker(&mut self) {}
}

/// Host state for one running form.
#[derive(Debug)]
pub struct FormState {
    /// Fields in presentation order
    pub fields: Vec<FieldConfig>,
    /// Form title, if the definition provides one
    pub title: Option<String>,
    /// Captured values keyed by field key
    pub values: HashMap<String, FieldValue>,
    /// Index of the current field
    pub current: usize,
    /// Whether the current field's value is acceptable
    pub ready: bool,
    /// Set once the user advanced past the last field
    pub completed: bool,
    /// Directory the photo picker browses; `None` disables the capability
    pub photo_dir: Option<PathBuf>,
    /// Set by `request_photo_picker`; the UI loop consumes it
    pub photo_picker_requested: bool,
}

impl FormState {
    /// Builds host state from a validated definition.
    pub fn new(definition: FormDefinition) -> Result<Self> {
        definition.validate()?;
        Ok(Self {
            fields: definition.fields,
            title: definition.title,
            values: HashMap::new(),
            current: 0,
            ready: false,
            completed: false,
            photo_dir: None,
            photo_picker_requested: false,
        })
    }

    /// Enables the photo-picker capability, browsing the given directory.
    #[must_use]
    pub fn with_photo_dir(mut self, dir: PathBuf) -> Self {
        self.photo_dir = Some(dir);
        self
    }

    /// The field currently on screen.
    #[must_use]
    pub fn current_field(&self) -> &FieldConfig {
        &self.fields[self.current]
    }

    /// (1-based step, total steps) for the progress header.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.fields.len())
    }

    /// Advances to the next field if the current one is ready.
    ///
    /// Returns true if the step changed or the form completed. Readiness
    /// is reset for the incoming field; its presenter recomputes it on
    /// activation.
    pub fn advance(&mut self) -> bool {
        if !self.ready {
            return false;
        }
        if self.current + 1 < self.fields.len() {
            self.current += 1;
            self.ready = false;
            true
        } else {
            self.completed = true;
            true
        }
    }

    /// Steps back to the previous field. Always allowed.
    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.ready = false;
        true
    }
}

impl FormDelegate for FormState {
    fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
    }

    fn value_for(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    fn photo_picker_supported(&self) -> bool {
        self.photo_dir.is_some()
    }

    fn request_photo_picker(&mut self) {
        self.photo_picker_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldKind;

    fn state() -> FormState {
        let definition = FormDefinition {
            title: None,
            fields: vec![
                FieldConfig::new("name", FieldKind::Name, "Name?"),
                FieldConfig::new("email", FieldKind::Email, "Email?"),
            ],
        };
        FormState::new(definition).unwrap()
    }

    #[test]
    fn test_advance_gated_on_ready() {
        let mut form = state();
        assert!(!form.advance());
        form.set_ready(true);
        assert!(form.advance());
        assert_eq!(form.current, 1);
        // Readiness does not carry over to the next field
        assert!(!form.ready);
    }

    #[test]
    fn test_completion_past_last_field() {
        let mut form = state();
        form.set_ready(true);
        form.advance();
        form.set_ready(true);
        form.advance();
        assert!(form.completed);
    }

    #[test]
    fn test_retreat_always_allowed() {
        let mut form = state();
        assert!(!form.retreat());
        form.set_ready(true);
        form.advance();
        assert!(form.retreat());
        assert_eq!(form.current, 0);
    }

    #[test]
    fn test_redundant_updates_are_idempotent() {
        let mut form = state();
        form.set_value("name", FieldValue::Text("J".to_string()));
        form.set_value("name", FieldValue::Text("J".to_string()));
        assert_eq!(form.values.len(), 1);
        assert_eq!(
            form.value_for("name"),
            Some(&FieldValue::Text("J".to_string()))
        );
    }

    #[test]
    fn test_photo_capability_flag() {
        let form = state();
        assert!(!form.photo_picker_supported());
        let form = state().with_photo_dir(PathBuf::from("/tmp"));
        assert!(form.photo_picker_supported());
    }
}
