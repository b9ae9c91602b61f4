//! Data models for form fields, captured values, and country data.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are designed to be independent of UI and business logic.

pub mod country;
pub mod definition;
pub mod field;
pub mod value;

// Re-export all model types
pub use country::{by_iso, search, Country, COUNTRIES};
pub use definition::FormDefinition;
pub use field::{
    CodeFieldConfig, DateFieldConfig, FieldConfig, FieldKind, PhotoFieldConfig, RangeFieldConfig,
    SelectFieldConfig, SelectOption,
};
pub use value::{FieldValue, Photo};
