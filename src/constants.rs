//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and field defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Onboard";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "onboard";

/// Digits a verification code field expects unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// ISO code of the phone country used when no preference has been cached.
pub const DEFAULT_PHONE_COUNTRY: &str = "US";

/// Minimum number of locally entered digits before a phone number counts
/// as ready.
pub const PHONE_MIN_DIGITS: usize = 5;
