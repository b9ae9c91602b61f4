//! Background services used by the TUI.

pub mod photos;

pub use photos::{DecodeRequest, DecodeResult, PhotoLoader};
