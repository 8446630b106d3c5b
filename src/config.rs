//! Configuration management.
//!
//! Loads tile geometry and challenge lifetime settings from environment
//! variables. All settings are loaded at startup and stored in a
//! thread-safe Arc.

mod error;
mod settings;

pub use error::{CaptchaError, Result};
pub use settings::Config;
