//! # django-rs-core
//!
//! Core types shared by the django-rs REST framework crates: the error type,
//! settings and their loader, logging setup, and text helpers.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Framework settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{DjangoError, DjangoResult, ValidationError};
pub use settings::{RestFrameworkSettings, Settings, SETTINGS};
