//! Application configuration module.
//!
//! Manages the TOML config file holding catalog API settings such as the
//! API key and endpoint overrides.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, ApiConfig, AppConfig, resolve_config_path};
