//! # Taskhive Config
//!
//! Layered configuration loading for Taskhive: TOML files plus
//! `TASKHIVE__`-prefixed environment variables.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::*;
