//! # Taskhive Core
//!
//! Core types, traits, and error definitions for Taskhive.
//! This crate provides the foundational abstractions used across all layers
//! of the application.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
