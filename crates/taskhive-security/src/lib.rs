//! # Taskhive Security
//!
//! Password hashing (Argon2) and JWT access token handling for Taskhive.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenProvider};
pub use password::PasswordHasher;
