//! # Lexio Common Library
//!
//! Shared code for the Lexio content tools including:
//! - Common error types
//! - Configuration loading and data folder resolution
//! - Text utilities (slugs, word counting)

pub mod config;
pub mod error;
pub mod text;

pub use error::{Error, Result};
