//! lexio-cm - WordPress content migration for the Lexio platform
//!
//! One-shot ETL from a WordPress eXtended RSS (WXR) export of the old
//! LearnDash site into the Lexio relational schema:
//!
//! 1. [`parser::WxrParser`] flattens and classifies the export into typed,
//!    cross-referenced in-memory collections.
//! 2. [`migrate::ContentMigration`] writes them into the target schema in
//!    dependency order, translating WordPress ids to freshly generated
//!    ones, and synthesizes vocabulary and cultural-content rows from
//!    lesson text along the way.
//!
//! The job is strictly sequential and intentionally simple: one pass over
//! the file, one pass per phase, no retries, no resume.

pub mod db;
pub mod heuristics;
pub mod migrate;
pub mod parser;

pub use migrate::stats::{EntityKind, MigrationIssue, MigrationStats};
pub use migrate::{ContentMigration, MigrationError};
pub use parser::{ParseError, WxrParser};
