//! Shared error type for the Lexio tools

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be located or read
    #[error("Configuration error: {0}")]
    Config(String),
}
