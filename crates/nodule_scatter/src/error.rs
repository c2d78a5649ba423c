//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Generation only fails on invalid configuration; statistical shortfalls
//! (dropped candidates) are reported through run statistics instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_is_prefixed() {
        let err = Error::invalid("patch_cell must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: patch_cell must be > 0"
        );
    }
}
