//! Error types surfaced by the bridge.
//!
//! Prover failures are not errors here: they are folded into a simulated
//! record. Only input that never passed validation and records that could not
//! be encoded reach the caller as [`BridgeError`].
use thiserror::Error;

use memory_core::{EncodingError, ValidationError};

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid game data: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to encode proof record")]
    Encoding(#[source] EncodingError),
}

impl From<EncodingError> for BridgeError {
    fn from(error: EncodingError) -> Self {
        BridgeError::Encoding(error)
    }
}

/// Invalid configuration values, reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
