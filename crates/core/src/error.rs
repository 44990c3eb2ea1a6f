//! Error types raised while validating telemetry or encoding records.

use thiserror::Error;

/// Telemetry rejected before any score is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("game data must be a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` must be an integer")]
    NotAnInteger(&'static str),

    #[error("field `{field}` must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("field `{field}` must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// A record field could not be encoded into the fixed-width hash.
///
/// Validated telemetry never triggers this. It is only reachable through a
/// verified score outside the four hex digit range, which the bridge answers
/// with a simulated record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("{field} value {value} does not fit in four hex digits")]
    FieldOverflow { field: &'static str, value: u32 },
}

/// A string that is not one of the known proof hash formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashParseError {
    #[error("unrecognized proof hash prefix")]
    UnknownPrefix,

    #[error("malformed proof hash: {0}")]
    Malformed(&'static str),
}
