//! Validated per-game telemetry.
//!
//! [`Telemetry`] can only be built through validating constructors, so every
//! value that reaches the prover or the encoder is non-negative and fits the
//! fixed-width hash fields.

use crate::error::ValidationError;
use crate::hash::MAX_HASH_FIELD;
use crate::score::{self, ScoreResult, TOTAL_PAIRS};

/// Wire name of the move counter.
pub const MOVES_FIELD: &str = "moves";
/// Wire name of the elapsed seconds counter.
pub const TIME_FIELD: &str = "time";
/// Wire name of the matched pair counter.
pub const MATCHED_PAIRS_FIELD: &str = "matchedPairs";

/// Raw telemetry describing one completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Telemetry {
    moves: u32,
    elapsed_seconds: u32,
    matched_pairs: u32,
}

impl Telemetry {
    /// Validates raw counters and builds telemetry.
    ///
    /// `moves` and `elapsed_seconds` are encoded as four hex digits in the
    /// proof hash, so both are capped at `0xFFFF`.
    pub fn new(
        moves: i64,
        elapsed_seconds: i64,
        matched_pairs: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            moves: check(MOVES_FIELD, moves, MAX_HASH_FIELD)?,
            elapsed_seconds: check(TIME_FIELD, elapsed_seconds, MAX_HASH_FIELD)?,
            matched_pairs: check(MATCHED_PAIRS_FIELD, matched_pairs, u32::MAX)?,
        })
    }

    /// Validates a JSON request body of the form
    /// `{ "moves": n, "time": n, "matchedPairs": n }`.
    #[cfg(feature = "serde")]
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let field = |name: &'static str| -> Result<i64, ValidationError> {
            let raw = object
                .get(name)
                .filter(|v| !v.is_null())
                .ok_or(ValidationError::MissingField(name))?;
            match (raw.as_i64(), raw.as_u64()) {
                (Some(value), _) => Ok(value),
                (None, Some(value)) => Err(ValidationError::OutOfRange {
                    field: name,
                    value,
                    max: u64::from(u32::MAX),
                }),
                (None, None) => Err(ValidationError::NotAnInteger(name)),
            }
        };

        Self::new(
            field(MOVES_FIELD)?,
            field(TIME_FIELD)?,
            field(MATCHED_PAIRS_FIELD)?,
        )
    }

    pub const fn moves(&self) -> u32 {
        self.moves
    }

    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub const fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Whether the board was cleared with exactly [`TOTAL_PAIRS`] matches.
    ///
    /// Any other count, including more pairs than the board holds, is
    /// treated as an incomplete game.
    pub const fn is_complete(&self) -> bool {
        self.matched_pairs == TOTAL_PAIRS
    }

    /// Locally computed score for this game.
    pub const fn score(&self) -> ScoreResult {
        score::compute(self.moves, self.elapsed_seconds)
    }
}

fn check(field: &'static str, value: i64, max: u32) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(ValidationError::OutOfRange {
            field,
            value: value as u64,
            max: u64::from(max),
        })
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_json() {
        let telemetry = Telemetry::from_json(&json!({
            "moves": 10,
            "time": 80,
            "matchedPairs": 8
        }))
        .unwrap();

        assert_eq!(telemetry.moves(), 10);
        assert_eq!(telemetry.elapsed_seconds(), 80);
        assert_eq!(telemetry.matched_pairs(), 8);
        assert!(telemetry.is_complete());
        assert_eq!(telemetry.score().score, 30);
    }

    #[test]
    fn rejects_negative_moves() {
        let err = Telemetry::from_json(&json!({
            "moves": -1,
            "time": 80,
            "matchedPairs": 8
        }))
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::Negative {
                field: "moves",
                value: -1
            }
        );
    }

    #[test]
    fn rejects_missing_and_null_fields() {
        let err = Telemetry::from_json(&json!({ "moves": 1, "time": 2 })).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("matchedPairs"));

        let err =
            Telemetry::from_json(&json!({ "moves": null, "time": 2, "matchedPairs": 3 }))
                .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("moves"));
    }

    #[test]
    fn rejects_non_integers() {
        let err = Telemetry::from_json(&json!({
            "moves": "ten",
            "time": 80,
            "matchedPairs": 8
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::NotAnInteger("moves"));

        let err = Telemetry::from_json(&json!({
            "moves": 10,
            "time": 80.5,
            "matchedPairs": 8
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::NotAnInteger("time"));
    }

    #[test]
    fn rejects_values_wider_than_hash_field() {
        let err = Telemetry::new(0x1_0000, 10, 8).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "moves",
                max: 0xFFFF,
                ..
            }
        ));

        assert!(Telemetry::new(0xFFFF, 0xFFFF, 8).is_ok());
    }

    #[test]
    fn only_an_exact_pair_count_is_complete() {
        assert!(Telemetry::new(10, 80, 8).unwrap().is_complete());
        assert!(!Telemetry::new(10, 80, 7).unwrap().is_complete());
        assert!(!Telemetry::new(10, 80, 9).unwrap().is_complete());
    }

    #[test]
    fn rejects_non_object_body() {
        assert_eq!(
            Telemetry::from_json(&json!([1, 2, 3])).unwrap_err(),
            ValidationError::NotAnObject
        );
    }
}
