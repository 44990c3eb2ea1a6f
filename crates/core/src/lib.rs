//! Deterministic scoring rules and proof record encoding for the memory game.
//!
//! `memory-core` is the single source of truth for how a finished game is
//! scored and how a proving outcome is turned into a [`ProofRecord`]. The
//! prover invoker, the simulation engine and the stub prover all call into
//! [`score::compute`] and [`record::encode`] rather than re-deriving either.
pub mod error;
pub mod hash;
pub mod outcome;
pub mod record;
pub mod score;
pub mod telemetry;

pub use error::{EncodingError, HashParseError, ValidationError};
pub use hash::{
    HashFields, HashStyle, MAX_HASH_FIELD, ParsedHash, Provenance, SimulatedStyle,
};
pub use outcome::{ProofOutcome, TIMEOUT_REASON};
pub use record::{ProofRecord, encode, encode_with};
pub use score::{ScoreResult, TIME_LIMIT, TOTAL_PAIRS, compute};
pub use telemetry::Telemetry;
