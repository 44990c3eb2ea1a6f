//! Proof hash formats.
//!
//! A proof hash is an identifier, not a digest: it spells out the score,
//! move count and elapsed time as four lowercase hex digits each, wrapped in
//! a prefix/suffix that encodes provenance.
//!
//! | Style | Layout |
//! |---|---|
//! | Real | `0xSP1_<score>_<moves>_<time>_REAL` |
//! | Simulated, tagged | `0xSIM_<score>_<moves>_<time>_<8 random hex>` |
//! | Simulated, compact | `0x<score><moves><time><14 random hex>` |
//!
//! The tagged form is produced when the prover ran and did not verify; the
//! compact form is produced when no prover was reachable at all. Both are
//! simulated encodings and [`ParsedHash`] classifies them as such.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{EncodingError, HashParseError};

/// Largest value representable in a four hex digit field.
pub const MAX_HASH_FIELD: u32 = 0xFFFF;

const REAL_PREFIX: &str = "0xSP1_";
const REAL_SUFFIX: &str = "REAL";
const TAGGED_PREFIX: &str = "0xSIM_";
const COMPACT_PREFIX: &str = "0x";
const SEPARATOR: char = '_';

const FIELD_DIGITS: usize = 4;
const TAGGED_RANDOM_BYTES: usize = 4;
const COMPACT_RANDOM_DIGITS: usize = 14;
/// Compact suffixes are drawn below 2^52 and padded to 14 digits.
const COMPACT_RANDOM_BOUND: u64 = 1 << 52;

/// Layout of a simulated hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimulatedStyle {
    /// `0xSIM_..._<8 hex>`, emitted by the server-side fallback.
    Tagged,
    /// `0x<26 hex>`, emitted when the real path was never attempted.
    Compact,
}

/// Layout of a proof hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashStyle {
    Real,
    Simulated(SimulatedStyle),
}

impl HashStyle {
    pub const fn provenance(self) -> Provenance {
        match self {
            HashStyle::Real => Provenance::Real,
            HashStyle::Simulated(_) => Provenance::Simulated,
        }
    }
}

/// Whether a score was confirmed by the external prover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Provenance {
    Real,
    Simulated,
}

impl Provenance {
    pub const fn is_real(self) -> bool {
        matches!(self, Provenance::Real)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provenance::Real => "real",
            Provenance::Simulated => "simulated",
        };
        write!(f, "{}", label)
    }
}

/// Numeric fields carried by every hash format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashFields {
    pub score: u32,
    pub moves: u32,
    pub elapsed_seconds: u32,
}

impl HashFields {
    /// Formats the hash in the given style, drawing any random suffix from `rng`.
    pub fn format<R: Rng + ?Sized>(
        &self,
        style: HashStyle,
        rng: &mut R,
    ) -> Result<String, EncodingError> {
        let score = hex4("score", self.score)?;
        let moves = hex4("moves", self.moves)?;
        let time = hex4("elapsed_seconds", self.elapsed_seconds)?;

        let hash = match style {
            HashStyle::Real => {
                format!("{REAL_PREFIX}{score}_{moves}_{time}_{REAL_SUFFIX}")
            }
            HashStyle::Simulated(SimulatedStyle::Tagged) => {
                let random: [u8; TAGGED_RANDOM_BYTES] = rng.r#gen();
                format!(
                    "{TAGGED_PREFIX}{score}_{moves}_{time}_{}",
                    hex::encode(random)
                )
            }
            HashStyle::Simulated(SimulatedStyle::Compact) => {
                let random = rng.gen_range(0..COMPACT_RANDOM_BOUND);
                format!(
                    "{COMPACT_PREFIX}{score}{moves}{time}{random:0width$x}",
                    width = COMPACT_RANDOM_DIGITS
                )
            }
        };
        Ok(hash)
    }
}

fn hex4(field: &'static str, value: u32) -> Result<String, EncodingError> {
    if value > MAX_HASH_FIELD {
        return Err(EncodingError::FieldOverflow { field, value });
    }
    Ok(format!("{value:04x}"))
}

/// A proof hash decoded back into its style and numeric fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParsedHash {
    pub style: HashStyle,
    pub fields: HashFields,
}

impl ParsedHash {
    pub fn parse(hash: &str) -> Result<Self, HashParseError> {
        if let Some(rest) = hash.strip_prefix(REAL_PREFIX) {
            let (fields, suffix) = parse_separated(rest)?;
            if suffix != REAL_SUFFIX {
                return Err(HashParseError::Malformed("real hash must end in REAL"));
            }
            return Ok(Self {
                style: HashStyle::Real,
                fields,
            });
        }

        if let Some(rest) = hash.strip_prefix(TAGGED_PREFIX) {
            let (fields, suffix) = parse_separated(rest)?;
            if suffix.len() != TAGGED_RANDOM_BYTES * 2 || !is_hex(suffix) {
                return Err(HashParseError::Malformed(
                    "tagged suffix must be eight hex digits",
                ));
            }
            return Ok(Self {
                style: HashStyle::Simulated(SimulatedStyle::Tagged),
                fields,
            });
        }

        if let Some(rest) = hash.strip_prefix(COMPACT_PREFIX) {
            if rest.len() != FIELD_DIGITS * 3 + COMPACT_RANDOM_DIGITS || !is_hex(rest) {
                return Err(HashParseError::Malformed(
                    "compact hash must be 26 hex digits",
                ));
            }
            let fields = HashFields {
                score: parse_field(&rest[0..4])?,
                moves: parse_field(&rest[4..8])?,
                elapsed_seconds: parse_field(&rest[8..12])?,
            };
            return Ok(Self {
                style: HashStyle::Simulated(SimulatedStyle::Compact),
                fields,
            });
        }

        Err(HashParseError::UnknownPrefix)
    }

    pub const fn provenance(&self) -> Provenance {
        self.style.provenance()
    }
}

impl FromStr for ParsedHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_separated(rest: &str) -> Result<(HashFields, &str), HashParseError> {
    let mut parts = rest.split(SEPARATOR);
    let mut next = || {
        parts
            .next()
            .ok_or(HashParseError::Malformed("missing hash segment"))
    };

    let fields = HashFields {
        score: parse_field(next()?)?,
        moves: parse_field(next()?)?,
        elapsed_seconds: parse_field(next()?)?,
    };
    let suffix = next()?;

    if parts.next().is_some() {
        return Err(HashParseError::Malformed("trailing hash segment"));
    }
    Ok((fields, suffix))
}

fn parse_field(segment: &str) -> Result<u32, HashParseError> {
    if segment.len() != FIELD_DIGITS || !is_hex(segment) {
        return Err(HashParseError::Malformed("field must be four hex digits"));
    }
    u32::from_str_radix(segment, 16)
        .map_err(|_| HashParseError::Malformed("field must be four hex digits"))
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
