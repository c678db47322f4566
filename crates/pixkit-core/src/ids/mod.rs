//! Pseudo-random identifiers: UUID v4-shaped strings and short tokens drawn
//! from a caller-supplied alphabet.
//!
//! # Not a security primitive
//!
//! Digits come from a wall-clock seed mixed with a statistical random number
//! generator. The output is fine for element ids, cache keys and file names,
//! but it is predictable enough that it must not be used as a session token,
//! password reset code, or anything else an attacker benefits from guessing.
//! Use a CSPRNG-backed generator (for example `uuid::Uuid::new_v4` or
//! `rand::rngs::OsRng`) for those.

pub mod clock;
pub mod generator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::{
    next_numbers, next_numbers_with, short_id, short_uuid, uuid, IdGenerator,
    DEFAULT_DIGIT_COUNT, MIN_ALPHABET_LEN,
};
