//! Digit generation and identifier formatting.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::IdError;

use super::clock::{Clock, SystemClock};

/// Digits drawn when a count of zero is requested.
pub const DEFAULT_DIGIT_COUNT: usize = 16;

/// Smallest alphabet that covers every digit value.
pub const MIN_ALPHABET_LEN: usize = 16;

/// Length of a short identifier.
const SHORT_ID_LEN: usize = 16;

/// `x` takes a digit, `y` takes a digit constrained to the variant range 8..=b.
const UUID_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";
const UUID_DIGITS: usize = 31;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Generates base-16 digits from a time seed mixed with randomness, and
/// formats them as identifiers.
///
/// Not cryptographically secure; see the [module docs](super).
pub struct IdGenerator<R = ThreadRng, C = SystemClock> {
    rng: R,
    clock: C,
}

impl IdGenerator {
    /// A generator over the thread-local RNG and the system clock.
    pub fn new() -> Self {
        Self::with_parts(rand::thread_rng(), SystemClock)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, C: Clock> IdGenerator<R, C> {
    /// A generator over caller-supplied randomness and time.
    pub fn with_parts(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Draw `count` digits in [0, 15]. A count of zero draws
    /// [`DEFAULT_DIGIT_COUNT`].
    pub fn next_numbers(&mut self, count: usize) -> Vec<u8> {
        self.next_numbers_with(count, |_| {})
    }

    /// Like [`next_numbers`](Self::next_numbers), calling `each` with every
    /// digit as it is produced.
    pub fn next_numbers_with<F>(&mut self, count: usize, mut each: F) -> Vec<u8>
    where
        F: FnMut(u8),
    {
        let count = if count == 0 {
            DEFAULT_DIGIT_COUNT
        } else {
            count
        };

        let mut seed = self.clock.now_millis();
        if let Some(high_res) = self.clock.high_res_millis() {
            seed += high_res;
        }

        let mut digits = Vec::with_capacity(count);
        for _ in 0..count {
            let r: f64 = self.rng.gen();
            let digit = ((seed + r * 16.0) % 16.0) as u8;
            seed = (seed / 16.0).floor();
            digits.push(digit);
            each(digit);
        }
        digits
    }

    /// A 36-character UUID v4-shaped string.
    pub fn uuid(&mut self) -> String {
        let mut digits = self.next_numbers(UUID_DIGITS).into_iter();
        UUID_TEMPLATE
            .chars()
            .map(|c| match c {
                'x' => hex(digits.next().unwrap_or(0)),
                'y' => hex(digits.next().unwrap_or(0) & 0x3 | 0x8),
                fixed => fixed,
            })
            .collect()
    }

    /// Sixteen entries drawn from `alphabet`, one per digit.
    ///
    /// Fails before drawing anything if `alphabet` has fewer than
    /// [`MIN_ALPHABET_LEN`] entries.
    pub fn short_uuid<T: Clone>(&mut self, alphabet: &[T]) -> Result<Vec<T>, IdError> {
        check_alphabet(alphabet.len())?;

        let mut picked = Vec::with_capacity(SHORT_ID_LEN);
        self.next_numbers_with(SHORT_ID_LEN, |digit| {
            picked.push(alphabet[digit as usize].clone());
        });
        Ok(picked)
    }

    /// [`short_uuid`](Self::short_uuid) over the characters of a string.
    pub fn short_id(&mut self, alphabet: &str) -> Result<String, IdError> {
        let chars: Vec<char> = alphabet.chars().collect();
        Ok(self.short_uuid(&chars)?.into_iter().collect())
    }
}

fn hex(digit: u8) -> char {
    HEX[(digit & 0xf) as usize] as char
}

fn check_alphabet(len: usize) -> Result<(), IdError> {
    if len < MIN_ALPHABET_LEN {
        return Err(IdError::AlphabetTooShort {
            len,
            min: MIN_ALPHABET_LEN,
        });
    }
    Ok(())
}

/// Draw `count` digits with the default generator.
pub fn next_numbers(count: usize) -> Vec<u8> {
    IdGenerator::new().next_numbers(count)
}

/// Draw `count` digits with the default generator, reporting each one.
pub fn next_numbers_with<F: FnMut(u8)>(count: usize, each: F) -> Vec<u8> {
    IdGenerator::new().next_numbers_with(count, each)
}

/// A UUID v4-shaped string from the default generator.
pub fn uuid() -> String {
    IdGenerator::new().uuid()
}

/// Sixteen entries of `alphabet` chosen by the default generator.
pub fn short_uuid<T: Clone>(alphabet: &[T]) -> Result<Vec<T>, IdError> {
    IdGenerator::new().short_uuid(alphabet)
}

/// A 16-character string over `alphabet` from the default generator.
pub fn short_id(alphabet: &str) -> Result<String, IdError> {
    IdGenerator::new().short_id(alphabet)
}
