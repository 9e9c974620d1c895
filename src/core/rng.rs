//! Secure Random Draws
//!
//! Every value, nonce and key in a commitment comes from here. The functions
//! are generic over `RngCore + CryptoRng` so production code can pass
//! `rand::rngs::OsRng` while tests pass a seeded CSPRNG.
//!
//! Range sampling goes through `Rng::gen_range`, which rejects the biased
//! tail of the word space instead of reducing modulo the range size.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use thiserror::Error;

/// Size of nonces and keys in bytes.
pub const SECRET_LEN: usize = 32;

/// A 32-byte secret (nonce or key).
pub type Secret = [u8; SECRET_LEN];

/// Requested range is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid range: end {end} is below start {start}")]
pub struct RangeError {
    /// Requested lower bound.
    pub start: i64,
    /// Requested upper bound.
    pub end: i64,
}

/// Draw a value uniformly from the inclusive range `[start, end]`.
///
/// Returns [`RangeError`] when `end < start`; bounds are never swapped.
pub fn uniform_in_range<R>(rng: &mut R, start: i64, end: i64) -> Result<i64, RangeError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if end < start {
        return Err(RangeError { start, end });
    }

    Ok(rng.gen_range(start..=end))
}

/// Draw a fresh 32-byte secret.
pub fn random_secret<R>(rng: &mut R) -> Secret
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut secret = [0u8; SECRET_LEN];
    rng.fill_bytes(&mut secret);
    secret
}

/// Pick one element of `items` uniformly.
pub fn choose<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RngCore + CryptoRng + ?Sized,
{
    items.choose(rng)
}

// =============================================================================
// TESTS
// =============================================================================
