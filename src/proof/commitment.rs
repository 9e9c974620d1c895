//! Hash Commitment (alternate scheme)
//!
//! Commit to a value by publishing `SHA-256(decimal(value) ‖ nonce ‖ key)`.
//! At reveal time the committer discloses value, nonce and key, and anyone
//! can recompute the digest.
//!
//! This is the two-secret variant of the protocol. [`super::mac`] carries
//! the canonical single-secret variant.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::hash::{ct_eq_str, hash_concat, to_hex, value_message};
use crate::core::rng::{random_secret, uniform_in_range, RangeError, Secret};

/// A drawn value together with its hash commitment.
///
/// `digest` is safe to publish immediately. `value`, `nonce` and `key` stay
/// with the committer until reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashCommitment {
    /// The committed value.
    pub value: i64,

    /// Random nonce mixed into the digest.
    #[serde(with = "hex")]
    pub nonce: Secret,

    /// Random key mixed into the digest.
    #[serde(with = "hex")]
    pub key: Secret,

    /// Lowercase hex SHA-256 digest (published before reveal).
    pub digest: String,
}

impl HashCommitment {
    /// Commit to a known value with the given secrets.
    pub fn seal(value: i64, nonce: Secret, key: Secret) -> Self {
        let digest = compute_digest(value, &nonce, &key);
        Self {
            value,
            nonce,
            key,
            digest,
        }
    }

    /// Check this commitment's own opening.
    pub fn verify(&self) -> bool {
        verify(self.value, &self.nonce, &self.key, &self.digest)
    }
}

/// Draw a uniform value in `[range_start, range_end]` and commit to it using
/// the OS generator.
pub fn commit(range_start: i64, range_end: i64) -> Result<HashCommitment, RangeError> {
    commit_with(&mut rand::rngs::OsRng, range_start, range_end)
}

/// [`commit`] with a caller-supplied secure generator.
pub fn commit_with<R>(
    rng: &mut R,
    range_start: i64,
    range_end: i64,
) -> Result<HashCommitment, RangeError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let value = uniform_in_range(rng, range_start, range_end)?;
    let nonce = random_secret(rng);
    let key = random_secret(rng);
    Ok(HashCommitment::seal(value, nonce, key))
}

/// Check a revealed `(value, nonce, key)` against a published digest.
///
/// Never fails; any mismatch, including a malformed digest, is `false`.
pub fn verify(value: i64, nonce: &Secret, key: &Secret, digest: &str) -> bool {
    let expected = compute_digest(value, nonce, key);
    ct_eq_str(&expected, digest)
}

fn compute_digest(value: i64, nonce: &Secret, key: &Secret) -> String {
    let message = value_message(value);
    to_hex(&hash_concat(&[message.as_slice(), &nonce[..], &key[..]]))
}
