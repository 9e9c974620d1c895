//! HMAC Commitment (canonical scheme)
//!
//! The committer draws a value and a fresh key, then publishes
//! `HMAC-SHA256(key, decimal(value))`. Revealing the key and the value lets
//! the counterpart recompute the tag.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::hash::{ct_eq_str, hmac_sha256, to_hex, value_message};
use crate::core::rng::{random_secret, uniform_in_range, RangeError, Secret};

/// A drawn value together with its HMAC tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacCommitment {
    /// The committed value.
    pub value: i64,

    /// HMAC key, revealed with the value.
    #[serde(with = "hex")]
    pub key: Secret,

    /// Lowercase hex HMAC-SHA256 tag (published before reveal).
    pub tag: String,
}

impl MacCommitment {
    /// Commit to a known value under the given key.
    pub fn seal(value: i64, key: Secret) -> Self {
        let tag = compute_tag(value, &key);
        Self { value, key, tag }
    }

    /// Check this commitment's own opening.
    pub fn verify(&self) -> bool {
        verify_mac(self.value, &self.key, &self.tag)
    }
}

/// Draw a uniform value in `[range_start, range_end]` and tag it, using the
/// OS generator.
pub fn commit_mac(range_start: i64, range_end: i64) -> Result<MacCommitment, RangeError> {
    commit_mac_with(&mut rand::rngs::OsRng, range_start, range_end)
}

/// [`commit_mac`] with a caller-supplied secure generator.
pub fn commit_mac_with<R>(
    rng: &mut R,
    range_start: i64,
    range_end: i64,
) -> Result<MacCommitment, RangeError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let value = uniform_in_range(rng, range_start, range_end)?;
    let key = random_secret(rng);
    Ok(MacCommitment::seal(value, key))
}

/// Check a revealed `(value, key)` against a published tag.
pub fn verify_mac(value: i64, key: &Secret, tag: &str) -> bool {
    let expected = compute_tag(value, key);
    ct_eq_str(&expected, tag)
}

fn compute_tag(value: i64, key: &Secret) -> String {
    to_hex(&hmac_sha256(key, &value_message(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_commit_mac_verifies() {
        let mut rng = StdRng::seed_from_u64(3);
        let c = commit_mac_with(&mut rng, 0, 1).unwrap();
        assert!(c.value == 0 || c.value == 1);
        assert!(verify_mac(c.value, &c.key, &c.tag));
    }

    #[test]
    fn test_commit_mac_os_rng() {
        let c = commit_mac(0, 5).unwrap();
        assert!(c.verify());
        assert_eq!(c.tag.len(), 64);
    }

    #[test]
    fn test_tag_is_hmac_of_decimal() {
        let key = [0x0b; 32];
        let c = MacCommitment::seal(-12, key);
        assert_eq!(c.tag, to_hex(&hmac_sha256(&key, b"-12")));
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(commit_mac(1, 0), Err(RangeError { start: 1, end: 0 }));
    }

    #[test]
    fn test_other_value_fails() {
        let c = MacCommitment::seal(2, [5; 32]);
        for other in [0, 1, 3, 4, 5, 20, -2] {
            assert!(!verify_mac(other, &c.key, &c.tag));
        }
    }

    #[test]
    fn test_single_bit_flips_fail() {
        let mut rng = StdRng::seed_from_u64(11);
        let c = commit_mac_with(&mut rng, 0, 5).unwrap();

        for byte in 0..32 {
            for bit in 0..8 {
                let mut key = c.key;
                key[byte] ^= 1 << bit;
                assert!(!verify_mac(c.value, &key, &c.tag));
            }
        }
    }

    #[test]
    fn test_tag_char_flips_fail() {
        let mut rng = StdRng::seed_from_u64(12);
        let c = commit_mac_with(&mut rng, 0, 5).unwrap();

        for i in 0..c.tag.len() {
            let mut bytes = c.tag.clone().into_bytes();
            bytes[i] = if bytes[i] == b'f' { b'e' } else { b'f' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(!verify_mac(c.value, &c.key, &tampered));
        }

        let truncated = &c.tag[..63];
        assert!(!verify_mac(c.value, &c.key, truncated));
    }

    #[test]
    fn test_verify_mac_idempotent() {
        let c = MacCommitment::seal(0, [1; 32]);
        let results: Vec<bool> = (0..5).map(|_| verify_mac(0, &c.key, &c.tag)).collect();
        assert!(results.iter().all(|r| *r));
        let results: Vec<bool> = (0..5).map(|_| verify_mac(1, &c.key, &c.tag)).collect();
        assert!(results.iter().all(|r| !*r));
    }

    #[test]
    fn test_uniformity_chi_square() {
        const SAMPLES: usize = 100_000;
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 6];
        for _ in 0..SAMPLES {
            let c = commit_mac_with(&mut rng, 0, 5).unwrap();
            counts[c.value as usize] += 1;
        }

        let expected = SAMPLES as f64 / 6.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();

        // 5 degrees of freedom; p = 0.0001 critical value is ~25.7.
        assert!(chi_square < 25.7, "chi-square {chi_square} for {counts:?}");
    }

    proptest! {
        #[test]
        fn prop_value_in_range(
            start in i64::MIN / 2..i64::MAX / 2,
            width in 0i64..10_000,
            seed: u64,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let end = start + width;
            let c = commit_mac_with(&mut rng, start, end).unwrap();
            prop_assert!(c.value >= start && c.value <= end);
            prop_assert!(verify_mac(c.value, &c.key, &c.tag));
        }

        #[test]
        fn prop_degenerate_range(point: i64, seed: u64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = commit_mac_with(&mut rng, point, point).unwrap();
            prop_assert_eq!(c.value, point);
            prop_assert!(c.verify());
        }
    }
}
