//! Digest and MAC Primitives
//!
//! SHA-256 and HMAC-SHA256 helpers shared by both commitment schemes, plus
//! the constant-time comparison every verification goes through.
//!
//! Digests and tags travel as lowercase hex strings because that is what
//! gets published to the counterpart.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash output type (256 bits / 32 bytes)
pub type Digest256 = [u8; 32];

/// Length of a hex-encoded 256-bit digest.
pub const HEX_DIGEST_LEN: usize = 64;

type HmacSha256 = Hmac<Sha256>;

/// Hash the concatenation of `parts` in order.
///
/// No separators are inserted: callers own the framing of their message.
pub fn hash_concat(parts: &[&[u8]]) -> Digest256 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Digest256 {
    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC takes keys of any size"));
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Lowercase hex rendering of a digest.
#[inline]
pub fn to_hex(digest: &Digest256) -> String {
    hex::encode(digest)
}

/// Compare two published strings without early exit on the first mismatch.
///
/// Length differences are not secret (every honest digest has the same
/// length), so only the content comparison is constant-time.
pub fn ct_eq_str(expected: &str, given: &str) -> bool {
    expected.as_bytes().ct_eq(given.as_bytes()).into()
}

/// Canonical message encoding of a committed value: its decimal ASCII form.
#[inline]
pub fn value_message(value: i64) -> Vec<u8> {
    value.to_string().into_bytes()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_concat_matches_single_buffer() {
        let joined = hash_concat(&[b"abc", b"def"]);
        let single = hash_concat(&[b"abcdef"]);
        assert_eq!(joined, single);
    }

    #[test]
    fn test_sha256_known_vector() {
        // FIPS 180-2 test vector for "abc"
        let digest = hash_concat(&[b"abc"]);
        assert_eq!(
            to_hex(&digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hmac_known_vector() {
        // RFC 4231 test case 2
        let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            to_hex(&tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hex_length() {
        let digest = hash_concat(&[b""]);
        assert_eq!(to_hex(&digest).len(), HEX_DIGEST_LEN);
    }

    #[test]
    fn test_ct_eq_str() {
        assert!(ct_eq_str("abcd", "abcd"));
        assert!(!ct_eq_str("abcd", "abce"));
        assert!(!ct_eq_str("abcd", "abc"));
        assert!(!ct_eq_str("abcd", "ABCD"));
    }

    #[test]
    fn test_value_message_is_decimal() {
        assert_eq!(value_message(0), b"0".to_vec());
        assert_eq!(value_message(42), b"42".to_vec());
        assert_eq!(value_message(-7), b"-7".to_vec());
    }
}
