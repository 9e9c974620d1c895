//! Publish / Reveal / Verify
//!
//! Scheme-independent view of a committed draw, as the two parties see it:
//!
//! ```text
//! committer                          counterpart
//! ─────────                          ───────────
//! SealedDraw ── publication() ──────▶ Publication   (digest or tag)
//!      │                                   │
//!      │        (counterpart acts)         │
//!      ▼                                   ▼
//! reveal() ──────────────────────────▶ Reveal::verify(&Publication)
//!                                          │
//!                                Ok(value) | Err(FairnessViolation)
//! ```
//!
//! A `SealedDraw` is consumed by `reveal`, so one draw is opened once.

use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rng::{RangeError, Secret};
use crate::proof::commitment::{self, HashCommitment};
use crate::proof::mac::{self, MacCommitment};

/// Which commitment construction a draw uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// HMAC-SHA256 tag over the value; reveal value + key.
    #[default]
    Hmac,
    /// SHA-256 digest over value ‖ nonce ‖ key; reveal all three.
    Hash,
}

impl Scheme {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hmac => "hmac",
            Self::Hash => "hash",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown scheme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown commitment scheme '{0}' (expected 'hmac' or 'hash')")]
pub struct UnknownScheme(pub String);

impl FromStr for Scheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hmac" | "mac" => Ok(Self::Hmac),
            "hash" | "sha256" => Ok(Self::Hash),
            other => Err(UnknownScheme(other.to_string())),
        }
    }
}

/// The public half of a draw: what gets shown before the reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Construction used.
    pub scheme: Scheme,
    /// Hex digest (hash scheme) or hex tag (HMAC scheme).
    pub commitment: String,
}

/// The opening of a draw, disclosed after the counterpart has acted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum Reveal {
    /// Opening of an HMAC commitment.
    Hmac {
        /// Claimed value.
        value: i64,
        /// HMAC key.
        #[serde(with = "hex")]
        key: Secret,
    },
    /// Opening of a hash commitment.
    Hash {
        /// Claimed value.
        value: i64,
        /// Nonce.
        #[serde(with = "hex")]
        nonce: Secret,
        /// Key.
        #[serde(with = "hex")]
        key: Secret,
    },
}

/// A reveal did not check out against what was published.
///
/// Not retryable: the round it belongs to must be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FairnessViolation {
    /// Recomputed digest or tag differs from the published one.
    #[error("revealed value {value} does not match published commitment {published}")]
    CommitmentMismatch {
        /// Value claimed by the reveal.
        value: i64,
        /// Commitment that was published.
        published: String,
    },

    /// Commitment opens correctly but to a value outside the agreed range.
    #[error("revealed value {value} lies outside the agreed range [{start}, {end}]")]
    OutOfRange {
        /// Value claimed by the reveal.
        value: i64,
        /// Range lower bound.
        start: i64,
        /// Range upper bound.
        end: i64,
    },

    /// Reveal belongs to a different scheme than the publication.
    #[error("reveal uses the {revealed} scheme but the {published} scheme was published")]
    SchemeMismatch {
        /// Scheme of the publication.
        published: Scheme,
        /// Scheme of the reveal.
        revealed: Scheme,
    },
}

impl Reveal {
    /// Claimed value.
    pub fn value(&self) -> i64 {
        match self {
            Self::Hmac { value, .. } | Self::Hash { value, .. } => *value,
        }
    }

    /// Scheme of this opening.
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Hmac { .. } => Scheme::Hmac,
            Self::Hash { .. } => Scheme::Hash,
        }
    }

    /// Check the opening against what was published.
    ///
    /// Returns the verified value. The check itself never fails for reasons
    /// other than a mismatch.
    pub fn verify(&self, publication: &Publication) -> Result<i64, FairnessViolation> {
        if self.scheme() != publication.scheme {
            return Err(FairnessViolation::SchemeMismatch {
                published: publication.scheme,
                revealed: self.scheme(),
            });
        }

        let ok = match self {
            Self::Hmac { value, key } => mac::verify_mac(*value, key, &publication.commitment),
            Self::Hash { value, nonce, key } => {
                commitment::verify(*value, nonce, key, &publication.commitment)
            }
        };

        if ok {
            Ok(self.value())
        } else {
            Err(FairnessViolation::CommitmentMismatch {
                value: self.value(),
                published: publication.commitment.clone(),
            })
        }
    }

    /// [`Self::verify`], then check the value lies in `[start, end]`.
    pub fn verify_in_range(
        &self,
        publication: &Publication,
        start: i64,
        end: i64,
    ) -> Result<i64, FairnessViolation> {
        let value = self.verify(publication)?;
        if value < start || value > end {
            return Err(FairnessViolation::OutOfRange { value, start, end });
        }
        Ok(value)
    }
}

/// A committed draw still held by the committer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SealedDraw {
    /// HMAC commitment.
    Hmac(MacCommitment),
    /// Hash commitment.
    Hash(HashCommitment),
}

impl SealedDraw {
    /// Draw uniformly from `[range_start, range_end]` and commit with `scheme`.
    pub fn draw<R>(
        scheme: Scheme,
        rng: &mut R,
        range_start: i64,
        range_end: i64,
    ) -> Result<Self, RangeError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        Ok(match scheme {
            Scheme::Hmac => Self::Hmac(mac::commit_mac_with(rng, range_start, range_end)?),
            Scheme::Hash => Self::Hash(commitment::commit_with(rng, range_start, range_end)?),
        })
    }

    /// Scheme of this draw.
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Hmac(_) => Scheme::Hmac,
            Self::Hash(_) => Scheme::Hash,
        }
    }

    /// Public half, safe to show before the counterpart acts.
    pub fn publication(&self) -> Publication {
        let commitment = match self {
            Self::Hmac(c) => c.tag.clone(),
            Self::Hash(c) => c.digest.clone(),
        };
        Publication {
            scheme: self.scheme(),
            commitment,
        }
    }

    /// Open the draw.
    pub fn reveal(self) -> Reveal {
        match self {
            Self::Hmac(c) => Reveal::Hmac {
                value: c.value,
                key: c.key,
            },
            Self::Hash(c) => Reveal::Hash {
                value: c.value,
                nonce: c.nonce,
                key: c.key,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_publish_then_verify_both_schemes() {
        let mut rng = StdRng::seed_from_u64(10);
        for scheme in [Scheme::Hmac, Scheme::Hash] {
            let sealed = SealedDraw::draw(scheme, &mut rng, 0, 5).unwrap();
            let publication = sealed.publication();
            assert_eq!(publication.scheme, scheme);
            assert_eq!(publication.commitment.len(), 64);

            let reveal = sealed.reveal();
            let value = reveal.verify(&publication).unwrap();
            assert!((0..=5).contains(&value));
        }
    }

    #[test]
    fn test_altered_value_is_violation() {
        let sealed = SealedDraw::Hmac(MacCommitment::seal(1, [7; 32]));
        let publication = sealed.publication();

        let forged = Reveal::Hmac {
            value: 0,
            key: [7; 32],
        };
        assert!(matches!(
            forged.verify(&publication),
            Err(FairnessViolation::CommitmentMismatch { value: 0, .. })
        ));
    }

    #[test]
    fn test_altered_nonce_is_violation() {
        let sealed = SealedDraw::Hash(HashCommitment::seal(3, [1; 32], [2; 32]));
        let publication = sealed.publication();

        let forged = Reveal::Hash {
            value: 3,
            nonce: [0; 32],
            key: [2; 32],
        };
        assert!(forged.verify(&publication).is_err());
    }

    #[test]
    fn test_scheme_mismatch() {
        let sealed = SealedDraw::Hash(HashCommitment::seal(3, [1; 32], [2; 32]));
        let publication = sealed.publication();
        let wrong = Reveal::Hmac {
            value: 3,
            key: [2; 32],
        };
        assert_eq!(
            wrong.verify(&publication),
            Err(FairnessViolation::SchemeMismatch {
                published: Scheme::Hash,
                revealed: Scheme::Hmac,
            })
        );
    }

    #[test]
    fn test_verify_in_range() {
        let sealed = SealedDraw::Hmac(MacCommitment::seal(7, [1; 32]));
        let publication = sealed.publication();
        let reveal = sealed.reveal();
        assert_eq!(reveal.verify(&publication), Ok(7));
        assert_eq!(reveal.verify_in_range(&publication, 0, 7), Ok(7));
        assert_eq!(
            reveal.verify_in_range(&publication, 0, 5),
            Err(FairnessViolation::OutOfRange {
                value: 7,
                start: 0,
                end: 5
            })
        );
    }

    #[test]
    fn test_range_error_propagates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            SealedDraw::draw(Scheme::Hmac, &mut rng, 3, 2),
            Err(RangeError { start: 3, end: 2 })
        );
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("hmac".parse::<Scheme>(), Ok(Scheme::Hmac));
        assert_eq!(" HASH ".parse::<Scheme>(), Ok(Scheme::Hash));
        assert_eq!("sha256".parse::<Scheme>(), Ok(Scheme::Hash));
        assert!("md5".parse::<Scheme>().is_err());
        assert_eq!(Scheme::default(), Scheme::Hmac);
        assert_eq!(Scheme::Hash.to_string(), "hash");
    }

    #[test]
    fn test_reveal_json_shape() {
        let reveal = Reveal::Hmac {
            value: 4,
            key: [0x11; 32],
        };
        let json = serde_json::to_value(&reveal).unwrap();
        assert_eq!(json["scheme"], "hmac");
        assert_eq!(json["value"], 4);
        assert_eq!(json["key"], "11".repeat(32));
    }
}
