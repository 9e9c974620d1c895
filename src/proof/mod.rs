//! Fair Value Generation
//!
//! Commit-reveal draws that let the counterpart check, after the fact, that a
//! value was fixed before it was shown.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FAIR VALUE GENERATOR                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  mac.rs          - HMAC-SHA256 commitment (canonical)        │
//! │  commitment.rs   - SHA-256 value‖nonce‖key commitment        │
//! │  verify.rs       - Scheme-agnostic publish/reveal/verify     │
//! │  transcript.rs   - Per-round record of draws, JSON export    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this module logs; callers decide what to show and when.

pub mod commitment;
pub mod mac;
pub mod transcript;
pub mod verify;

pub use commitment::{commit, commit_with, HashCommitment};
pub use mac::{commit_mac, commit_mac_with, verify_mac, MacCommitment};
pub use transcript::{DrawPurpose, RoundTranscript, TranscriptEntry, TranscriptViolation};
pub use verify::{FairnessViolation, Publication, Reveal, Scheme, SealedDraw, UnknownScheme};
