//! Cryptographic primitives.
//!
//! Hashing, MAC, constant-time comparison and unbiased secure sampling.
//! Everything above this module builds on these.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{ct_eq_str, Digest256};
pub use rng::{uniform_in_range, RangeError, Secret, SECRET_LEN};
