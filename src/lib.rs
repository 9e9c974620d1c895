//! # Fair Dice
//!
//! Provably fair non-transitive dice game. Every random value the system
//! uses is committed before the player acts and revealed afterwards, so the
//! player can check the system never changed its mind.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         FAIR DICE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Cryptographic primitives                  │
//! │  ├── hash.rs     - SHA-256, HMAC-SHA256, constant-time eq    │
//! │  └── rng.rs      - Unbiased secure range sampling            │
//! │                                                              │
//! │  proof/          - Commit-reveal                             │
//! │  ├── mac.rs      - HMAC commitment (canonical)               │
//! │  ├── commitment.rs - Hash commitment (alternate)             │
//! │  ├── verify.rs   - Publication / reveal / verification       │
//! │  └── transcript.rs - Per-round draw record                   │
//! │                                                              │
//! │  game/           - Game logic (no terminal I/O)              │
//! │  ├── dice.rs     - Die and dice-set validation               │
//! │  ├── probability.rs - Exact pairwise win probabilities       │
//! │  ├── state.rs    - Die ownership and scoring                 │
//! │  ├── input.rs    - Prompt parsing                            │
//! │  ├── events.rs   - Round events                              │
//! │  └── round.rs    - Round orchestration                       │
//! │                                                              │
//! │  config.rs       - Environment configuration                 │
//! │  console.rs      - Terminal front end                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! - Values are drawn from the OS CSPRNG with rejection sampling (no modulo bias)
//! - Each draw is committed with a fresh 256-bit key before the player acts
//! - Commitments are compared in constant time
//! - A reveal that does not verify aborts the round; it is never retried

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod core;
pub mod game;
pub mod proof;

// Re-export commonly used types
pub use config::GameConfig;
pub use game::dice::{DiceError, DiceSet, Die};
pub use game::probability::{probability_matrix, win_probability, WinProbability};
pub use game::round::{play_round, GameError, RoundOutcome, SecureDealer};
pub use proof::commitment::{commit, verify};
pub use proof::mac::{commit_mac, verify_mac};
pub use proof::verify::{FairnessViolation, Scheme};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
