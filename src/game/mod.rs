//! Game Logic Module
//!
//! Dice, odds, selection rules and the round flow. No terminal I/O.
//!
//! ## Module Structure
//!
//! - `dice`: Die and dice-set parsing and validation
//! - `probability`: Exact pairwise win probabilities
//! - `state`: Parties, die ownership, winner rule
//! - `input`: Prompt-line parsing
//! - `events`: What a round reports as it unfolds
//! - `round`: Round orchestration over a dealer and a participant

pub mod dice;
pub mod events;
pub mod input;
pub mod probability;
pub mod round;
pub mod state;

// Re-export key types
pub use dice::{DiceError, DiceSet, Die};
pub use events::RoundEvent;
pub use probability::{probability_matrix, win_probability, ProbabilityMatrix, WinProbability};
pub use round::{
    play_round, Dealer, Decision, GameError, Participant, RoundOutcome, RoundReport, SecureDealer,
};
pub use state::{determine_winner, Outcome, Party, RoundState, SelectionError};
