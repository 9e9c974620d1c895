//! Round State
//!
//! Who plays which die, and how a pair of faces is scored.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::dice::DiceSet;

/// One side of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    /// The human player.
    User,
    /// The program.
    System,
}

impl Party {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Self::User => Self::System,
            Self::System => Self::User,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::System => f.write_str("system"),
        }
    }
}

/// Rejected die selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No die at this index.
    #[error("there is no die {index} (choose between 0 and {max})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Largest valid index.
        max: usize,
    },

    /// The die is already taken this round.
    #[error("die {index} was already chosen by the {owner}")]
    AlreadyClaimed {
        /// Requested index.
        index: usize,
        /// Party holding it.
        owner: Party,
    },

    /// This party already holds a die.
    #[error("the {party} has already chosen a die")]
    AlreadyChosen {
        /// Party that tried to choose twice.
        party: Party,
    },
}

/// Dice claimed so far in the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    user_die: Option<usize>,
    system_die: Option<usize>,
}

impl RoundState {
    /// Empty round.
    pub fn new() -> Self {
        Self::default()
    }

    /// Die held by `party`, if any.
    pub fn die_of(&self, party: Party) -> Option<usize> {
        match party {
            Party::User => self.user_die,
            Party::System => self.system_die,
        }
    }

    /// Die the given party may not pick because the opponent holds it.
    pub fn excluded_for(&self, party: Party) -> Option<usize> {
        self.die_of(party.opponent())
    }

    /// Indices `party` may still choose from.
    pub fn available(&self, dice: &DiceSet, party: Party) -> Vec<usize> {
        let excluded = self.excluded_for(party);
        (0..dice.len()).filter(|i| Some(*i) != excluded).collect()
    }

    /// Claim die `index` for `party`.
    ///
    /// Invalid or already-claimed indices are rejected as-is, never adjusted.
    pub fn claim(
        &mut self,
        dice: &DiceSet,
        party: Party,
        index: usize,
    ) -> Result<(), SelectionError> {
        if index >= dice.len() {
            return Err(SelectionError::OutOfRange {
                index,
                max: dice.len().saturating_sub(1),
            });
        }
        if self.die_of(party).is_some() {
            return Err(SelectionError::AlreadyChosen { party });
        }
        if self.excluded_for(party) == Some(index) {
            return Err(SelectionError::AlreadyClaimed {
                index,
                owner: party.opponent(),
            });
        }

        match party {
            Party::User => self.user_die = Some(index),
            Party::System => self.system_die = Some(index),
        }
        Ok(())
    }
}

/// Result of comparing the two rolled faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// User's face is strictly higher.
    UserWins,
    /// System's face is strictly higher.
    SystemWins,
    /// Equal faces. No tiebreak is played.
    Tie,
}

impl Outcome {
    /// Winning party, if any.
    pub fn winner(self) -> Option<Party> {
        match self {
            Self::UserWins => Some(Party::User),
            Self::SystemWins => Some(Party::System),
            Self::Tie => None,
        }
    }
}

/// Score a round from the two faces rolled.
pub fn determine_winner(user_face: i64, system_face: i64) -> Outcome {
    use std::cmp::Ordering::*;
    match user_face.cmp(&system_face) {
        Greater => Outcome::UserWins,
        Less => Outcome::SystemWins,
        Equal => Outcome::Tie,
    }
}
