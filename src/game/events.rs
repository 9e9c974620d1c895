//! Round Events
//!
//! What the orchestrator tells the participant as a round unfolds. Every
//! reveal carries the full opening so the participant can check it
//! independently.

use crate::game::state::{Party, SelectionError};
use crate::proof::verify::{Publication, Reveal};

/// Something the participant should be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    /// The first-move value over [0, 1] is committed.
    FirstMoveCommitted {
        /// Published commitment.
        publication: Publication,
    },

    /// The first-move value is revealed and verified.
    FirstMoveRevealed {
        /// Opening.
        reveal: Reveal,
        /// Participant's guess.
        guess: u8,
        /// Who picks a die first.
        first: Party,
    },

    /// A party took a die.
    DieChosen {
        /// Chooser.
        party: Party,
        /// 0-based die index.
        index: usize,
    },

    /// A selection was refused; the chooser is asked again.
    SelectionRejected {
        /// Chooser.
        party: Party,
        /// Reason.
        error: SelectionError,
    },

    /// A roll over [0, 5] is committed.
    RollCommitted {
        /// Roller.
        party: Party,
        /// Published commitment.
        publication: Publication,
    },

    /// A roll is revealed and verified.
    RollRevealed {
        /// Roller.
        party: Party,
        /// Opening; its value is the face index.
        reveal: Reveal,
        /// Face value landed on.
        face: i64,
    },
}
