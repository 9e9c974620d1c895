//! Round Transcript
//!
//! Ordered record of every publication and reveal made during one round.
//! Exported as JSON so a player can re-check every draw offline with
//! [`RoundTranscript::verify`]. Only completed rounds are exported, so
//! every entry is expected to carry its reveal.

use serde::{Deserialize, Serialize};

use crate::proof::verify::{FairnessViolation, Publication, Reveal};

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// What a draw decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPurpose {
    /// Who picks a die first, over [0, 1].
    FirstMove,
    /// Face index of the user's roll, over [0, 5].
    UserRoll,
    /// Face index of the system's roll, over [0, 5].
    SystemRoll,
}

/// One committed draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// What the draw was for.
    pub purpose: DrawPurpose,
    /// Inclusive range the value was drawn from.
    pub range: (i64, i64),
    /// Commitment shown before the reveal.
    pub publication: Publication,
    /// Opening, once disclosed.
    pub reveal: Option<Reveal>,
}

/// All draws of a round, in publication order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    /// Version for forward compatibility.
    pub version: u8,
    /// Dice configurations in play, as entered.
    pub dice: Vec<String>,
    /// Draws.
    pub entries: Vec<TranscriptEntry>,
}

impl RoundTranscript {
    /// Start an empty transcript for the given dice.
    pub fn new(dice: Vec<String>) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            dice,
            entries: Vec::new(),
        }
    }

    /// Record a publication. Returns the entry index for the later reveal.
    pub fn record_publication(
        &mut self,
        purpose: DrawPurpose,
        range: (i64, i64),
        publication: Publication,
    ) -> usize {
        self.entries.push(TranscriptEntry {
            purpose,
            range,
            publication,
            reveal: None,
        });
        self.entries.len() - 1
    }

    /// Attach the reveal for a previously recorded publication.
    pub fn record_reveal(&mut self, index: usize, reveal: Reveal) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.reveal = Some(reveal);
        }
    }

    /// Re-verify every draw, including that each value lies in its declared
    /// range. A draw that was published but never revealed fails.
    pub fn verify(&self) -> Result<(), TranscriptViolation> {
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(reveal) = &entry.reveal else {
                return Err(TranscriptViolation::Unrevealed { index });
            };

            let (start, end) = entry.range;
            reveal
                .verify_in_range(&entry.publication, start, end)
                .map_err(|violation| TranscriptViolation::Entry { index, violation })?;
        }
        Ok(())
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a transcript previously produced by [`Self::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A transcript failed re-verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptViolation {
    /// Reveal does not match its publication or range.
    #[error("transcript entry {index}: {violation}")]
    Entry {
        /// Entry position.
        index: usize,
        /// What went wrong.
        violation: FairnessViolation,
    },

    /// Publication with no reveal.
    #[error("transcript entry {index} was published but never revealed")]
    Unrevealed {
        /// Entry position.
        index: usize,
    },
}
