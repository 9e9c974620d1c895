//! Round Orchestration
//!
//! Runs one game round between the system (which draws every committed
//! value) and a participant (the user, behind whatever interface):
//!
//! 1. First move: commit over [0, 1], take the participant's guess, reveal,
//!    verify. A correct guess lets the user choose a die first.
//! 2. First mover chooses a die and rolls, then the other party does the
//!    same. The first mover's die is excluded for the second chooser.
//! 3. Each roll commits over [0, 5]; the participant acknowledges; the
//!    reveal is verified and indexes the roller's die.
//! 4. Higher face wins; equal faces tie.
//!
//! Any failed verification ends the round with [`GameError::Fairness`].
//! It is never retried.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::rng::{self, RangeError};
use crate::game::dice::{DiceError, DiceSet};
use crate::game::events::RoundEvent;
use crate::game::state::{determine_winner, Outcome, Party, RoundState, SelectionError};
use crate::proof::transcript::{DrawPurpose, RoundTranscript};
use crate::proof::verify::{FairnessViolation, Publication, Reveal, Scheme, SealedDraw};

/// Range of the first-move draw.
pub const FIRST_MOVE_RANGE: (i64, i64) = (0, 1);

/// Range of a roll draw (0-based face index).
pub const ROLL_RANGE: (i64, i64) = (0, 5);

/// Game errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// Dice configuration problem.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// A draw was requested over an empty range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A reveal did not match its commitment. The round is void.
    #[error("fairness violation during {purpose:?}: {violation}")]
    Fairness {
        /// Draw that failed.
        purpose: DrawPurpose,
        /// What did not match.
        #[source]
        violation: FairnessViolation,
    },

    /// First-move guesses are 0 or 1.
    #[error("invalid first-move guess {0}: expected 0 or 1")]
    InvalidGuess(u8),

    /// The system could not take a die.
    #[error("system die selection failed: {0}")]
    Selection(#[from] SelectionError),

    /// No die left for the system to choose.
    #[error("no die available for the system")]
    NoDieAvailable,
}

/// Participant's answer to a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    /// Continue with this answer.
    Proceed(T),
    /// Leave the round.
    Quit,
}

/// The user side of a round.
pub trait Participant {
    /// Show an event.
    fn observe(&mut self, event: &RoundEvent);

    /// Guess the committed first-move value (0 or 1).
    fn guess_first_move(&mut self, publication: &Publication) -> Decision<u8>;

    /// Choose a 0-based die index. `available` lists the free dice.
    fn choose_die(&mut self, dice: &DiceSet, available: &[usize]) -> Decision<usize>;

    /// Confirm the reveal of a committed roll may go ahead.
    fn acknowledge_roll(&mut self, party: Party, publication: &Publication) -> Decision<()>;
}

/// The system side: source of every committed draw and of its die choice.
pub trait Dealer {
    /// Draw and commit a value in `[range_start, range_end]`.
    fn draw(&mut self, range_start: i64, range_end: i64) -> Result<SealedDraw, RangeError>;

    /// Pick one of `available` die indices.
    fn pick_die(&mut self, available: &[usize]) -> Option<usize>;
}

/// Honest dealer backed by a secure generator.
#[derive(Debug, Clone)]
pub struct SecureDealer<R = OsRng> {
    scheme: Scheme,
    rng: R,
}

impl SecureDealer<OsRng> {
    /// Dealer using the OS generator.
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme, rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> SecureDealer<R> {
    /// Dealer using a caller-supplied secure generator.
    pub fn with_rng(scheme: Scheme, rng: R) -> Self {
        Self { scheme, rng }
    }

    /// Commitment scheme in use.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }
}

impl<R: RngCore + CryptoRng> Dealer for SecureDealer<R> {
    fn draw(&mut self, range_start: i64, range_end: i64) -> Result<SealedDraw, RangeError> {
        SealedDraw::draw(self.scheme, &mut self.rng, range_start, range_end)
    }

    fn pick_die(&mut self, available: &[usize]) -> Option<usize> {
        rng::choose(&mut self.rng, available).copied()
    }
}

/// Summary of a completed round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// Who chose a die first.
    pub first_mover: Party,
    /// User's die index.
    pub user_die: usize,
    /// System's die index.
    pub system_die: usize,
    /// Face the user rolled.
    pub user_face: i64,
    /// Face the system rolled.
    pub system_face: i64,
    /// Result.
    pub outcome: Outcome,
    /// Every draw of the round.
    pub transcript: RoundTranscript,
}

/// How a round ended without error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Played to the end.
    Completed(RoundReport),
    /// Participant left.
    Quit,
}

/// Play one round.
pub fn play_round<D, P>(
    dice: &DiceSet,
    dealer: &mut D,
    participant: &mut P,
) -> Result<RoundOutcome, GameError>
where
    D: Dealer + ?Sized,
    P: Participant + ?Sized,
{
    Round {
        dice,
        dealer,
        participant,
        state: RoundState::new(),
        transcript: RoundTranscript::new(dice.configurations()),
    }
    .play()
}

struct Round<'a, D: ?Sized, P: ?Sized> {
    dice: &'a DiceSet,
    dealer: &'a mut D,
    participant: &'a mut P,
    state: RoundState,
    transcript: RoundTranscript,
}

/// Result of a committed draw: the participant's answer and the verified
/// opening.
struct Opened<T> {
    answer: T,
    reveal: Reveal,
    value: i64,
}

impl<'a, D, P> Round<'a, D, P>
where
    D: Dealer + ?Sized,
    P: Participant + ?Sized,
{
    fn play(mut self) -> Result<RoundOutcome, GameError> {
        info!(dice = self.dice.len(), "round started");

        let Some(first) = self.first_move()? else {
            return Ok(self.quit());
        };

        let mut faces = [0i64; 2];
        for party in [first, first.opponent()] {
            let Some(die) = self.choose(party)? else {
                return Ok(self.quit());
            };
            let Some(face) = self.roll(party, die)? else {
                return Ok(self.quit());
            };
            faces[party_slot(party)] = face;
        }

        let user_face = faces[party_slot(Party::User)];
        let system_face = faces[party_slot(Party::System)];
        let outcome = determine_winner(user_face, system_face);
        info!(user_face, system_face, ?outcome, "round finished");

        Ok(RoundOutcome::Completed(RoundReport {
            first_mover: first,
            user_die: self.state.die_of(Party::User).unwrap_or_default(),
            system_die: self.state.die_of(Party::System).unwrap_or_default(),
            user_face,
            system_face,
            outcome,
            transcript: self.transcript,
        }))
    }

    fn quit(&self) -> RoundOutcome {
        info!("participant left the round");
        RoundOutcome::Quit
    }

    /// Commit, let the participant act on the publication, reveal, verify.
    fn committed_draw<T>(
        &mut self,
        purpose: DrawPurpose,
        range: (i64, i64),
        announce: impl FnOnce(Publication) -> RoundEvent,
        act: impl FnOnce(&mut P, &Publication) -> Decision<T>,
    ) -> Result<Option<Opened<T>>, GameError> {
        let sealed = self.dealer.draw(range.0, range.1)?;
        let publication = sealed.publication();
        let entry = self
            .transcript
            .record_publication(purpose, range, publication.clone());
        debug!(?purpose, commitment = %publication.commitment, "draw committed");
        self.participant.observe(&announce(publication.clone()));

        let answer = match act(&mut *self.participant, &publication) {
            Decision::Proceed(answer) => answer,
            Decision::Quit => return Ok(None),
        };

        let reveal = sealed.reveal();
        self.transcript.record_reveal(entry, reveal.clone());

        let value = reveal
            .verify_in_range(&publication, range.0, range.1)
            .map_err(|violation| {
                error!(?purpose, %violation, "commitment verification failed");
                GameError::Fairness { purpose, violation }
            })?;
        debug!(?purpose, value, "draw revealed and verified");

        Ok(Some(Opened {
            answer,
            reveal,
            value,
        }))
    }

    fn first_move(&mut self) -> Result<Option<Party>, GameError> {
        let opened = self.committed_draw(
            DrawPurpose::FirstMove,
            FIRST_MOVE_RANGE,
            |publication| RoundEvent::FirstMoveCommitted { publication },
            |participant, publication| participant.guess_first_move(publication),
        );

        // The reveal is verified before the guess is validated.
        let Some(Opened {
            answer: guess,
            reveal,
            value,
        }) = opened?
        else {
            return Ok(None);
        };

        if guess > 1 {
            return Err(GameError::InvalidGuess(guess));
        }

        let first = if value == i64::from(guess) {
            Party::User
        } else {
            Party::System
        };
        info!(%first, "first mover decided");
        self.participant.observe(&RoundEvent::FirstMoveRevealed {
            reveal,
            guess,
            first,
        });
        Ok(Some(first))
    }

    fn choose(&mut self, party: Party) -> Result<Option<usize>, GameError> {
        let index = match party {
            Party::System => {
                let available = self.state.available(self.dice, party);
                let index = self
                    .dealer
                    .pick_die(&available)
                    .ok_or(GameError::NoDieAvailable)?;
                self.state.claim(self.dice, party, index)?;
                index
            }
            Party::User => loop {
                let available = self.state.available(self.dice, party);
                let index = match self.participant.choose_die(self.dice, &available) {
                    Decision::Proceed(index) => index,
                    Decision::Quit => return Ok(None),
                };
                match self.state.claim(self.dice, party, index) {
                    Ok(()) => break index,
                    Err(error) => {
                        warn!(%error, "die selection rejected");
                        self.participant
                            .observe(&RoundEvent::SelectionRejected { party, error });
                    }
                }
            },
        };

        debug!(%party, index, "die chosen");
        self.participant
            .observe(&RoundEvent::DieChosen { party, index });
        Ok(Some(index))
    }

    fn roll(&mut self, party: Party, die_index: usize) -> Result<Option<i64>, GameError> {
        let purpose = match party {
            Party::User => DrawPurpose::UserRoll,
            Party::System => DrawPurpose::SystemRoll,
        };

        let opened = self.committed_draw(
            purpose,
            ROLL_RANGE,
            |publication| RoundEvent::RollCommitted { party, publication },
            |participant, publication| participant.acknowledge_roll(party, publication),
        )?;
        let Some(Opened { reveal, value, .. }) = opened else {
            return Ok(None);
        };

        // Both lookups succeed: the die was claimed from this set and the
        // value was verified to lie in ROLL_RANGE.
        let face = self
            .dice
            .get(die_index)
            .and_then(|die| die.face(value as usize))
            .ok_or_else(|| GameError::Fairness {
                purpose,
                violation: FairnessViolation::OutOfRange {
                    value,
                    start: ROLL_RANGE.0,
                    end: ROLL_RANGE.1,
                },
            })?;

        info!(%party, face, "roll resolved");
        self.participant.observe(&RoundEvent::RollRevealed {
            party,
            reveal,
            face,
        });
        Ok(Some(face))
    }
}

#[inline]
fn party_slot(party: Party) -> usize {
    match party {
        Party::User => 0,
        Party::System => 1,
    }
}
