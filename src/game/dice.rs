//! Dice and Dice Sets
//!
//! A die is exactly six signed faces; a set holds at least three dice and
//! identifies them by position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faces on every die.
pub const FACES: usize = 6;

/// Minimum dice needed to play.
pub const MIN_DICE: usize = 3;

/// Dice configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// Face list has the wrong length.
    #[error("invalid die configuration '{input}': expected 6 faces, got {count}")]
    WrongFaceCount {
        /// Input as given.
        input: String,
        /// Faces found.
        count: usize,
    },

    /// A face is not an integer.
    #[error("invalid die configuration '{input}': face '{face}' is not an integer")]
    NonIntegerFace {
        /// Input as given.
        input: String,
        /// Offending face text.
        face: String,
    },

    /// Fewer dice than the game needs.
    #[error("at least 3 dice configurations are required, got {count}")]
    InsufficientDiceCount {
        /// Dice supplied.
        count: usize,
    },
}

/// A six-sided die with arbitrary integer faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    faces: [i64; FACES],
}

impl Die {
    /// Build a die from exactly six faces.
    pub const fn new(faces: [i64; FACES]) -> Self {
        Self { faces }
    }

    /// Build a die from a face list of unknown length.
    pub fn from_faces(faces: &[i64]) -> Result<Self, DiceError> {
        let faces: [i64; FACES] = faces.try_into().map_err(|_| DiceError::WrongFaceCount {
            input: join_faces(faces),
            count: faces.len(),
        })?;
        Ok(Self { faces })
    }

    /// Face values in order.
    #[inline]
    pub fn faces(&self) -> &[i64; FACES] {
        &self.faces
    }

    /// Face at a 0-based roll index.
    #[inline]
    pub fn face(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }
}

impl FromStr for Die {
    type Err = DiceError;

    /// Parse `"2,2,4,4,9,9"`. Whitespace around faces is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut faces = Vec::with_capacity(FACES);
        for part in s.split(',') {
            let part = part.trim();
            let face = part.parse::<i64>().map_err(|_| DiceError::NonIntegerFace {
                input: s.to_string(),
                face: part.to_string(),
            })?;
            faces.push(face);
        }

        let count = faces.len();
        Self::from_faces(&faces).map_err(|_| DiceError::WrongFaceCount {
            input: s.to_string(),
            count,
        })
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_faces(&self.faces))
    }
}

fn join_faces(faces: &[i64]) -> String {
    faces
        .iter()
        .map(|face| face.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Ordered dice in play. Index is the public identifier of a die.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    /// Wrap dice, requiring at least [`MIN_DICE`].
    pub fn new(dice: Vec<Die>) -> Result<Self, DiceError> {
        if dice.len() < MIN_DICE {
            return Err(DiceError::InsufficientDiceCount { count: dice.len() });
        }
        Ok(Self { dice })
    }

    /// Parse one configuration string per die.
    ///
    /// The count is checked before any die is parsed, so too few arguments
    /// report `InsufficientDiceCount` even if they are also malformed.
    pub fn parse<I, S>(configs: I) -> Result<Self, DiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let configs: Vec<S> = configs.into_iter().collect();
        if configs.len() < MIN_DICE {
            return Err(DiceError::InsufficientDiceCount {
                count: configs.len(),
            });
        }

        let dice = configs
            .iter()
            .map(|config| config.as_ref().parse::<Die>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    /// Number of dice.
    #[inline]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// Always false for a constructed set; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Die at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// All dice in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.dice.iter()
    }

    /// Configuration strings, as they would be typed on the command line.
    pub fn configurations(&self) -> Vec<String> {
        self.dice.iter().map(Die::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a DiceSet {
    type Item = &'a Die;
    type IntoIter = std::slice::Iter<'a, Die>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}
