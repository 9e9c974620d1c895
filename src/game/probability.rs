//! Exact Win Probabilities
//!
//! Counts face pairs instead of simulating, so results are exact rationals
//! and identical on every run.
//!
//! ## Ties
//!
//! A pair of equal faces is a win for neither die. For dice with repeated or
//! shared faces `P(a beats b) + P(b beats a) < 1`, which is expected for
//! non-transitive sets.
//!
//! ## Diagonal
//!
//! The matrix does not compare a die with itself. Its diagonal holds
//! [`DIAGONAL_CONVENTION`] (1/3), a display convention rather than a
//! computed value. It coincides with the formula only for dice whose faces
//! come in three distinct pairs, such as `2,2,4,4,9,9`.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::game::dice::{DiceSet, Die};

/// Exact probability as `wins / total`.
///
/// Comparison and equality are by value: `12/36 == 1/3`. `total` is never
/// zero and `wins` never exceeds it.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct WinProbability {
    wins: u32,
    total: u32,
}

/// Value shown on the matrix diagonal.
pub const DIAGONAL_CONVENTION: WinProbability = WinProbability { wins: 1, total: 3 };

impl WinProbability {
    /// `wins / total`, or `None` when `total` is zero or below `wins`.
    pub const fn new(wins: u32, total: u32) -> Option<Self> {
        if total == 0 || wins > total {
            return None;
        }
        Some(Self { wins, total })
    }

    /// Favorable face pairs.
    #[inline]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// All face pairs considered.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Floating-point view, for display only.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.wins as f64 / self.total as f64
    }

    /// Same probability in lowest terms.
    pub fn reduced(&self) -> Self {
        let divisor = gcd(self.wins, self.total);
        Self {
            wins: self.wins / divisor,
            total: self.total / divisor,
        }
    }

    /// Strictly better than a coin flip.
    #[inline]
    pub fn favors(&self) -> bool {
        self.wins as u64 * 2 > self.total as u64
    }
}

impl PartialEq for WinProbability {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WinProbability {}

impl PartialOrd for WinProbability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WinProbability {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.wins as u64 * other.total as u64;
        let rhs = other.wins as u64 * self.total as u64;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.as_f64())
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Probability that a uniformly random face of `a` beats one of `b`.
pub fn win_probability(a: &Die, b: &Die) -> WinProbability {
    let wins = a
        .faces()
        .iter()
        .flat_map(|fa| b.faces().iter().map(move |fb| (fa, fb)))
        .filter(|(fa, fb)| fa > fb)
        .count();

    WinProbability {
        wins: wins as u32,
        total: (a.faces().len() * b.faces().len()) as u32,
    }
}

/// Pairwise probabilities for a dice set: `get(i, j)` = P(die i beats die j).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbabilityMatrix {
    cells: Vec<Vec<WinProbability>>,
}

impl ProbabilityMatrix {
    /// Side length.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a matrix with no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell `(row, column)`.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<WinProbability> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Whether a cell holds the diagonal convention rather than a count.
    #[inline]
    pub fn is_convention(&self, row: usize, column: usize) -> bool {
        row == column
    }

    /// Rows in dice order.
    pub fn rows(&self) -> &[Vec<WinProbability>] {
        &self.cells
    }
}

/// Build the full matrix for `dice`. Diagonal cells carry
/// [`DIAGONAL_CONVENTION`].
pub fn probability_matrix(dice: &DiceSet) -> ProbabilityMatrix {
    let cells = dice
        .iter()
        .enumerate()
        .map(|(i, row_die)| {
            dice.iter()
                .enumerate()
                .map(|(j, column_die)| {
                    if i == j {
                        DIAGONAL_CONVENTION
                    } else {
                        win_probability(row_die, column_die)
                    }
                })
                .collect()
        })
        .collect();

    ProbabilityMatrix { cells }
}
