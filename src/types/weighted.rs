//! Weighted random selection
//!
//! Two layers: [`weighted_choice`] picks from any `(value, weight)` slice, and
//! [`WeightedVariant`] attaches a probability table to an enumeration so every
//! variant's frequency is declared next to the type and checked at startup.

use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;
use std::fmt;
use thiserror::Error;

/// Tolerance used when checking that a probability table sums to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Problems found in a weight table
#[derive(Debug, Error, PartialEq)]
pub enum WeightTableError {
    /// The table has no entries
    #[error("weight table '{table}' is empty")]
    Empty {
        /// Table name
        table: &'static str,
    },

    /// An entry has a zero, negative or non-finite weight
    #[error("weight table '{table}' has invalid weight {weight} for {variant}")]
    InvalidWeight {
        /// Table name
        table: &'static str,
        /// Offending variant
        variant: String,
        /// Offending weight
        weight: f64,
    },

    /// Weights do not add up to one
    #[error("weight table '{table}' sums to {total}, expected 1.0")]
    BadTotal {
        /// Table name
        table: &'static str,
        /// Actual total
        total: f64,
    },

    /// A variant has no weight entry
    #[error("weight table '{table}' does not cover {variant}")]
    MissingVariant {
        /// Table name
        table: &'static str,
        /// Uncovered variant
        variant: String,
    },

    /// A variant appears more than once
    #[error("weight table '{table}' lists {variant} more than once")]
    DuplicateVariant {
        /// Table name
        table: &'static str,
        /// Repeated variant
        variant: String,
    },
}

/// Pick a value with probability proportional to its weight
///
/// Returns `None` for an empty slice or one whose weights are all zero.
pub fn weighted_choice<'a, T>(rng: &mut dyn RngCore, choices: &'a [(T, f64)]) -> Option<&'a T> {
    let index = WeightedIndex::new(choices.iter().map(|(_, weight)| *weight)).ok()?;
    choices.get(index.sample(rng)).map(|(value, _)| value)
}

/// An enumeration sampled from a fixed probability table
pub trait WeightedVariant: Sized + Copy + PartialEq + fmt::Debug + 'static {
    /// Name used in validation errors
    const TABLE_NAME: &'static str;
    /// Every variant of the enumeration
    const ALL: &'static [Self];
    /// Probability of each variant; must cover `ALL` exactly once and sum to one
    const WEIGHTS: &'static [(Self, f64)];

    /// Draw one variant
    fn sample(rng: &mut dyn RngCore) -> Self {
        weighted_choice(rng, Self::WEIGHTS).copied().unwrap_or(Self::ALL[0])
    }

    /// Check the table against the variant list
    fn validate_weights() -> Result<(), WeightTableError> {
        validate_table(Self::TABLE_NAME, Self::ALL, Self::WEIGHTS)
    }
}

/// Check that `weights` covers every entry of `all` exactly once with positive
/// weights summing to one
pub fn validate_table<T: Copy + PartialEq + fmt::Debug>(
    table: &'static str,
    all: &[T],
    weights: &[(T, f64)],
) -> Result<(), WeightTableError> {
    if weights.is_empty() || all.is_empty() {
        return Err(WeightTableError::Empty { table });
    }

    for (variant, weight) in weights {
        if !weight.is_finite() || *weight <= 0.0 {
            return Err(WeightTableError::InvalidWeight {
                table,
                variant: format!("{:?}", variant),
                weight: *weight,
            });
        }
    }

    for variant in all {
        match weights.iter().filter(|(v, _)| v == variant).count() {
            0 => {
                return Err(WeightTableError::MissingVariant {
                    table,
                    variant: format!("{:?}", variant),
                })
            }
            1 => {}
            _ => {
                return Err(WeightTableError::DuplicateVariant {
                    table,
                    variant: format!("{:?}", variant),
                })
            }
        }
    }

    let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(WeightTableError::BadTotal { table, total });
    }

    Ok(())
}
