//! Weighted categorical sampling.
//!
//! A table is an ordered list of (outcome, mass) pairs plus a residual
//! outcome. The first outcome whose running cumulative mass exceeds the
//! draw wins; if none does, the residual wins. Masses need not sum to 1.
//! Table order is significant and must be preserved as authored.

use crate::rng::Draw;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightTable<O> {
    pub entries: Vec<(O, f64)>,
    pub residual: O,
}

impl<O: Copy> WeightTable<O> {
    pub fn new(entries: Vec<(O, f64)>, residual: O) -> Self {
        Self { entries, residual }
    }

    /// Sum of all listed masses (excluding the residual's implicit share).
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, mass)| mass).sum()
    }

    /// Every outcome this table can return, in table order, residual last.
    pub fn outcomes(&self) -> Vec<O> {
        self.entries
            .iter()
            .map(|(outcome, _)| *outcome)
            .chain(std::iter::once(self.residual))
            .collect()
    }

    pub fn sample(&self, draw: Draw) -> O {
        sample(draw, self)
    }
}

/// Always returns a member of the table: the residual makes this total.
pub fn sample<O: Copy>(draw: Draw, weights: &WeightTable<O>) -> O {
    let mut cumulative = 0.0;
    for (outcome, mass) in &weights.entries {
        cumulative += mass;
        if draw < cumulative {
            return *outcome;
        }
    }
    weights.residual
}
