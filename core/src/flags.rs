//! Qualifier flags attached to non-passing checks.
//!
//! A passed check never carries flags, whatever the draw. Otherwise the
//! draw picks one phrase group and a count of 1..=3 phrases from it.

use crate::{
    rng::{index_for, shuffle_with, Draw},
    types::CheckStatus,
};
use serde::{Deserialize, Serialize};

pub const MAX_FLAGS: usize = 3;

/// A named pool of flag phrases, one per check category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlagGroup {
    pub name: String,
    pub phrases: Vec<String>,
}

/// Select flags for a check outcome, in authored phrase order.
pub fn select_flags(draw: Draw, outcome: CheckStatus, groups: &[FlagGroup]) -> Vec<String> {
    if outcome == CheckStatus::Passed || groups.is_empty() {
        return Vec::new();
    }

    // Group and count share one draw: the first group always yields one
    // flag and the last group always yields three.
    let group = &groups[index_for(draw, groups.len())];
    let count = ((draw * MAX_FLAGS as f64) as usize + 1).min(MAX_FLAGS);

    group.phrases.iter().take(count).cloned().collect()
}

/// Select flags, then order them with a keyed shuffle.
pub fn select_flags_ordered(
    draw: Draw,
    order_key: Draw,
    outcome: CheckStatus,
    groups: &[FlagGroup],
) -> Vec<String> {
    let mut flags = select_flags(draw, outcome, groups);
    shuffle_with(&mut flags, order_key);
    flags
}
