//! Deterministic draw generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! Every draw is recomputed from (seed, offset) on demand; there is no
//! generator object carrying state between draws. This means:
//!   - Draws can be evaluated in any order and still agree.
//!   - Two call sites rendering the same identifier never diverge.

use crate::types::Seed;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A value in [0.0, 1.0).
pub type Draw = f64;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Single linear-congruential step: `(seed * 9301 + 49297) mod 233280`,
/// scaled into [0, 1).
pub fn next_draw(seed: Seed) -> Draw {
    // Reducing first keeps the multiply far from u64 overflow and does
    // not change the result.
    let raw = ((seed % LCG_MODULUS) * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    raw as f64 / LCG_MODULUS as f64
}

/// Draw for `base + offset`. Offsets are assigned once and never change.
pub fn draw_at(base: Seed, offset: u64) -> Draw {
    next_draw(base.wrapping_add(offset))
}

/// Map a draw onto an index in [0, len). `len` must be > 0.
pub fn index_for(draw: Draw, len: usize) -> usize {
    debug_assert!(len > 0, "len must be > 0");
    ((draw * len as f64) as usize).min(len.saturating_sub(1))
}

/// Fisher–Yates shuffle keyed on a draw, so the ordering is as
/// reproducible as the draw itself.
pub fn shuffle_with<T>(items: &mut [T], key: Draw) {
    let mut rng = Pcg64Mcg::seed_from_u64(key.to_bits());
    items.shuffle(&mut rng);
}
