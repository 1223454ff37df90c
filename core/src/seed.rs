//! Seed derivation: identifier string -> stable 32-bit seed.
//!
//! Rolling `acc * 31 + code` hash over UTF-16 code units with i32
//! wraparound at every step, then the absolute value. Not
//! cryptographic; collisions between unrelated identifiers are fine.

use crate::types::Seed;

pub fn derive_seed(identifier: &str) -> Seed {
    let acc = identifier.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    // i32::MIN has no positive i32 counterpart, so widen first.
    u64::from(acc.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_yields_zero() {
        assert_eq!(derive_seed(""), 0);
    }

    #[test]
    fn pinned_application_seeds() {
        assert_eq!(derive_seed("APP-001"), 76_200_859);
        assert_eq!(derive_seed("APP-002"), 76_200_858);
        assert_eq!(derive_seed("default"), 1_544_803_905);
        assert_eq!(derive_seed("a"), 97);
    }

    #[test]
    fn seed_is_stable_across_calls() {
        for id in ["APP-001", "BIZ-2024-0042", "Ünïcødé ✓", ""] {
            assert_eq!(derive_seed(id), derive_seed(id), "seed drifted for {id:?}");
        }
    }

    #[test]
    fn long_identifiers_wrap_without_panicking() {
        let id = "X".repeat(10_000);
        assert!(derive_seed(&id) <= 1u64 << 31);
    }
}
