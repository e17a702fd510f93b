//! Score bookkeeping and trait unlock evaluation.

use log::debug;

use crate::engine::state::PlayerState;
use crate::engine::types::TraitRecord;

/// Trait that amplifies every score delta, positive or negative, by 20%.
pub const TRAIT_AMBITIOUS: &str = "ambitious";

/// Apply a score delta with the trait-conditional multiplier and return the
/// signed-delta log line. Holders of [`TRAIT_AMBITIOUS`] gain
/// `delta + floor(delta * 0.2)`; floor semantics apply to negative deltas
/// too, so penalties sting harder as well.
pub fn apply_score_delta(state: &mut PlayerState, delta: i64, reason: &str) -> String {
    let effective = if state.traits.contains(TRAIT_AMBITIOUS) {
        delta + (delta * 2).div_euclid(10)
    } else {
        delta
    };
    state.score += effective;
    debug!(
        "score {}{} ({}) -> {}",
        if effective >= 0 { "+" } else { "" },
        effective,
        reason,
        state.score
    );
    format!(
        "Score {}{} ({}).",
        if effective >= 0 { "+" } else { "" },
        effective,
        reason
    )
}

/// Evaluate every catalog trait's unlock condition against one immutable
/// state snapshot and return the names newly satisfied. Union semantics:
/// traits already granted are skipped and nothing is ever revoked. Because
/// all conditions see the same snapshot, evaluation order cannot matter.
pub fn check_trait_unlocks(state: &PlayerState, catalog: &[TraitRecord]) -> Vec<String> {
    catalog
        .iter()
        .filter(|record| !state.traits.contains(&record.name))
        .filter(|record| (record.unlock)(state))
        .map(|record| record.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PlayerState {
        PlayerState::new("Dale", "controlnexus")
    }

    #[test]
    fn plain_delta_applies_unmodified() {
        let mut s = state();
        let line = apply_score_delta(&mut s, 10, "test");
        assert_eq!(s.score, 10);
        assert!(line.contains("+10"));
    }

    #[test]
    fn ambitious_trait_amplifies_positive_deltas() {
        let mut s = state();
        s.traits.insert(TRAIT_AMBITIOUS.to_string());
        apply_score_delta(&mut s, 10, "test");
        assert_eq!(s.score, 12);
    }

    #[test]
    fn ambitious_trait_uses_floor_for_negative_deltas() {
        let mut s = state();
        s.traits.insert(TRAIT_AMBITIOUS.to_string());
        // floor(-5 * 0.2) = -1, so -5 becomes -6.
        apply_score_delta(&mut s, -5, "test");
        assert_eq!(s.score, -6);
    }

    #[test]
    fn unlock_check_grants_once_and_only_once() {
        fn always(_: &PlayerState) -> bool {
            true
        }
        let catalog = vec![TraitRecord::new("restless", "Never sits still.", always)];
        let mut s = state();

        let first = check_trait_unlocks(&s, &catalog);
        assert_eq!(first, vec!["restless".to_string()]);
        for name in first {
            s.traits.insert(name);
        }
        // Repeated evaluation on the satisfied state grants nothing new.
        assert!(check_trait_unlocks(&s, &catalog).is_empty());
    }

    #[test]
    fn unlock_conditions_see_one_snapshot() {
        // Two traits whose conditions would interfere if evaluated against a
        // partially-updated state: both must be granted in a single pass.
        fn no_traits_yet(s: &PlayerState) -> bool {
            s.traits.is_empty()
        }
        let catalog = vec![
            TraitRecord::new("first", "d", no_traits_yet),
            TraitRecord::new("second", "d", no_traits_yet),
        ];
        let s = state();
        let granted = check_trait_unlocks(&s, &catalog);
        assert_eq!(granted.len(), 2);
    }
}
