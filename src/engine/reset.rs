//! Multiverse reset cycles: a counted, bounded state-clearing event.
//!
//! The partition between what a reset clears and what it preserves is an
//! explicit contract (tested in `tests/reset_cycles.rs`):
//!
//! - **Soft reset** clears inventory, flags, unlocked exits, and NPC
//!   memory/mood, and restores vitals. It preserves score, traits, visited
//!   rooms, the current room, and the cycle counter.
//! - **Full reset** does everything a soft reset does, zeroes the score,
//!   clears visited rooms, and returns the player to the starting room.
//!
//! The cycle counter itself is monotonic and survives every reset.

use serde::{Deserialize, Serialize};

use crate::engine::state::{PlayerState, Vitals};

/// Every Nth press of the reset button escalates to a full reset.
pub const FULL_RESET_EVERY: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetKind {
    SoftReset,
    FullReset,
}

/// Decide what the next press of the reset button does, given the presses
/// so far. Presses 1 through 6 are soft; the 7th (and every 7th after) is
/// full.
pub fn next_reset_kind(presses_so_far: u32) -> ResetKind {
    if (presses_so_far + 1) % FULL_RESET_EVERY == 0 {
        ResetKind::FullReset
    } else {
        ResetKind::SoftReset
    }
}

/// Apply a reset to the state, incrementing the cycle counter, and return
/// the player-facing line.
pub fn apply_reset(state: &mut PlayerState, kind: ResetKind, start_room: &str) -> String {
    state.reset_count += 1;

    state.inventory.clear();
    state.flags.clear();
    state.unlocked_exits.clear();
    state.npc_memory.clear();
    state.vitals = Vitals::default();

    match kind {
        ResetKind::SoftReset => format!(
            "The multiverse shudders and settles. Cycle {} begins.",
            state.reset_count
        ),
        ResetKind::FullReset => {
            state.score = 0;
            state.visited_rooms.clear();
            state.previous_room = Some(state.current_room.clone());
            state.current_room = start_room.to_string();
            state.visited_rooms.insert(start_room.to_string());
            format!(
                "Everything comes apart and reassembles. Cycle {}: you are back where it all began.",
                state.reset_count
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::FlagValue;

    #[test]
    fn presses_one_through_six_are_soft_the_seventh_is_full() {
        for presses in 0..6 {
            assert_eq!(next_reset_kind(presses), ResetKind::SoftReset, "press {}", presses + 1);
        }
        assert_eq!(next_reset_kind(6), ResetKind::FullReset);
        // The cycle repeats.
        assert_eq!(next_reset_kind(7), ResetKind::SoftReset);
        assert_eq!(next_reset_kind(13), ResetKind::FullReset);
    }

    #[test]
    fn soft_reset_clears_the_documented_subset() {
        let mut state = PlayerState::new("Dale", "controlnexus");
        state.current_room = "greasystoon".to_string();
        state.inventory.insert("coffee".to_string());
        state
            .flags
            .insert("debug".to_string(), FlagValue::Bool(true));
        state.score = 90;
        state.traits.insert("seeker".to_string());
        state.visited_rooms.insert("greasystoon".to_string());
        state.vitals.health = 10;

        apply_reset(&mut state, ResetKind::SoftReset, "controlnexus");

        assert!(state.inventory.is_empty());
        assert!(state.flags.is_empty());
        assert_eq!(state.vitals.health, 100);
        // Preserved partition.
        assert_eq!(state.score, 90);
        assert!(state.traits.contains("seeker"));
        assert!(state.visited_rooms.contains("greasystoon"));
        assert_eq!(state.current_room, "greasystoon");
        assert_eq!(state.reset_count, 1);
    }

    #[test]
    fn full_reset_also_returns_the_player_home() {
        let mut state = PlayerState::new("Dale", "controlnexus");
        state.current_room = "greasystoon".to_string();
        state.score = 90;
        state.traits.insert("seeker".to_string());
        state.reset_count = 6;

        apply_reset(&mut state, ResetKind::FullReset, "controlnexus");

        assert_eq!(state.current_room, "controlnexus");
        assert_eq!(state.score, 0);
        assert!(state.traits.contains("seeker"), "traits survive a full reset");
        assert_eq!(state.reset_count, 7, "the counter is never lost");
        assert_eq!(state.visited_rooms.len(), 1);
    }
}
