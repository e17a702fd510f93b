//! Latent per-room traps with an arm/fire/disarm lifecycle driven by the
//! engine's logical clock.
//!
//! Traps are session-scoped: they are seeded once per session from the
//! injected random source and are not part of the save snapshot. Countdowns
//! are deferred single-shot events that re-validate "is the player still in
//! this room" at fire time, so leaving a room is an implicit cancellation.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::state::{Intent, PlayerState, Vital, FLAG_DEBUG, FLAG_GODMODE};

/// Logical ticks between arming and firing.
pub const TRAP_DELAY_TICKS: u64 = 3;
/// Health lost when a trap fires for real.
pub const TRAP_DAMAGE: i64 = 25;
/// Roughly one room in six carries a trap.
const TRAP_DENSITY_DIVISOR: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapStatus {
    /// Trap present but the player has not entered the room yet.
    Seeded,
    /// Countdown running; fires when the clock reaches `deadline`.
    Armed { deadline: u64 },
    /// Permanently defused. Never re-arms this session.
    Disarmed,
    /// Already fired. Never re-arms this session.
    Triggered,
}

/// All trap state for one session.
#[derive(Debug, Default)]
pub struct TrapSystem {
    traps: BTreeMap<String, TrapStatus>,
}

impl TrapSystem {
    /// Seed traps onto `floor(len / 6)` rooms chosen uniformly without
    /// replacement from the given ids. With `disabled` no traps are seeded
    /// at all. Deterministic for a seeded rng.
    pub fn seed<R: Rng>(room_ids: &[String], rng: &mut R, disabled: bool) -> Self {
        let mut system = Self::default();
        if disabled {
            info!("trap seeding disabled; world is safe");
            return system;
        }
        let count = room_ids.len() / TRAP_DENSITY_DIVISOR;
        let chosen = room_ids
            .choose_multiple(rng, count)
            .cloned()
            .collect::<Vec<_>>();
        for room in chosen {
            debug!("trap seeded in room {}", room);
            system.traps.insert(room, TrapStatus::Seeded);
        }
        info!("seeded {} traps across {} rooms", system.traps.len(), room_ids.len());
        system
    }

    pub fn status(&self, room_id: &str) -> Option<TrapStatus> {
        self.traps.get(room_id).copied()
    }

    /// Rooms whose trap is still live (seeded or armed). Debug listing only.
    pub fn live_rooms(&self) -> Vec<(&str, TrapStatus)> {
        self.traps
            .iter()
            .filter(|(_, status)| {
                matches!(status, TrapStatus::Seeded | TrapStatus::Armed { .. })
            })
            .map(|(room, status)| (room.as_str(), *status))
            .collect()
    }

    /// Called whenever the player enters a room. A live trap starts (or
    /// restarts) its countdown from the current clock.
    pub fn on_enter_room(&mut self, room_id: &str, clock: u64) {
        if let Some(status) = self.traps.get_mut(room_id) {
            if matches!(status, TrapStatus::Seeded) {
                debug!("trap in {} armed at t={}", room_id, clock);
                *status = TrapStatus::Armed {
                    deadline: clock + TRAP_DELAY_TICKS,
                };
            }
        }
    }

    /// Advance trap countdowns to `clock`. A trap whose deadline has passed
    /// fires only if the player is still in its room; otherwise it reverts
    /// to seeded so a later visit arms it again. Fired traps produce damage
    /// intents, downgraded to a harmless line under god mode or debug.
    pub fn tick(&mut self, clock: u64, state: &PlayerState) -> Vec<Intent> {
        let mut intents = Vec::new();
        for (room, status) in self.traps.iter_mut() {
            let TrapStatus::Armed { deadline } = *status else {
                continue;
            };
            if clock < deadline {
                continue;
            }
            if state.current_room != *room {
                // The player left before the countdown elapsed; the trap
                // settles back into hiding.
                debug!("trap in {} lapsed; player elsewhere", room);
                *status = TrapStatus::Seeded;
                continue;
            }
            *status = TrapStatus::Triggered;
            if state.flag_set(FLAG_GODMODE) || state.flag_set(FLAG_DEBUG) {
                info!("trap in {} fired harmlessly (godmode/debug)", room);
                intents.push(Intent::Log(
                    "A trap springs around you and fizzles harmlessly.".to_string(),
                ));
            } else {
                info!("trap in {} fired for {} damage", room, TRAP_DAMAGE);
                intents.push(Intent::Log(
                    "The floor gives way! A trap springs shut around you.".to_string(),
                ));
                intents.push(Intent::AdjustVital {
                    vital: Vital::Health,
                    delta: -TRAP_DAMAGE,
                });
            }
        }
        intents
    }

    /// Permanently disarm a room's trap. Returns the player-facing line;
    /// disarming a room with no live trap is a reported no-op.
    pub fn defuse(&mut self, room_id: &str) -> String {
        match self.traps.get_mut(room_id) {
            Some(status @ (TrapStatus::Seeded | TrapStatus::Armed { .. })) => {
                *status = TrapStatus::Disarmed;
                info!("trap in {} defused", room_id);
                "You carefully disarm the mechanism. This room is safe now.".to_string()
            }
            Some(TrapStatus::Disarmed) => "The trap here is already disarmed.".to_string(),
            Some(TrapStatus::Triggered) => {
                "The sprung trap here is already spent.".to_string()
            }
            None => "You find nothing here to disarm.".to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_trap(room_id: &str) -> Self {
        let mut system = Self::default();
        system
            .traps
            .insert(room_id.to_string(), TrapStatus::Seeded);
        system
    }
}
