//! The aggregate player state and the single transition funnel every
//! subsystem mutates through. Commands and trap timers both express their
//! effects as [`Intent`] values; [`apply_intents`] is the only code that
//! writes to a [`PlayerState`], which keeps mutation ordering deterministic.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::engine::inventory;
use crate::engine::ledger;
use crate::engine::reset::{self, ResetKind};
use crate::engine::types::{Direction, Mood, SNAPSHOT_SCHEMA_VERSION};
use crate::engine::world::World;

/// Flag key set by the `/debug` command.
pub const FLAG_DEBUG: &str = "debug";
/// Flag key set by a successful `godmode` activation.
pub const FLAG_GODMODE: &str = "godmode";
/// Flag key set by `/doors` while the all-doors override is active.
pub const FLAG_DOORS: &str = "doors_override";

/// Upper clamp for the vital stats.
pub const VITAL_MAX: i64 = 100;

/// Hard cap on intents applied per command, guarding against a world-authoring
/// loop between on-enter hooks.
const MAX_APPLIED_INTENTS: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    Health,
    Energy,
    Mood,
}

/// Player vitals, clamped to `0..=VITAL_MAX`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vitals {
    pub health: i64,
    pub energy: i64,
    pub mood: i64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: VITAL_MAX,
            energy: VITAL_MAX,
            mood: VITAL_MAX,
        }
    }
}

impl Vitals {
    pub fn adjust(&mut self, vital: Vital, delta: i64) {
        let slot = match vital {
            Vital::Health => &mut self.health,
            Vital::Energy => &mut self.energy,
            Vital::Mood => &mut self.mood,
        };
        *slot = (*slot + delta).clamp(0, VITAL_MAX);
    }
}

/// Mutable per-NPC state carried inside the player snapshot. Memory only
/// grows and mood only escalates, except through an explicit reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NpcState {
    pub mood: Mood,
    pub memory: BTreeSet<String>,
    pub dialogue_cursor: usize,
    pub interactions: u32,
}

/// The one mutable record of a session. Constructed once per session,
/// mutated exclusively through [`apply_intents`], and serialized whole as
/// the save snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub player_name: String,
    pub current_room: String,
    pub previous_room: Option<String>,
    pub inventory: BTreeSet<String>,
    pub score: i64,
    pub traits: BTreeSet<String>,
    pub flags: BTreeMap<String, FlagValue>,
    pub reset_count: u32,
    pub vitals: Vitals,
    pub visited_rooms: BTreeSet<String>,
    pub npc_memory: BTreeMap<String, NpcState>,
    /// Exit overlay granted by puzzle rewards and door overrides, merged on
    /// top of the room graph during exit resolution.
    pub unlocked_exits: BTreeMap<String, BTreeMap<Direction, String>>,
    /// Full transcript of player-visible lines for this session.
    pub log: Vec<String>,
    /// Logical time units elapsed; one per processed command.
    pub clock: u64,
    pub schema_version: u8,
}

impl PlayerState {
    pub fn new(player_name: &str, start_room: &str) -> Self {
        let mut visited = BTreeSet::new();
        visited.insert(start_room.to_string());
        Self {
            player_name: player_name.to_string(),
            current_room: start_room.to_string(),
            previous_room: None,
            inventory: BTreeSet::new(),
            score: 0,
            traits: BTreeSet::new(),
            flags: BTreeMap::new(),
            reset_count: 0,
            vitals: Vitals::default(),
            visited_rooms: visited,
            npc_memory: BTreeMap::new(),
            unlocked_exits: BTreeMap::new(),
            log: Vec::new(),
            clock: 0,
            schema_version: SNAPSHOT_SCHEMA_VERSION,
        }
    }

    /// True when the named boolean flag is present and set.
    pub fn flag_set(&self, key: &str) -> bool {
        matches!(self.flags.get(key), Some(FlagValue::Bool(true)))
    }

    pub fn npc_state(&self, npc_id: &str) -> NpcState {
        self.npc_memory.get(npc_id).cloned().unwrap_or_default()
    }
}

/// A single named state transition. Every mutation of [`PlayerState`] goes
/// through one of these, applied atomically by [`apply_intents`].
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Move the player, updating `previous_room` and visit tracking, logging
    /// "You move <direction>." when a direction is given, and running the
    /// destination's on-enter hook.
    EnterRoom {
        room: String,
        direction: Option<Direction>,
    },
    AddItem(String),
    RemoveItem(String),
    AdjustScore {
        delta: i64,
        reason: String,
    },
    GrantTrait(String),
    SetFlag {
        key: String,
        value: FlagValue,
    },
    ClearFlag(String),
    AdjustVital {
        vital: Vital,
        delta: i64,
    },
    UnlockExit {
        room: String,
        direction: Direction,
        destination: String,
    },
    /// Remove an overlay exit (used by `/doorsoff` for unearned doors).
    RelockExit {
        room: String,
        direction: Direction,
    },
    RecordNpcFact {
        npc: String,
        fact: String,
    },
    SetNpcMood {
        npc: String,
        mood: Mood,
    },
    /// Advance an NPC's dialogue cursor and interaction count, escalating
    /// mood past the annoyance thresholds.
    BumpNpc(String),
    Reset(ResetKind),
    Log(String),
}

/// Apply a batch of intents to the state, in order, returning the
/// player-visible lines emitted. On-enter hooks of an `EnterRoom` intent are
/// spliced in directly after the move so they observe the post-move state.
///
/// Callers wanting all-or-nothing semantics run this against a working copy
/// and commit the copy on success; `apply_intents` itself never fails.
pub fn apply_intents(state: &mut PlayerState, world: &World, intents: Vec<Intent>) -> Vec<String> {
    let mut queue: VecDeque<Intent> = intents.into();
    let mut lines = Vec::new();
    let mut applied = 0usize;

    while let Some(intent) = queue.pop_front() {
        applied += 1;
        if applied > MAX_APPLIED_INTENTS {
            log::warn!("intent cascade exceeded {} steps; dropping remainder", MAX_APPLIED_INTENTS);
            break;
        }
        match intent {
            Intent::EnterRoom { room, direction } => {
                if let Some(dir) = direction {
                    lines.push(format!("You move {}.", dir.label()));
                }
                state.previous_room = Some(state.current_room.clone());
                state.current_room = room.clone();
                state.visited_rooms.insert(room.clone());
                if let Some(record) = world.rooms.get(&room) {
                    if let Some(hook) = record.on_enter {
                        for follow_up in hook(state).into_iter().rev() {
                            queue.push_front(follow_up);
                        }
                    }
                } else {
                    log::warn!("entered unknown room id: {}", room);
                }
            }
            Intent::AddItem(item) => {
                lines.push(inventory::add(state, world, &item));
            }
            Intent::RemoveItem(item) => {
                lines.push(inventory::remove(state, world, &item));
            }
            Intent::AdjustScore { delta, reason } => {
                let line = ledger::apply_score_delta(state, delta, &reason);
                lines.push(line);
            }
            Intent::GrantTrait(name) => {
                if state.traits.insert(name.clone()) {
                    lines.push(format!("Trait unlocked: {}.", name));
                }
            }
            Intent::SetFlag { key, value } => {
                state.flags.insert(key, value);
            }
            Intent::ClearFlag(key) => {
                state.flags.remove(&key);
            }
            Intent::AdjustVital { vital, delta } => {
                state.vitals.adjust(vital, delta);
            }
            Intent::UnlockExit {
                room,
                direction,
                destination,
            } => {
                state
                    .unlocked_exits
                    .entry(room)
                    .or_default()
                    .insert(direction, destination);
            }
            Intent::RelockExit { room, direction } => {
                if let Some(overlay) = state.unlocked_exits.get_mut(&room) {
                    overlay.remove(&direction);
                    if overlay.is_empty() {
                        state.unlocked_exits.remove(&room);
                    }
                }
            }
            Intent::RecordNpcFact { npc, fact } => {
                state.npc_memory.entry(npc).or_default().memory.insert(fact);
            }
            Intent::SetNpcMood { npc, mood } => {
                let entry = state.npc_memory.entry(npc).or_default();
                // Mood is monotonic within a session; never de-escalate.
                entry.mood = entry.mood.max(mood);
            }
            Intent::BumpNpc(npc_id) => {
                let npc = world.npcs.get(&npc_id);
                let entry = state.npc_memory.entry(npc_id).or_default();
                entry.interactions += 1;
                entry.dialogue_cursor = match npc {
                    Some(record) if !record.dialogues.is_empty() => {
                        (entry.dialogue_cursor + 1) % record.dialogues.len()
                    }
                    _ => 0,
                };
                let escalated = crate::engine::npc::mood_for_interactions(entry.interactions);
                entry.mood = entry.mood.max(escalated);
            }
            Intent::Reset(kind) => {
                let line = reset::apply_reset(state, kind, &world.start_room);
                lines.push(line);
            }
            Intent::Log(line) => {
                lines.push(line);
            }
        }
    }

    state.log.extend(lines.iter().cloned());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::world;

    fn fixture() -> (World, PlayerState) {
        let world = world::canonical_world();
        let state = PlayerState::new("Dale", &world.start_room);
        (world, state)
    }

    #[test]
    fn enter_room_tracks_previous_room_and_visits() {
        let (world, mut state) = fixture();
        let start = state.current_room.clone();
        let lines = apply_intents(
            &mut state,
            &world,
            vec![Intent::EnterRoom {
                room: "controlnexusreturned".to_string(),
                direction: Some(Direction::South),
            }],
        );
        assert_eq!(state.current_room, "controlnexusreturned");
        assert_eq!(state.previous_room.as_deref(), Some(start.as_str()));
        assert!(state.visited_rooms.contains("controlnexusreturned"));
        assert!(lines.iter().any(|l| l == "You move south."));
    }

    #[test]
    fn grant_trait_is_idempotent() {
        let (world, mut state) = fixture();
        let first = apply_intents(
            &mut state,
            &world,
            vec![Intent::GrantTrait("seeker".to_string())],
        );
        let second = apply_intents(
            &mut state,
            &world,
            vec![Intent::GrantTrait("seeker".to_string())],
        );
        assert_eq!(first.len(), 1);
        assert!(second.is_empty(), "second grant should be silent");
        assert_eq!(state.traits.len(), 1);
    }

    #[test]
    fn vitals_clamp_at_zero_and_max() {
        let mut vitals = Vitals::default();
        vitals.adjust(Vital::Health, -500);
        assert_eq!(vitals.health, 0);
        vitals.adjust(Vital::Health, 40);
        vitals.adjust(Vital::Health, 500);
        assert_eq!(vitals.health, VITAL_MAX);
    }

    #[test]
    fn mood_never_de_escalates() {
        let (world, mut state) = fixture();
        apply_intents(
            &mut state,
            &world,
            vec![Intent::SetNpcMood {
                npc: "ayla".to_string(),
                mood: Mood::Annoyed,
            }],
        );
        apply_intents(
            &mut state,
            &world,
            vec![Intent::SetNpcMood {
                npc: "ayla".to_string(),
                mood: Mood::Friendly,
            }],
        );
        assert_eq!(state.npc_state("ayla").mood, Mood::Annoyed);
    }

    #[test]
    fn log_intents_accumulate_in_session_transcript() {
        let (world, mut state) = fixture();
        apply_intents(
            &mut state,
            &world,
            vec![Intent::Log("one".to_string()), Intent::Log("two".to_string())],
        );
        assert_eq!(state.log, vec!["one".to_string(), "two".to_string()]);
    }
}
