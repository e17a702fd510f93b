//! Room graph lookups and defensive exit/description resolution.
//!
//! Every function here is total: a malformed dynamic exits function, a bad
//! room id, or a missing mapping all degrade to safe defaults ("no exit that
//! way", a void description) with a warning in the developer log, never an
//! error surfaced to the caller.

use std::collections::BTreeMap;

use log::warn;

use crate::engine::state::PlayerState;
use crate::engine::types::{Direction, Exits, RoomRecord, RoomText};
use crate::engine::world::World;

/// Fetch a room definition by id.
pub fn get_room<'a>(world: &'a World, room_id: &str) -> Option<&'a RoomRecord> {
    world.rooms.get(room_id)
}

/// Resolve the usable exits of a room for the current state: evaluates
/// function-form exits defensively and merges in the player's unlocked-exit
/// overlay (puzzle rewards, door overrides).
pub fn resolve_exits(
    room: &RoomRecord,
    state: &PlayerState,
) -> BTreeMap<Direction, String> {
    let mut exits = match &room.exits {
        Exits::Static(map) => map.clone(),
        Exits::Dynamic(resolve) => match resolve(state) {
            Ok(map) => map,
            Err(detail) => {
                warn!("dynamic exits failed for room {}: {}", room.id, detail);
                BTreeMap::new()
            }
        },
    };

    if let Some(overlay) = state.unlocked_exits.get(&room.id) {
        for (direction, destination) in overlay {
            exits.insert(*direction, destination.clone());
        }
    }

    exits
}

/// Resolve a room's description, evaluating the function form against the
/// current state.
pub fn describe(room: &RoomRecord, state: &PlayerState) -> String {
    match &room.description {
        RoomText::Static(text) => text.clone(),
        RoomText::Dynamic(describe) => describe(state),
    }
}

/// Full player-facing view of a room: title, description, objects still
/// present, dropped items, and the exit list.
pub fn render_room(world: &World, room: &RoomRecord, state: &PlayerState) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("=== {} ===", room.title));
    lines.push(describe(room, state));

    let taken_key = |name: &str| format!("taken:{}:{}", room.id, name);
    let objects: Vec<&str> = room
        .objects
        .keys()
        .filter(|name| !state.flag_set(&taken_key(name)))
        .map(String::as_str)
        .collect();
    if !objects.is_empty() {
        lines.push(format!("You notice: {}.", objects.join(", ")));
    }

    let dropped: Vec<String> = state
        .flags
        .keys()
        .filter_map(|key| key.strip_prefix(&format!("dropped:{}:", room.id)))
        .map(|item_id| {
            world
                .items
                .get(item_id)
                .map(|i| i.name.clone())
                .unwrap_or_else(|| item_id.to_string())
        })
        .collect();
    if !dropped.is_empty() {
        lines.push(format!("On the ground: {}.", dropped.join(", ")));
    }

    let exits = resolve_exits(room, state);
    if exits.is_empty() {
        lines.push("There are no obvious exits.".to_string());
    } else {
        let names: Vec<&str> = exits.keys().map(Direction::label).collect();
        lines.push(format!("Exits: {}.", names.join(", ")));
    }

    lines
}
