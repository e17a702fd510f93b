//! Set-semantics inventory operations. Every operation is idempotent and
//! total: unknown ids report text instead of failing.

use crate::engine::state::PlayerState;
use crate::engine::world::World;

/// Add an item to the inventory. No-op when already held.
pub fn add(state: &mut PlayerState, world: &World, item_id: &str) -> String {
    let display = display_name(world, item_id);
    if state.inventory.insert(item_id.to_string()) {
        format!("{} added to your inventory.", display)
    } else {
        format!("You already have the {}.", display)
    }
}

/// Remove an item from the inventory. No-op when absent.
pub fn remove(state: &mut PlayerState, world: &World, item_id: &str) -> String {
    let display = display_name(world, item_id);
    if state.inventory.remove(item_id) {
        format!("{} removed from your inventory.", display)
    } else {
        format!("You are not carrying the {}.", display)
    }
}

pub fn has(state: &PlayerState, item_id: &str) -> bool {
    state.inventory.contains(item_id)
}

pub fn has_any<'a, I: IntoIterator<Item = &'a str>>(state: &PlayerState, item_ids: I) -> bool {
    item_ids.into_iter().any(|id| state.inventory.contains(id))
}

/// List held items by display name. Order follows the set order; it carries
/// no semantic meaning.
pub fn list(state: &PlayerState, world: &World) -> Vec<String> {
    state
        .inventory
        .iter()
        .map(|id| display_name(world, id))
        .collect()
}

/// Resolve an inventory item id from player text, matching id or catalog
/// name case-insensitively.
pub fn find_held<'a>(state: &'a PlayerState, world: &World, text: &str) -> Option<&'a str> {
    let wanted = text.trim().to_ascii_lowercase();
    state
        .inventory
        .iter()
        .find(|id| {
            id.to_ascii_lowercase() == wanted
                || world
                    .items
                    .get(*id)
                    .map(|item| item.name.to_ascii_lowercase() == wanted)
                    .unwrap_or(false)
        })
        .map(String::as_str)
}

fn display_name(world: &World, item_id: &str) -> String {
    world
        .items
        .get(item_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| item_id.to_string())
}
