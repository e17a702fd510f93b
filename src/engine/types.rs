use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::state::{Intent, PlayerState};

pub const SNAPSHOT_SCHEMA_VERSION: u8 = 1;

/// Directions a player may travel. `Jump` is the multiverse shortcut the
/// lattice opens between otherwise unconnected rooms.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    Jump,
}

impl Direction {
    /// Parse a direction word, case-insensitive. Returns `None` for anything
    /// that is not a direction so the interpreter can fall through to other
    /// verbs.
    pub fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Self::North),
            "south" | "s" => Some(Self::South),
            "east" | "e" => Some(Self::East),
            "west" | "w" => Some(Self::West),
            "up" | "u" => Some(Self::Up),
            "down" | "d" => Some(Self::Down),
            "jump" => Some(Self::Jump),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Jump => "jump",
        }
    }
}

/// Room exits: either a fixed mapping or a function of the current player
/// state. The dynamic form must never panic; it reports failures through
/// `Err`, which the room graph logs and treats as "no exits".
#[derive(Clone)]
pub enum Exits {
    Static(BTreeMap<Direction, String>),
    Dynamic(fn(&PlayerState) -> Result<BTreeMap<Direction, String>, String>),
}

impl std::fmt::Debug for Exits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(map) => f.debug_tuple("Static").field(map).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

/// Room description text: fixed, or derived from player state (for rooms
/// that read differently after a reset or once a flag is set).
#[derive(Clone)]
pub enum RoomText {
    Static(String),
    Dynamic(fn(&PlayerState) -> String),
}

impl std::fmt::Debug for RoomText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

/// A named thing in a room the player can examine, and optionally take.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub description: String,
    /// Item granted when the player takes this object. `None` means scenery.
    pub item: Option<String>,
}

impl Interactable {
    pub fn scenery(description: &str) -> Self {
        Self {
            description: description.to_string(),
            item: None,
        }
    }

    pub fn holding(description: &str, item_id: &str) -> Self {
        Self {
            description: description.to_string(),
            item: Some(item_id.to_string()),
        }
    }
}

/// Immutable room definition. Rooms are built once at session start by the
/// world seed and only ever referenced by id afterwards.
#[derive(Debug, Clone)]
pub struct RoomRecord {
    pub id: String,
    pub title: String,
    pub description: RoomText,
    pub exits: Exits,
    /// Opaque asset reference for the presentation layer.
    pub image: Option<String>,
    pub objects: BTreeMap<String, Interactable>,
    pub on_enter: Option<fn(&PlayerState) -> Vec<Intent>>,
}

impl RoomRecord {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: RoomText::Static(description.to_string()),
            exits: Exits::Static(BTreeMap::new()),
            image: None,
            objects: BTreeMap::new(),
            on_enter: None,
        }
    }

    pub fn with_exit(mut self, direction: Direction, destination: &str) -> Self {
        match &mut self.exits {
            Exits::Static(map) => {
                map.insert(direction, destination.to_string());
            }
            Exits::Dynamic(_) => {
                // Static additions to a dynamic room are a world-authoring
                // mistake; keep the dynamic form and ignore the addition.
                log::warn!(
                    "ignoring static exit {} on dynamic-exit room {}",
                    direction.label(),
                    self.id
                );
            }
        }
        self
    }

    pub fn with_dynamic_exits(
        mut self,
        exits: fn(&PlayerState) -> Result<BTreeMap<Direction, String>, String>,
    ) -> Self {
        self.exits = Exits::Dynamic(exits);
        self
    }

    pub fn with_dynamic_description(mut self, describe: fn(&PlayerState) -> String) -> Self {
        self.description = RoomText::Dynamic(describe);
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn with_object(mut self, name: &str, object: Interactable) -> Self {
        self.objects.insert(name.to_string(), object);
        self
    }

    pub fn with_on_enter(mut self, hook: fn(&PlayerState) -> Vec<Intent>) -> Self {
        self.on_enter = Some(hook);
        self
    }
}

/// The text and state effects produced by using an item.
#[derive(Debug, Clone, Default)]
pub struct UseOutcome {
    pub text: String,
    pub intents: Vec<Intent>,
}

impl UseOutcome {
    pub fn text_only(text: &str) -> Self {
        Self {
            text: text.to_string(),
            intents: Vec::new(),
        }
    }
}

/// Immutable item catalog entry. Presence in the player's inventory is the
/// only mutable aspect.
#[derive(Debug, Clone)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Score awarded when the item is first picked up.
    pub points: i64,
    pub use_effect: Option<fn(&PlayerState) -> UseOutcome>,
}

impl ItemRecord {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            points: 0,
            use_effect: None,
        }
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    pub fn with_use(mut self, effect: fn(&PlayerState) -> UseOutcome) -> Self {
        self.use_effect = Some(effect);
        self
    }
}

/// A permanent, derived player attribute. The catalog condition is evaluated
/// to grant the trait once; the state's trait set is the authoritative record
/// afterwards and traits are never revoked.
#[derive(Debug, Clone)]
pub struct TraitRecord {
    pub name: String,
    pub description: String,
    pub unlock: fn(&PlayerState) -> bool,
    pub hidden: bool,
}

impl TraitRecord {
    pub fn new(name: &str, description: &str, unlock: fn(&PlayerState) -> bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            unlock,
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// NPC mood tiers. Ordering matters: mood only ever escalates within a
/// session (explicit resets excepted), so transitions take the max.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Friendly,
    Grateful,
    Annoyed,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Grateful => "grateful",
            Self::Annoyed => "annoyed",
        }
    }
}

/// Where an NPC can be interacted with.
#[derive(Clone)]
pub enum Visibility {
    Rooms(BTreeSet<String>),
    Predicate(fn(&PlayerState, &str) -> bool),
}

impl std::fmt::Debug for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rooms(rooms) => f.debug_tuple("Rooms").field(rooms).finish(),
            Self::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

/// Immutable NPC definition. Mutable per-NPC state (mood, memory, dialogue
/// cursor) lives in the player state so snapshots carry it.
#[derive(Debug, Clone)]
pub struct NpcRecord {
    pub id: String,
    pub name: String,
    pub visibility: Visibility,
    /// Cyclic small talk; `talk` advances through these modulo the length.
    pub dialogues: Vec<String>,
    /// Topic-specific responses for `ask <npc> about <topic>`.
    pub triggers: BTreeMap<String, fn(&PlayerState) -> String>,
}

impl NpcRecord {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            visibility: Visibility::Rooms(BTreeSet::new()),
            dialogues: Vec::new(),
            triggers: BTreeMap::new(),
        }
    }

    pub fn visible_in(mut self, rooms: &[&str]) -> Self {
        self.visibility = Visibility::Rooms(rooms.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn visible_when(mut self, predicate: fn(&PlayerState, &str) -> bool) -> Self {
        self.visibility = Visibility::Predicate(predicate);
        self
    }

    pub fn with_dialogue(mut self, line: &str) -> Self {
        self.dialogues.push(line.to_string());
        self
    }

    pub fn with_trigger(mut self, topic: &str, response: fn(&PlayerState) -> String) -> Self {
        self.triggers.insert(topic.to_ascii_lowercase(), response);
        self
    }
}

/// Reward granted when a puzzle is solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleReward {
    UnlockExit {
        room: String,
        direction: Direction,
        destination: String,
    },
    GainTrait {
        name: String,
    },
}

/// A one-shot, room-scoped challenge. Live while its solved flag is unset;
/// permanently inert once solved.
#[derive(Debug, Clone)]
pub struct PuzzleRecord {
    pub id: String,
    pub room: String,
    pub solved_flag: String,
    pub required_items: BTreeSet<String>,
    pub required_traits: BTreeSet<String>,
    pub solution_steps: BTreeSet<String>,
    pub reward: PuzzleReward,
}

impl PuzzleRecord {
    pub fn new(id: &str, room: &str, solved_flag: &str, reward: PuzzleReward) -> Self {
        Self {
            id: id.to_string(),
            room: room.to_string(),
            solved_flag: solved_flag.to_string(),
            required_items: BTreeSet::new(),
            required_traits: BTreeSet::new(),
            solution_steps: BTreeSet::new(),
            reward,
        }
    }

    pub fn requires_item(mut self, item_id: &str) -> Self {
        self.required_items.insert(item_id.to_string());
        self
    }

    pub fn requires_trait(mut self, trait_name: &str) -> Self {
        self.required_traits.insert(trait_name.to_string());
        self
    }

    pub fn with_step(mut self, step: &str) -> Self {
        self.solution_steps.insert(step.to_ascii_lowercase());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parsing_accepts_aliases_and_case() {
        assert_eq!(Direction::parse("north"), Some(Direction::North));
        assert_eq!(Direction::parse("N"), Some(Direction::North));
        assert_eq!(Direction::parse("JUMP"), Some(Direction::Jump));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn room_builder_collects_static_exits() {
        let room = RoomRecord::new("a", "A", "desc")
            .with_exit(Direction::North, "b")
            .with_exit(Direction::South, "c");
        match room.exits {
            Exits::Static(map) => {
                assert_eq!(map.get(&Direction::North).map(String::as_str), Some("b"));
                assert_eq!(map.get(&Direction::South).map(String::as_str), Some("c"));
            }
            Exits::Dynamic(_) => panic!("expected static exits"),
        }
    }

    #[test]
    fn mood_ordering_supports_monotonic_escalation() {
        assert!(Mood::Neutral < Mood::Friendly);
        assert!(Mood::Friendly < Mood::Grateful);
        assert!(Mood::Grateful < Mood::Annoyed);
        assert_eq!(Mood::Annoyed.max(Mood::Friendly), Mood::Annoyed);
    }
}
