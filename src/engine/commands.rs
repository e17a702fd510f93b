//! Command interpreter: free text in, intents out.
//!
//! Interpretation is pure. A command never mutates state directly; it reads
//! the current [`PlayerState`] and returns immediate lines plus the intents
//! to apply. The session layer commits them all-or-nothing.

use log::debug;

use crate::config::Config;
use crate::engine::inventory;
use crate::engine::npc;
use crate::engine::puzzles::{self, AttemptOutcome};
use crate::engine::reset;
use crate::engine::rooms;
use crate::engine::state::{
    FlagValue, Intent, PlayerState, FLAG_DEBUG, FLAG_DOORS, FLAG_GODMODE,
};
use crate::engine::types::{Direction, Mood, PuzzleReward};
use crate::engine::world::World;

/// Operations on the session-scoped trap system, which lives outside the
/// snapshot and so cannot be expressed as an [`Intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOp {
    /// Permanently disarm the trap in the current room, if any.
    Defuse,
    /// Render the live trap table (debug only).
    Report,
}

/// What a single command resolved to.
#[derive(Debug, Default)]
pub struct CommandReply {
    /// Lines shown before any intent output.
    pub lines: Vec<String>,
    /// State transitions to apply atomically.
    pub intents: Vec<Intent>,
    /// Optional trap-system operation for the session to carry out.
    pub trap_op: Option<TrapOp>,
}

impl CommandReply {
    fn say(text: impl Into<String>) -> Self {
        CommandReply {
            lines: vec![text.into()],
            ..Default::default()
        }
    }

    fn with_intents(intents: Vec<Intent>) -> Self {
        CommandReply {
            intents,
            ..Default::default()
        }
    }
}

/// Interpret one line of player input against the current state.
pub fn interpret(world: &World, state: &PlayerState, config: &Config, input: &str) -> CommandReply {
    let input = input.trim();
    if input.is_empty() {
        return CommandReply::say("Say something.");
    }
    let lowered = input.to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let rest = lowered[verb.len()..].trim().to_string();

    // Bare direction words act like `go <direction>`.
    if words.clone().next().is_none() {
        if let Some(direction) = Direction::parse(verb) {
            return go(world, state, direction);
        }
    }

    match verb {
        "go" | "move" | "walk" => match Direction::parse(&rest) {
            Some(direction) => go(world, state, direction),
            None => CommandReply::say("Go where?"),
        },
        "back" => back(state),
        "look" | "l" if rest.is_empty() => look_around(world, state),
        "look" | "examine" | "x" => {
            let target = rest.trim_start_matches("at ").trim();
            examine(world, state, target)
        }
        "take" | "get" | "pick" => {
            let target = rest.trim_start_matches("up ").trim();
            take(world, state, target)
        }
        "drop" => drop_item(world, state, &rest),
        "use" | "drink" | "eat" | "light" | "read" => use_item(world, state, &rest),
        "inventory" | "inv" | "i" => show_inventory(world, state),
        "talk" => {
            let target = rest.trim_start_matches("to ").trim();
            talk(world, state, target)
        }
        "ask" => ask(world, state, &rest),
        "thank" => regard(world, state, &rest, Mood::Grateful),
        "insult" => regard(world, state, &rest, Mood::Annoyed),
        "score" => CommandReply::say(format!(
            "Score: {} (cycle {}).",
            state.score, state.reset_count
        )),
        "traits" => show_traits(world, state),
        "wait" => CommandReply::say("Time passes."),
        "press" | "push" => press(world, state, &rest),
        "defuse" => CommandReply {
            trap_op: Some(TrapOp::Defuse),
            ..Default::default()
        },
        "help" => help_text(),
        "/debug" => toggle_debug(state, config),
        "/traps" => {
            if state.flag_set(FLAG_DEBUG) {
                CommandReply {
                    trap_op: Some(TrapOp::Report),
                    ..Default::default()
                }
            } else {
                CommandReply::say("Access denied.")
            }
        }
        "/state" => dump_state(state),
        "/doors" => doors_on(world, state),
        "/doorsoff" => doors_off(world, state),
        "godmode" => godmode(state, config),
        _ => fallback(world, state, &lowered),
    }
}

fn go(world: &World, state: &PlayerState, direction: Direction) -> CommandReply {
    let Some(room) = rooms::get_room(world, &state.current_room) else {
        return CommandReply::say("You are nowhere. That shouldn't be possible.");
    };
    match rooms::resolve_exits(room, state).get(&direction) {
        Some(destination) => CommandReply::with_intents(vec![Intent::EnterRoom {
            room: destination.clone(),
            direction: Some(direction),
        }]),
        None => CommandReply::say("You can't go that way."),
    }
}

fn back(state: &PlayerState) -> CommandReply {
    match &state.previous_room {
        Some(previous) if previous != &state.current_room => CommandReply {
            lines: vec!["You retrace your steps.".to_string()],
            intents: vec![Intent::EnterRoom {
                room: previous.clone(),
                direction: None,
            }],
            trap_op: None,
        },
        _ => CommandReply::say("There's no way back from here."),
    }
}

fn look_around(world: &World, state: &PlayerState) -> CommandReply {
    match rooms::get_room(world, &state.current_room) {
        Some(room) => CommandReply {
            lines: rooms::render_room(world, room, state),
            ..Default::default()
        },
        None => CommandReply::say("You are nowhere. That shouldn't be possible."),
    }
}

fn examine(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    if target.is_empty() {
        return look_around(world, state);
    }
    if let Some(room) = rooms::get_room(world, &state.current_room) {
        for (name, object) in &room.objects {
            let taken = state.flag_set(&format!("taken:{}:{}", room.id, name));
            if !taken && name.eq_ignore_ascii_case(target) {
                return CommandReply::say(object.description.clone());
            }
        }
    }
    if let Some(item_id) = inventory::find_held(state, world, target) {
        if let Some(item) = world.items.get(item_id) {
            return CommandReply::say(item.description.clone());
        }
    }
    if let Some(record) = npc::find_npc(world, target) {
        if npc::is_visible(record, &state.current_room, state) {
            return CommandReply::say(npc::next_line(record, state));
        }
    }
    CommandReply::say("You see nothing special about that.")
}

fn take(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    if target.is_empty() {
        return CommandReply::say("Take what?");
    }
    let Some(room) = rooms::get_room(world, &state.current_room) else {
        return CommandReply::say("There's nothing here to take.");
    };

    // Items previously dropped on the ground take priority over fixtures.
    for (item_id, item) in &world.items {
        let ground_flag = format!("dropped:{}:{}", room.id, item_id);
        if state.flag_set(&ground_flag)
            && (item_id.eq_ignore_ascii_case(target) || item.name.eq_ignore_ascii_case(target))
        {
            return CommandReply::with_intents(vec![
                Intent::ClearFlag(ground_flag),
                Intent::AddItem(item_id.clone()),
            ]);
        }
    }

    for (name, object) in &room.objects {
        let Some(item_id) = &object.item else { continue };
        let item = match world.items.get(item_id) {
            Some(item) => item,
            None => continue,
        };
        let matches = name.eq_ignore_ascii_case(target)
            || item_id.eq_ignore_ascii_case(target)
            || item.name.eq_ignore_ascii_case(target);
        if !matches {
            continue;
        }
        let taken_flag = format!("taken:{}:{}", room.id, name);
        if state.flag_set(&taken_flag) || state.inventory.contains(item_id.as_str()) {
            return CommandReply::say("You already have that.");
        }
        let mut intents = vec![
            Intent::AddItem(item_id.clone()),
            Intent::SetFlag {
                key: taken_flag,
                value: FlagValue::Bool(true),
            },
        ];
        let scored_flag = format!("scored:{}", item_id);
        if item.points != 0 && !state.flag_set(&scored_flag) {
            intents.push(Intent::SetFlag {
                key: scored_flag,
                value: FlagValue::Bool(true),
            });
            intents.push(Intent::AdjustScore {
                delta: item.points,
                reason: format!("picking up the {}", item.name),
            });
        }
        return CommandReply::with_intents(intents);
    }
    CommandReply::say(format!("There's no {} here to take.", target))
}

fn drop_item(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    if target.is_empty() {
        return CommandReply::say("Drop what?");
    }
    match inventory::find_held(state, world, target) {
        Some(item_id) => CommandReply::with_intents(vec![
            Intent::RemoveItem(item_id.to_string()),
            Intent::SetFlag {
                key: format!("dropped:{}:{}", state.current_room, item_id),
                value: FlagValue::Bool(true),
            },
        ]),
        None => CommandReply::say("You aren't carrying that."),
    }
}

fn use_item(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    if target.is_empty() {
        return CommandReply::say("Use what?");
    }
    let Some(item_id) = inventory::find_held(state, world, target) else {
        return CommandReply::say(format!("You don't have a {} to use.", target));
    };
    let Some(item) = world.items.get(item_id) else {
        return CommandReply::say("You don't have that.");
    };
    match item.use_effect {
        Some(effect) => {
            let outcome = effect(state);
            CommandReply {
                lines: vec![outcome.text],
                intents: outcome.intents,
                trap_op: None,
            }
        }
        None => CommandReply::say(format!("Nothing obvious happens with the {}.", item.name)),
    }
}

fn show_inventory(world: &World, state: &PlayerState) -> CommandReply {
    let held = inventory::list(state, world);
    if held.is_empty() {
        CommandReply::say("You are carrying nothing.")
    } else {
        CommandReply::say(format!("You are carrying: {}.", held.join(", ")))
    }
}

fn talk(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    if target.is_empty() {
        return CommandReply::say("Talk to whom?");
    }
    let Some(record) = npc::find_npc(world, target) else {
        return CommandReply::say("There's no such character.");
    };
    if !npc::is_visible(record, &state.current_room, state) {
        return CommandReply::say(format!("{} isn't here.", record.name));
    }
    CommandReply {
        lines: vec![npc::next_line(record, state)],
        intents: vec![Intent::BumpNpc(record.id.clone())],
        trap_op: None,
    }
}

fn ask(world: &World, state: &PlayerState, rest: &str) -> CommandReply {
    let Some((who, topic)) = rest.split_once(" about ") else {
        return CommandReply::say("Ask whom about what? Try: ask <name> about <topic>.");
    };
    let Some(record) = npc::find_npc(world, who.trim()) else {
        return CommandReply::say("There's no such character.");
    };
    if !npc::is_visible(record, &state.current_room, state) {
        return CommandReply::say(format!("{} isn't here.", record.name));
    }
    let topic = topic.trim().to_ascii_lowercase();
    CommandReply {
        lines: vec![npc::topic_response(record, &topic, state)],
        intents: vec![
            Intent::RecordNpcFact {
                npc: record.id.clone(),
                fact: format!("asked:{}", topic),
            },
            Intent::BumpNpc(record.id.clone()),
        ],
        trap_op: None,
    }
}

fn regard(world: &World, state: &PlayerState, target: &str, mood: Mood) -> CommandReply {
    if target.is_empty() {
        return CommandReply::say(match mood {
            Mood::Annoyed => "Insult whom?".to_string(),
            _ => "Thank whom?".to_string(),
        });
    }
    let Some(record) = npc::find_npc(world, target) else {
        return CommandReply::say("There's no such character.");
    };
    if !npc::is_visible(record, &state.current_room, state) {
        return CommandReply::say(format!("{} isn't here.", record.name));
    }
    let (line, fact) = match mood {
        Mood::Annoyed => (
            format!("{} glares at you. That won't be forgotten.", record.name),
            "insulted",
        ),
        _ => (format!("{} nods warmly.", record.name), "thanked"),
    };
    CommandReply {
        lines: vec![line],
        intents: vec![
            Intent::RecordNpcFact {
                npc: record.id.clone(),
                fact: fact.to_string(),
            },
            Intent::SetNpcMood {
                npc: record.id.clone(),
                mood,
            },
        ],
        trap_op: None,
    }
}

fn show_traits(world: &World, state: &PlayerState) -> CommandReply {
    let mut lines = Vec::new();
    for record in &world.traits {
        if state.traits.contains(&record.name) {
            lines.push(format!("{} — {}", record.name, record.description));
        }
    }
    if lines.is_empty() {
        CommandReply::say("No traits yet. Keep exploring.")
    } else {
        CommandReply { lines, ..Default::default() }
    }
}

fn press(world: &World, state: &PlayerState, target: &str) -> CommandReply {
    let has_button = rooms::get_room(world, &state.current_room)
        .map(|room| room.objects.keys().any(|name| name == "reset button"))
        .unwrap_or(false);
    if !has_button || !target.contains("button") {
        return CommandReply::say("Nothing happens.");
    }
    let kind = reset::next_reset_kind(state.reset_count);
    CommandReply {
        lines: vec!["You press the button. The multiverse blinks.".to_string()],
        intents: vec![Intent::Reset(kind)],
        trap_op: None,
    }
}

fn toggle_debug(state: &PlayerState, config: &Config) -> CommandReply {
    if !config.debug.enabled {
        return CommandReply::say("Access denied.");
    }
    if state.flag_set(FLAG_DEBUG) {
        CommandReply {
            lines: vec!["Debug mode off.".to_string()],
            intents: vec![Intent::ClearFlag(FLAG_DEBUG.to_string())],
            trap_op: None,
        }
    } else {
        CommandReply {
            lines: vec!["Debug mode on.".to_string()],
            intents: vec![Intent::SetFlag {
                key: FLAG_DEBUG.to_string(),
                value: FlagValue::Bool(true),
            }],
            trap_op: None,
        }
    }
}

fn dump_state(state: &PlayerState) -> CommandReply {
    if !state.flag_set(FLAG_DEBUG) {
        return CommandReply::say("Access denied.");
    }
    match serde_json::to_string_pretty(state) {
        Ok(json) => CommandReply {
            lines: json.lines().map(str::to_string).collect(),
            ..Default::default()
        },
        Err(err) => CommandReply::say(format!("State dump failed: {}", err)),
    }
}

fn doors_on(world: &World, state: &PlayerState) -> CommandReply {
    if !state.flag_set(FLAG_DEBUG) {
        return CommandReply::say("Access denied.");
    }
    if state.flag_set(FLAG_DOORS) {
        return CommandReply::say("The doors are already open.");
    }
    let mut intents = vec![Intent::SetFlag {
        key: FLAG_DOORS.to_string(),
        value: FlagValue::Bool(true),
    }];
    for puzzle in world.puzzles.values() {
        if state.flag_set(&puzzle.solved_flag) {
            continue;
        }
        if let PuzzleReward::UnlockExit {
            room,
            direction,
            destination,
        } = &puzzle.reward
        {
            intents.push(Intent::UnlockExit {
                room: room.clone(),
                direction: *direction,
                destination: destination.clone(),
            });
        }
    }
    CommandReply {
        lines: vec!["Every sealed door swings open.".to_string()],
        intents,
        trap_op: None,
    }
}

fn doors_off(world: &World, state: &PlayerState) -> CommandReply {
    if !state.flag_set(FLAG_DEBUG) {
        return CommandReply::say("Access denied.");
    }
    if !state.flag_set(FLAG_DOORS) {
        return CommandReply::say("The door override is not active.");
    }
    let mut intents = vec![Intent::ClearFlag(FLAG_DOORS.to_string())];
    // Relock only unearned doors; puzzle-solved exits stay open.
    for puzzle in world.puzzles.values() {
        if state.flag_set(&puzzle.solved_flag) {
            continue;
        }
        if let PuzzleReward::UnlockExit { room, direction, .. } = &puzzle.reward {
            intents.push(Intent::RelockExit {
                room: room.clone(),
                direction: *direction,
            });
        }
    }
    CommandReply {
        lines: vec!["The doors remember they were locked.".to_string()],
        intents,
        trap_op: None,
    }
}

fn godmode(state: &PlayerState, config: &Config) -> CommandReply {
    let permitted = config
        .debug
        .godmode_players
        .iter()
        .any(|name| name.eq_ignore_ascii_case(&state.player_name));
    if !permitted {
        return CommandReply::say("Nothing happens.");
    }
    CommandReply {
        lines: vec!["The multiverse defers to you. Godmode enabled.".to_string()],
        intents: vec![Intent::SetFlag {
            key: FLAG_GODMODE.to_string(),
            value: FlagValue::Bool(true),
        }],
        trap_op: None,
    }
}

/// Unrecognized input gets one chance as a puzzle solution step before the
/// generic brush-off.
fn fallback(world: &World, state: &PlayerState, input: &str) -> CommandReply {
    if let Some(puzzle) = puzzles::live_puzzle(world, &state.current_room, state) {
        debug!("trying '{}' as a step of puzzle {}", input, puzzle.id);
        match puzzles::attempt_step(world, &puzzle.id, input, state) {
            AttemptOutcome::Solved(intents) | AttemptOutcome::MissingRequirements(intents) => {
                return CommandReply::with_intents(intents);
            }
            AttemptOutcome::Ignored => {}
        }
    }
    CommandReply::say("Unknown command. Try 'help'.")
}

fn help_text() -> CommandReply {
    CommandReply {
        lines: vec![
            "Movement: north/south/east/west/up/down/jump, go <dir>, back".to_string(),
            "World: look, examine <thing>, take <thing>, drop <thing>, use <thing>".to_string(),
            "People: talk to <name>, ask <name> about <topic>, thank <name>, insult <name>"
                .to_string(),
            "You: inventory, score, traits, wait".to_string(),
            "Other: press button, defuse, help".to_string(),
        ],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reset::ResetKind;
    use crate::engine::state::apply_intents;
    use crate::engine::world::canonical_world;

    fn setup() -> (World, PlayerState, Config) {
        let world = canonical_world();
        let state = PlayerState::new("Dale", &world.start_room);
        (world, state, Config::default())
    }

    #[test]
    fn bare_direction_moves_through_an_exit() {
        let (world, state, config) = setup();
        let reply = interpret(&world, &state, &config, "south");
        assert_eq!(
            reply.intents,
            vec![Intent::EnterRoom {
                room: "controlnexusreturned".to_string(),
                direction: Some(Direction::South),
            }]
        );
    }

    #[test]
    fn missing_exit_is_refused_without_intents() {
        let (world, state, config) = setup();
        let reply = interpret(&world, &state, &config, "go down");
        assert_eq!(reply.lines, vec!["You can't go that way.".to_string()]);
        assert!(reply.intents.is_empty());
    }

    #[test]
    fn using_an_item_you_lack_changes_nothing() {
        let (world, mut state, config) = setup();
        let before = state.clone();
        let reply = interpret(&world, &state, &config, "use coffee");
        assert!(reply.lines[0].contains("don't have"));
        assert!(reply.intents.is_empty());
        apply_intents(&mut state, &world, reply.intents);
        state.log.clear();
        let mut before = before;
        before.log.clear();
        assert_eq!(state, before);
    }

    #[test]
    fn taking_a_fixture_item_awards_points_once() {
        let (world, mut state, config) = setup();
        state.current_room = "findlaterscorner".to_string();
        let reply = interpret(&world, &state, &config, "take coffee cup");
        apply_intents(&mut state, &world, reply.intents);
        assert!(state.inventory.contains("coffee"));
        assert_eq!(state.score, 5);

        // The fixture stays taken; a second grab is refused.
        let reply = interpret(&world, &state, &config, "take coffee cup");
        assert!(reply.intents.is_empty());
    }

    #[test]
    fn dropped_items_can_be_picked_back_up_without_rescoring() {
        let (world, mut state, config) = setup();
        state.current_room = "findlaterscorner".to_string();
        let reply = interpret(&world, &state, &config, "take coffee cup");
        apply_intents(&mut state, &world, reply.intents);
        let reply = interpret(&world, &state, &config, "drop coffee");
        apply_intents(&mut state, &world, reply.intents);
        assert!(!state.inventory.contains("coffee"));
        assert!(state.flag_set("dropped:findlaterscorner:coffee"));

        let reply = interpret(&world, &state, &config, "take coffee");
        apply_intents(&mut state, &world, reply.intents);
        assert!(state.inventory.contains("coffee"));
        assert_eq!(state.score, 5, "points award only on first pickup");
    }

    #[test]
    fn asking_about_a_known_topic_hits_the_trigger() {
        let (world, state, config) = setup();
        let reply = interpret(&world, &state, &config, "ask ayla about help");
        assert!(reply.lines[0].contains("Stay close to the nexus"));
        assert_eq!(
            reply.intents,
            vec![
                Intent::RecordNpcFact {
                    npc: "ayla".to_string(),
                    fact: "asked:help".to_string(),
                },
                Intent::BumpNpc("ayla".to_string()),
            ]
        );
    }

    #[test]
    fn asked_topics_accumulate_in_npc_memory() {
        let (world, mut state, config) = setup();
        for input in ["ask ayla about help", "ask ayla about coffee", "thank ayla"] {
            let reply = interpret(&world, &state, &config, input);
            apply_intents(&mut state, &world, reply.intents);
        }
        let memory = state.npc_state("ayla").memory;
        assert!(memory.contains("asked:help"));
        assert!(memory.contains("asked:coffee"));
        assert!(memory.contains("thanked"));

        // Facts are a set that only grows; re-asking adds nothing new.
        let before = memory.len();
        let reply = interpret(&world, &state, &config, "ask ayla about help");
        apply_intents(&mut state, &world, reply.intents);
        assert_eq!(state.npc_state("ayla").memory.len(), before);
    }

    #[test]
    fn talking_to_an_absent_character_is_refused() {
        let (world, mut state, config) = setup();
        state.current_room = "greasystoon".to_string();
        let reply = interpret(&world, &state, &config, "talk to ayla");
        assert_eq!(reply.lines, vec!["Ayla isn't here.".to_string()]);
        let reply = interpret(&world, &state, &config, "talk to zorg");
        assert_eq!(reply.lines, vec!["There's no such character.".to_string()]);
    }

    #[test]
    fn pressing_the_button_requests_a_reset() {
        let (world, mut state, config) = setup();
        state.current_room = "controlnexusreturned".to_string();
        let reply = interpret(&world, &state, &config, "press button");
        assert_eq!(reply.intents, vec![Intent::Reset(ResetKind::SoftReset)]);

        // Away from the chamber the button does not exist.
        state.current_room = world.start_room.clone();
        let reply = interpret(&world, &state, &config, "press button");
        assert!(reply.intents.is_empty());
    }

    #[test]
    fn debug_commands_are_gated() {
        let (world, mut state, mut config) = setup();
        config.debug.enabled = false;
        let reply = interpret(&world, &state, &config, "/debug");
        assert_eq!(reply.lines, vec!["Access denied.".to_string()]);

        config.debug.enabled = true;
        let reply = interpret(&world, &state, &config, "/debug");
        assert_eq!(reply.lines, vec!["Debug mode on.".to_string()]);
        apply_intents(&mut state, &world, reply.intents);
        assert!(state.flag_set(FLAG_DEBUG));

        let reply = interpret(&world, &state, &config, "/traps");
        assert_eq!(reply.trap_op, Some(TrapOp::Report));

        let reply = interpret(&world, &state, &config, "/state");
        assert!(reply.lines.iter().any(|l| l.contains("current_room")));
    }

    #[test]
    fn door_override_commands_track_the_override_flag() {
        let (world, mut state, mut config) = setup();
        config.debug.enabled = true;
        let reply = interpret(&world, &state, &config, "/debug");
        apply_intents(&mut state, &world, reply.intents);

        // Nothing to turn off yet.
        let reply = interpret(&world, &state, &config, "/doorsoff");
        assert_eq!(
            reply.lines,
            vec!["The door override is not active.".to_string()]
        );
        assert!(reply.intents.is_empty());

        let reply = interpret(&world, &state, &config, "/doors");
        apply_intents(&mut state, &world, reply.intents);
        assert!(state.flag_set(FLAG_DOORS));

        // A second /doors is a no-op while the override holds.
        let reply = interpret(&world, &state, &config, "/doors");
        assert_eq!(reply.lines, vec!["The doors are already open.".to_string()]);
        assert!(reply.intents.is_empty());

        let reply = interpret(&world, &state, &config, "/doorsoff");
        apply_intents(&mut state, &world, reply.intents);
        assert!(!state.flag_set(FLAG_DOORS));
    }

    #[test]
    fn unknown_input_falls_through_to_the_room_puzzle() {
        let (world, mut state, config) = setup();
        state.current_room = "archivewing".to_string();
        state.inventory.insert("lattice_key".to_string());
        let reply = interpret(&world, &state, &config, "turn key");
        apply_intents(&mut state, &world, reply.intents);
        assert!(state.flag_set("puzzle:archive_door"));

        // With the puzzle spent, the same words are just noise.
        let reply = interpret(&world, &state, &config, "turn key");
        assert_eq!(reply.lines, vec!["Unknown command. Try 'help'.".to_string()]);
    }

    #[test]
    fn godmode_is_limited_to_configured_names() {
        let (world, state, mut config) = setup();
        let reply = interpret(&world, &state, &config, "godmode");
        assert_eq!(reply.lines, vec!["Nothing happens.".to_string()]);

        config.debug.godmode_players = vec!["dale".to_string()];
        let reply = interpret(&world, &state, &config, "godmode");
        assert!(!reply.intents.is_empty());
    }
}
