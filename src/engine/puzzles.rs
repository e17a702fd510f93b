//! One-shot, room-scoped puzzles with prerequisites and reward intents.

use log::debug;

use crate::engine::state::{FlagValue, Intent, PlayerState};
use crate::engine::types::{PuzzleRecord, PuzzleReward};
use crate::engine::world::World;

/// The puzzle still awaiting a solution in the given room, if any.
pub fn live_puzzle<'a>(world: &'a World, room_id: &str, state: &PlayerState) -> Option<&'a PuzzleRecord> {
    world
        .puzzles
        .values()
        .find(|puzzle| puzzle.room == room_id && !state.flag_set(&puzzle.solved_flag))
}

/// Outcome of attempting a puzzle step.
#[derive(Debug, PartialEq)]
pub enum AttemptOutcome {
    /// Solved puzzle, unknown puzzle id, or a step that is not part of the
    /// solution: silently ignored.
    Ignored,
    /// The step was right but prerequisites are unmet; the attempt is not
    /// consumed.
    MissingRequirements(Vec<Intent>),
    /// Solved: the flag is set permanently and the reward applied.
    Solved(Vec<Intent>),
}

/// Attempt one solution step against a puzzle. Solving is one-shot and
/// irreversible: the solved flag only ever gets set, and a second correct
/// attempt lands in [`AttemptOutcome::Ignored`].
pub fn attempt_step(
    world: &World,
    puzzle_id: &str,
    step: &str,
    state: &PlayerState,
) -> AttemptOutcome {
    let Some(puzzle) = world.puzzles.get(puzzle_id) else {
        debug!("attempt on unknown puzzle id {}", puzzle_id);
        return AttemptOutcome::Ignored;
    };
    if state.flag_set(&puzzle.solved_flag) {
        return AttemptOutcome::Ignored;
    }
    let step = step.trim().to_ascii_lowercase();
    if !puzzle.solution_steps.contains(&step) {
        return AttemptOutcome::Ignored;
    }

    let items_ok = puzzle
        .required_items
        .iter()
        .all(|item| state.inventory.contains(item));
    let traits_ok = puzzle
        .required_traits
        .iter()
        .all(|name| state.traits.contains(name));
    if !items_ok || !traits_ok {
        return AttemptOutcome::MissingRequirements(vec![Intent::Log(
            "You lack the requirements.".to_string(),
        )]);
    }

    let mut intents = vec![Intent::SetFlag {
        key: puzzle.solved_flag.clone(),
        value: FlagValue::Bool(true),
    }];
    match &puzzle.reward {
        PuzzleReward::UnlockExit {
            room,
            direction,
            destination,
        } => {
            intents.push(Intent::UnlockExit {
                room: room.clone(),
                direction: *direction,
                destination: destination.clone(),
            });
            intents.push(Intent::Log(format!(
                "Something shifts. A way {} opens.",
                direction.label()
            )));
        }
        PuzzleReward::GainTrait { name } => {
            intents.push(Intent::GrantTrait(name.clone()));
        }
    }
    intents.push(Intent::Log("A puzzle clicks into place.".to_string()));
    AttemptOutcome::Solved(intents)
}
