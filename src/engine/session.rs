//! Session facade: one player, one world, one logical clock.
//!
//! [`GameEngine`] owns the mutable [`PlayerState`] and the session-scoped
//! trap table. Each submitted command is interpreted, applied to a working
//! copy of the state, and committed only if the whole batch applied; the
//! clock advances exactly once per command.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::engine::commands::{self, TrapOp};
use crate::engine::errors::EngineError;
use crate::engine::ledger;
use crate::engine::npc;
use crate::engine::rooms;
use crate::engine::save::{SaveSnapshot, SaveStore};
use crate::engine::state::{apply_intents, Intent, PlayerState};
use crate::engine::traps::{TrapStatus, TrapSystem};
use crate::engine::world::World;
use crate::logutil::escape_log;

/// Everything a frontend needs after one command: the lines to print and a
/// read-only copy of the post-command state for status panels.
#[derive(Debug)]
pub struct CommandOutcome {
    pub lines: Vec<String>,
    pub snapshot: PlayerState,
}

/// A render-ready view of the player's surroundings.
#[derive(Debug)]
pub struct RoomView {
    pub title: String,
    pub lines: Vec<String>,
}

pub struct GameEngine {
    config: Config,
    world: World,
    state: PlayerState,
    traps: TrapSystem,
}

impl GameEngine {
    /// Start a fresh session. Trap placement is drawn from `rng_seed` when
    /// the config pins one, so identical configs replay identically. The
    /// configured start room becomes the world's start room (sessions begin
    /// there and full resets return there) when it names a real room;
    /// otherwise the world's own start room stands.
    pub fn new(config: Config, mut world: World) -> Self {
        if world.rooms.contains_key(&config.game.start_room) {
            world.start_room = config.game.start_room.clone();
        } else {
            warn!(
                "configured start room {} is not in this world; using {}",
                escape_log(&config.game.start_room),
                world.start_room
            );
        }
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let traps = TrapSystem::seed(&world.room_ids(), &mut rng, config.debug.disable_traps);
        let state = PlayerState::new(&config.game.player, &world.start_room);
        info!(
            "session start: player={} start_room={}",
            escape_log(&state.player_name),
            state.current_room
        );
        let mut engine = GameEngine {
            config,
            world,
            state,
            traps,
        };
        // The starting room counts as entered.
        let room = engine.state.current_room.clone();
        engine.traps.on_enter_room(&room, engine.state.clock);
        engine
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Interpret and apply one line of player input. The command either
    /// lands in full or, on an internal fault, not at all.
    pub fn submit_command(&mut self, input: &str) -> CommandOutcome {
        let reply = commands::interpret(&self.world, &self.state, &self.config, input);
        let mut working = self.state.clone();
        let mut lines = reply.lines;

        let room_before = working.current_room.clone();
        lines.extend(apply_intents(&mut working, &self.world, reply.intents));

        // Trait unlocks observe one post-command snapshot.
        let unlocked: Vec<Intent> = ledger::check_trait_unlocks(&working, &self.world.traits)
            .into_iter()
            .map(Intent::GrantTrait)
            .collect();
        lines.extend(apply_intents(&mut working, &self.world, unlocked));

        working.clock += 1;
        if working.current_room != room_before {
            self.traps.on_enter_room(&working.current_room, working.clock);
        }

        match reply.trap_op {
            Some(TrapOp::Defuse) => {
                lines.push(self.traps.defuse(&working.current_room));
            }
            Some(TrapOp::Report) => {
                lines.extend(self.trap_report());
            }
            None => {}
        }

        let trap_intents = self.traps.tick(working.clock, &working);
        lines.extend(apply_intents(&mut working, &self.world, trap_intents));

        self.state = working;
        CommandOutcome {
            lines,
            snapshot: self.state.clone(),
        }
    }

    /// The current room rendered for display, NPC presence included.
    pub fn room_view(&self) -> RoomView {
        let Some(room) = rooms::get_room(&self.world, &self.state.current_room) else {
            return RoomView {
                title: "Nowhere".to_string(),
                lines: vec!["You are nowhere. That shouldn't be possible.".to_string()],
            };
        };
        let mut lines = rooms::render_room(&self.world, room, &self.state);
        for npc_id in npc::visible_in_room(&self.world, &room.id, &self.state) {
            if let Some(record) = self.world.npcs.get(&npc_id) {
                lines.push(format!("{} is here.", record.name));
            }
        }
        RoomView {
            title: room.title.clone(),
            lines,
        }
    }

    fn trap_report(&self) -> Vec<String> {
        let live = self.traps.live_rooms();
        if live.is_empty() {
            return vec!["No live traps.".to_string()];
        }
        let mut lines = vec!["Live traps:".to_string()];
        for (room_id, status) in live {
            let detail = match status {
                TrapStatus::Seeded => "seeded".to_string(),
                TrapStatus::Armed { deadline } => format!("armed, fires at tick {}", deadline),
                TrapStatus::Disarmed | TrapStatus::Triggered => continue,
            };
            lines.push(format!("  {} ({})", room_id, detail));
        }
        lines
    }

    /// A deep copy of the player state, suitable for persistence.
    pub fn snapshot(&self) -> PlayerState {
        self.state.clone()
    }

    /// Replace the live state with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: PlayerState) -> Result<(), EngineError> {
        if !self.world.rooms.contains_key(&snapshot.current_room) {
            return Err(EngineError::NotFound(format!(
                "snapshot room {}",
                snapshot.current_room
            )));
        }
        let room = snapshot.current_room.clone();
        let clock = snapshot.clock;
        self.state = snapshot;
        // The restored room counts as freshly entered for trap purposes.
        self.traps.on_enter_room(&room, clock);
        Ok(())
    }

    pub fn save_to(&self, store: &dyn SaveStore) -> Result<(), EngineError> {
        store.save_snapshot(&SaveSnapshot::capture(self.snapshot()))
    }

    pub fn load_from(&mut self, store: &dyn SaveStore) -> Result<bool, EngineError> {
        match store.load_snapshot()? {
            Some(snapshot) => {
                self.restore(snapshot.state)?;
                Ok(true)
            }
            None => {
                warn!("no saved game to load");
                Ok(false)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn traps_mut(&mut self) -> &mut TrapSystem {
        &mut self.traps
    }
}
