//! The Gorstan game engine.
//!
//! Layered bottom-up: [`types`] and [`state`] define the data model,
//! the domain modules ([`rooms`], [`inventory`], [`ledger`], [`npc`],
//! [`traps`], [`puzzles`], [`reset`]) implement the rules, [`commands`]
//! turns player text into intents, and [`session`] ties one player's
//! run together. [`save`] persists snapshots; [`world`] ships the
//! canonical Gorstan map.

pub mod commands;
pub mod errors;
pub mod inventory;
pub mod ledger;
pub mod npc;
pub mod puzzles;
pub mod reset;
pub mod rooms;
pub mod save;
pub mod session;
pub mod state;
pub mod traps;
pub mod types;
pub mod world;

pub use errors::EngineError;
pub use session::{CommandOutcome, GameEngine, RoomView};
pub use state::{Intent, PlayerState};
pub use world::{canonical_world, World};
