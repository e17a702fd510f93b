//! # Gorstan - a multiverse text adventure engine
//!
//! Gorstan is a single-player text adventure set across the Gorstan
//! multiverse: a control nexus, a quantum lattice, and a corner of London
//! that keeps resetting. The crate ships the complete game engine plus the
//! canonical world, and the `gorstan` binary wraps it in a terminal REPL.
//!
//! ## Features
//!
//! - **Room Graph**: Static and state-dependent exits, dynamic room
//!   descriptions, and on-enter hooks, all data-driven.
//! - **Intents**: Every state mutation flows through one ordered intent
//!   queue, so commands apply all-or-nothing and replay deterministically.
//! - **Traps**: Randomly seeded, armed on entry, firing on a logical clock
//!   that advances once per command.
//! - **NPCs**: Per-character dialogue cycles, topic triggers, and moods that
//!   only ever escalate.
//! - **Puzzles**: One-shot, room-scoped, with item/trait prerequisites and
//!   exit-unlocking or trait-granting rewards.
//! - **Resets**: The big red button. Every seventh press wipes the world
//!   back to the start room.
//! - **Persistence**: Sled-backed snapshot saves with schema versioning.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gorstan::config::Config;
//! use gorstan::engine::{canonical_world, GameEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let mut engine = GameEngine::new(config, canonical_world());
//!     let outcome = engine.submit_command("look");
//!     for line in outcome.lines {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - The game engine: world model, rules, interpreter, session
//! - [`config`] - Configuration management and validation
//! - [`logutil`] - Log sanitization helpers

pub mod config;
pub mod engine;
pub mod logutil;
