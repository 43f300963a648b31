//! da-core: delayed level actions
//!
//! World-wide changes ("all holy allies turn hostile") cannot be applied to
//! levels that are not loaded. They are recorded in a global, append-only log
//! and replayed into each level when it becomes active. Per-level counters
//! answer "does this kind of monster still exist anywhere?" without loading
//! anything.
//!
//! This crate contains the game-state logic only; persistence lives in
//! `da-save`.

pub mod daction;
pub mod dungeon;
pub mod monster;
pub mod object;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use daction::{DactionLog, DactionType, DaCounters, NUM_DA_COUNTERS, NUM_DACTIONS};
pub use rng::GameRng;
pub use world::{DactionError, Hero, LevelEvent, SessionOptions, WorldSession};
