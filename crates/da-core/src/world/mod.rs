//! World state
//!
//! The session owns everything that outlives a single level: the delayed
//! action log, the travel cache with its per-level counters, the hero's
//! position and the RNG.

pub mod errors;
mod events;
pub mod options;
mod session;

pub use errors::DactionError;
pub use events::LevelEvent;
pub use options::{OptionsError, SessionOptions};
pub use session::{Hero, WorldSession};
