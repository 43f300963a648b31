//! Core constants

/// Map dimensions
pub const COLNO: usize = 80;
pub const ROWNO: usize = 21;

/// Depth of the Tomb level whose teleport-control restriction is announced
pub const TOMB_ANNOUNCE_DEPTH: i8 = 3;

/// Width of the map border skipped by whole-map feature scans
pub const MAP_BORDER: usize = 1;

/// Rot state of a corpse that is thoroughly rotten
pub const CORPSE_ROTTEN: i32 = 1;

/// Band tag carried by Pikel's slaves
pub const PIKEL_BAND: &str = "pikel_band";

/// Display name given to Pikel's slaves once freed
pub const FREED_SLAVE_NAME: &str = "freed slave";
