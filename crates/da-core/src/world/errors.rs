//! Delayed-action errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DactionError {
    /// A stored tag that names no delayed action
    #[error("unknown delayed action tag {0}")]
    UnknownDaction(u8),

    /// A level claims to have applied more entries than the log holds
    #[error("level cursor {cursor} is past the end of the delayed action log ({len} entries)")]
    CursorAhead { cursor: usize, len: usize },

    /// A level's cell or knowledge grid is not the full map size
    #[error("level {level} map is not {cols}x{rows}")]
    MapSize {
        level: String,
        cols: usize,
        rows: usize,
    },
}
