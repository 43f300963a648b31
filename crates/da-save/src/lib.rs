//! da-save: save/restore for delayed level action worlds
//!
//! A save holds the session (log, travel cache, hero, RNG seed), the active
//! level and every stored level. Each restored level's cursor is checked
//! against the restored log before the world is handed back.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

use da_core::dungeon::{Level, LevelId};
use da_core::WorldSession;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Save file corrupted")]
    Corrupted,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// A whole game world: the session plus every level it knows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub session: WorldSession,
    pub current: Level,
    pub stored_levels: Vec<Level>,
}

impl World {
    /// Start a world on a freshly generated `current` level
    pub fn new(mut session: WorldSession, mut current: Level) -> Self {
        session.register_new_level(&mut current);
        Self {
            session,
            current,
            stored_levels: Vec::new(),
        }
    }

    /// Add a freshly generated level to storage
    pub fn add_level(&mut self, mut level: Level) {
        self.session.register_new_level(&mut level);
        self.stored_levels.push(level);
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        if self.current.id == id {
            return Some(&self.current);
        }
        self.stored_levels.iter().find(|l| l.id == id)
    }

    pub fn level_ids(&self) -> Vec<LevelId> {
        let mut ids: Vec<_> = std::iter::once(self.current.id)
            .chain(self.stored_levels.iter().map(|l| l.id))
            .collect();
        ids.sort();
        ids
    }

    /// Make stored level `id` active, catching it up
    ///
    /// Returns the number of delayed actions replayed, or `None` if no such
    /// level is stored.
    pub fn change_level(&mut self, id: LevelId) -> Option<usize> {
        if self.current.id == id {
            return Some(0);
        }
        let idx = self.stored_levels.iter().position(|l| l.id == id)?;
        let next = self.stored_levels.swap_remove(idx);
        let previous = std::mem::replace(&mut self.current, next);
        self.session.recompute_level_counters(&previous);
        self.stored_levels.push(previous);
        Some(self.session.enter_level(&mut self.current))
    }
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Active level at save time
    pub level: String,
    /// Delayed actions scheduled so far
    pub dactions: usize,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "DACT";

    pub fn new(world: &World) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            level: world.current.id.to_string(),
            dactions: world.session.dactions.len(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub session: WorldSession,
    pub current: Level,
    pub stored_levels: Vec<Level>,
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    header: SaveHeader,
    session: &'a WorldSession,
    current: &'a Level,
    stored_levels: &'a [Level],
}

impl<'a> SaveFileRef<'a> {
    fn new(world: &'a World) -> Self {
        Self {
            header: SaveHeader::new(world),
            session: &world.session,
            current: &world.current,
            stored_levels: &world.stored_levels,
        }
    }
}

/// Save the world to a file
pub fn save_world(world: &World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &SaveFileRef::new(world))?;
    Ok(())
}

/// Save the world to a compact file (no pretty printing)
pub fn save_world_compact(world: &World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, &SaveFileRef::new(world))?;
    Ok(())
}

fn read_save_file(path: impl AsRef<Path>) -> Result<SaveFile, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| match e.classify() {
        // Well-formed JSON holding impossible values, e.g. an unknown tag.
        Category::Data => {
            tracing::warn!(error = %e, "save file holds invalid data");
            SaveError::Corrupted
        }
        _ => SaveError::Serialization(e),
    })
}

/// Load a world from a file
pub fn load_world(path: impl AsRef<Path>) -> Result<World, SaveError> {
    let save_file = read_save_file(path)?;
    save_file.header.validate()?;

    let world = World {
        session: save_file.session,
        current: save_file.current,
        stored_levels: save_file.stored_levels,
    };
    let ids = world.level_ids();
    if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
        tracing::warn!(level = %dup[0], "rejecting save: level stored twice");
        return Err(SaveError::Corrupted);
    }
    for level in std::iter::once(&world.current).chain(&world.stored_levels) {
        if let Err(e) = world.session.attach_level(level) {
            tracing::warn!(level = %level.id, error = %e, "rejecting save");
            return Err(SaveError::Corrupted);
        }
    }
    Ok(world)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let save_file = read_save_file(path)?;
    save_file.header.validate()?;
    Ok(save_file.header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Get the default save path for a world name
pub fn default_save_path(name: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("dactions");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", name));
    path
}
