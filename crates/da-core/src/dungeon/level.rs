//! Level structure
//!
//! A level owns its map, monsters and floor items, plus the cursor into the
//! global delayed-action log recording how much of it has been replayed here.

use serde::{Deserialize, Serialize};

use super::{Cell, LevelId, MapKnowledge};
use crate::monster::{Monster, MonsterId};
use crate::object::{Object, ObjectClass, ObjectId};
use crate::rng::GameRng;
use crate::world::LevelEvent;
use crate::{COLNO, ROWNO};

fn default_cells() -> Vec<Vec<Cell>> {
    vec![vec![Cell::stone(); ROWNO]; COLNO]
}

fn default_knowledge() -> Vec<Vec<MapKnowledge>> {
    vec![vec![MapKnowledge::empty(); ROWNO]; COLNO]
}

/// Level flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFlags {
    /// Teleport control does not work here
    pub no_tele_control: bool,
    /// Magic mapping does not work here
    pub no_map: bool,
}

/// Complete level structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Level identifier
    pub id: LevelId,

    /// Map cells
    #[serde(default = "default_cells")]
    pub cells: Vec<Vec<Cell>>,

    /// Player map knowledge
    #[serde(default = "default_knowledge")]
    pub knowledge: Vec<Vec<MapKnowledge>>,

    /// All monsters on this level
    pub monsters: Vec<Monster>,

    /// All floor objects on this level
    pub objects: Vec<Object>,

    pub flags: LevelFlags,

    /// Number of delayed-action log entries already applied here
    pub dactions_done: usize,

    /// Events produced since the last drain (not persisted)
    #[serde(skip)]
    events: Vec<LevelEvent>,

    next_monster_id: u32,
    next_object_id: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(LevelId::default())
    }
}

impl Level {
    /// Create a new empty level
    pub fn new(id: LevelId) -> Self {
        Self {
            id,
            cells: default_cells(),
            knowledge: default_knowledge(),
            monsters: Vec::new(),
            objects: Vec::new(),
            flags: LevelFlags::default(),
            dactions_done: 0,
            events: Vec::new(),
            next_monster_id: 1,
            next_object_id: 1,
        }
    }

    /// Both map grids are `COLNO` columns of `ROWNO` cells
    pub fn has_full_map(&self) -> bool {
        self.cells.len() == COLNO
            && self.knowledge.len() == COLNO
            && self.cells.iter().all(|col| col.len() == ROWNO)
            && self.knowledge.iter().all(|col| col.len() == ROWNO)
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[x][y]
    }

    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[x][y]
    }

    pub const fn is_valid_pos(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as usize) < COLNO && (y as usize) < ROWNO
    }

    /// Positions inside the map, skipping `border` cells on each edge
    pub fn interior(&self, border: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let xs = border..COLNO.saturating_sub(border);
        let ys = border..ROWNO.saturating_sub(border);
        xs.flat_map(move |x| ys.clone().map(move |y| (x, y)))
    }

    /// Get monster by ID
    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// Get mutable monster by ID
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    /// Snapshot of the ids of living monsters, in level order
    ///
    /// Callers that may remove monsters iterate this and look each id up again.
    pub fn living_monster_ids(&self) -> Vec<MonsterId> {
        self.monsters
            .iter()
            .filter(|m| m.alive())
            .map(|m| m.id)
            .collect()
    }

    /// Iterate over living monsters
    pub fn living_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|m| m.alive())
    }

    /// Add a monster to the level, assigning it a fresh id
    pub fn add_monster(&mut self, mut monster: Monster) -> MonsterId {
        let id = MonsterId(self.next_monster_id);
        self.next_monster_id += 1;
        monster.id = id;
        self.monsters.push(monster);
        id
    }

    /// Remove a monster from the level
    pub fn remove_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let idx = self.monsters.iter().position(|m| m.id == id)?;
        Some(self.monsters.remove(idx))
    }

    /// Add an object to the floor
    pub fn add_object(&mut self, mut object: Object, x: i8, y: i8) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        object.id = id;
        object.x = x;
        object.y = y;
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn push_event(&mut self, event: LevelEvent) {
        self.events.push(event);
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Shuffle every deck lying on this level; returns how many were shuffled
    pub fn shuffle_all_decks(&mut self, rng: &mut GameRng) -> usize {
        let mut shuffled = 0;
        for obj in self.objects.iter_mut().filter(|o| o.class == ObjectClass::Deck) {
            rng.shuffle(&mut obj.cards);
            shuffled += 1;
        }
        shuffled
    }

    /// Forget magic-mapped knowledge, then map `radius` around `origin` again
    ///
    /// Directly seen cells are kept.
    pub fn reautomap(&mut self, origin: (i8, i8), radius: u8) {
        for col in &mut self.knowledge {
            for k in col {
                k.remove(MapKnowledge::MAGIC_MAPPED);
            }
        }
        if radius > 0 {
            self.magic_map_radius(origin, radius);
        }
    }

    /// Reveal every non-stone cell within `radius` (square) of `origin`
    pub fn magic_map_radius(&mut self, origin: (i8, i8), radius: u8) -> usize {
        if self.flags.no_map || !self.is_valid_pos(origin.0, origin.1) {
            return 0;
        }
        let r = radius as i32;
        let (ox, oy) = (origin.0 as i32, origin.1 as i32);
        let mut mapped = 0;
        for x in (ox - r).max(0)..=(ox + r).min(COLNO as i32 - 1) {
            for y in (oy - r).max(0)..=(oy + r).min(ROWNO as i32 - 1) {
                let (ux, uy) = (x as usize, y as usize);
                if self.cells[ux][uy].typ != super::CellType::Stone {
                    self.knowledge[ux][uy].insert(MapKnowledge::MAGIC_MAPPED);
                    mapped += 1;
                }
            }
        }
        mapped
    }

    pub fn is_mapped(&self, x: usize, y: usize) -> bool {
        !self.knowledge[x][y].is_empty()
    }
}
