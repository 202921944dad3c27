//! Raw project storage boundary.
//!
//! The registry reads typed records out of a [`RecordSource`]; how the
//! source gets its data (assembly text, extracted binaries, a test
//! fixture) is outside the model. [`MemoryStorage`] is the bundled
//! in-memory implementation, used by hosts assembling a project
//! programmatically and by tests.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::objects::game_object::GameObjectKind;

/// Raw fields of a dungeon record.
#[derive(Debug, Clone, Default)]
pub struct DungeonRecord {
    /// Floor grid width.
    pub width: usize,
    /// Floor grid height.
    pub height: usize,
    /// Room-index bytes per floor, bottom floor first, row-major.
    pub floors: Vec<Vec<u8>>,
    /// Dungeon-wide key-value properties.
    pub base: IndexMap<String, u8>,
}

/// Raw fields of a room record.
#[derive(Debug, Clone, Default)]
pub struct RoomRecord {
    /// Tile grid width.
    pub width: usize,
    /// Tile grid height.
    pub height: usize,
    /// Tile-index bytes, row-major.
    pub tiles: Vec<u8>,
    /// Packed dungeon-flag byte.
    pub flags: u8,
}

/// Raw fields of a game-object record.
#[derive(Debug, Clone, Default)]
pub struct GameObjectRecord {
    /// Display name.
    pub name: String,
    /// Packed sprite records, one blob per drawable frame.
    pub frame_table: Vec<Vec<u8>>,
    /// Animation tables: `(table name, raw (duration, frame_ref) pairs)`.
    pub animations: Vec<(String, Vec<u8>)>,
    /// Table name of the designated default animation.
    pub default_animation: Option<String>,
}

/// Read access to a project's raw records.
///
/// A missing key returns `None`; the registry surfaces that as
/// [`RomError::InvalidKey`](crate::RomError).
pub trait RecordSource {
    /// Read the dungeon record at `index`.
    fn dungeon_record(&self, index: u8) -> Option<DungeonRecord>;

    /// Read the room record at `index`.
    fn room_record(&self, index: u16) -> Option<RoomRecord>;

    /// Read the game-object record at a composite `id << 8 | sub_id` key.
    fn game_object_record(&self, kind: GameObjectKind, key: u32) -> Option<GameObjectRecord>;
}

/// In-memory [`RecordSource`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    dungeons: AHashMap<u8, DungeonRecord>,
    rooms: AHashMap<u16, RoomRecord>,
    game_objects: AHashMap<(GameObjectKind, u32), GameObjectRecord>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a dungeon record.
    pub fn insert_dungeon(&mut self, index: u8, record: DungeonRecord) -> &mut Self {
        self.dungeons.insert(index, record);
        self
    }

    /// Insert (or replace) a room record.
    pub fn insert_room(&mut self, index: u16, record: RoomRecord) -> &mut Self {
        self.rooms.insert(index, record);
        self
    }

    /// Insert (or replace) a game-object record.
    pub fn insert_game_object(
        &mut self,
        kind: GameObjectKind,
        key: u32,
        record: GameObjectRecord,
    ) -> &mut Self {
        self.game_objects.insert((kind, key), record);
        self
    }
}

impl RecordSource for MemoryStorage {
    fn dungeon_record(&self, index: u8) -> Option<DungeonRecord> {
        self.dungeons.get(&index).cloned()
    }

    fn room_record(&self, index: u16) -> Option<RoomRecord> {
        self.rooms.get(&index).cloned()
    }

    fn game_object_record(&self, kind: GameObjectKind, key: u32) -> Option<GameObjectRecord> {
        self.game_objects.get(&(kind, key)).cloned()
    }
}
