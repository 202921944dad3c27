//! The project: object-identity authority over all typed records.
//!
//! A `Project` owns the raw record source, the define table, and one
//! identity-map cache per record kind. The first lookup of a key
//! constructs the record from storage; every later lookup returns the same
//! instance, so an edit made through one holder is seen by all of them.
//! Scope one `Project` per open disassembly; there are no globals.

use std::collections::hash_map::Entry;
use std::fmt;

use ahash::AHashMap;

use crate::constants::{ConstantsMapping, MappingConfiguration};
use crate::defines::DefineTable;
use crate::error::{Result, RomError};
use crate::eval::{AsmEvaluator, ExpressionEvaluator};
use crate::map::{Dungeon, Room};
use crate::notification::NotificationCollection;
use crate::objects::{GameObject, GameObjectKind, ObjectDefinition};
use crate::storage::RecordSource;

/// A loaded project: registry, defines, and diagnostics.
pub struct Project {
    storage: Box<dyn RecordSource>,
    defines: DefineTable,
    notifications: NotificationCollection,
    config: MappingConfiguration,
    dungeons: AHashMap<u8, Dungeon>,
    rooms: AHashMap<u16, Room>,
    game_objects: AHashMap<(GameObjectKind, u32), GameObject>,
    mappings: AHashMap<GameObjectKind, ConstantsMapping>,
}

impl Project {
    /// Create a project over the given record source.
    pub fn new(storage: Box<dyn RecordSource>) -> Self {
        Self {
            storage,
            defines: DefineTable::new(),
            notifications: NotificationCollection::new(),
            config: MappingConfiguration::default(),
            dungeons: AHashMap::new(),
            rooms: AHashMap::new(),
            game_objects: AHashMap::new(),
            mappings: AHashMap::new(),
        }
    }

    /// Set the constants-mapping configuration.
    pub fn with_configuration(mut self, config: MappingConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Parse define declarations from a source text into the project.
    ///
    /// May be called repeatedly as sources load; constants mappings are
    /// rebuilt on next access.
    pub fn load_defines(&mut self, source: &str) {
        self.defines
            .extend_from_source(source, Some(&mut self.notifications));
        self.mappings.clear();
    }

    /// The project's define table.
    pub fn defines(&self) -> &DefineTable {
        &self.defines
    }

    /// Diagnostics collected while parsing and building mappings.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Evaluate an expression against the project's defines.
    pub fn eval_to_int(&self, expr: &str) -> Result<i64> {
        AsmEvaluator::with_defines(&self.defines).eval(expr)
    }

    // ==================== Registry ====================

    /// Get the dungeon at `index`, constructing it on first access.
    pub fn dungeon(&mut self, index: u8) -> Result<&Dungeon> {
        Ok(self.dungeon_mut(index)?)
    }

    /// Mutable access to the dungeon at `index`.
    pub fn dungeon_mut(&mut self, index: u8) -> Result<&mut Dungeon> {
        match self.dungeons.entry(index) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let record =
                    self.storage
                        .dungeon_record(index)
                        .ok_or(RomError::InvalidKey {
                            kind: "dungeon",
                            key: u32::from(index),
                        })?;
                Ok(v.insert(Dungeon::from_record(index, record)))
            }
        }
    }

    /// Get the room at `index`, constructing it on first access.
    pub fn room(&mut self, index: u16) -> Result<&Room> {
        Ok(self.room_mut(index)?)
    }

    /// Mutable access to the room at `index`.
    pub fn room_mut(&mut self, index: u16) -> Result<&mut Room> {
        match self.rooms.entry(index) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let record = self.storage.room_record(index).ok_or(RomError::InvalidKey {
                    kind: "room",
                    key: u32::from(index),
                })?;
                Ok(v.insert(Room::from_record(index, record)))
            }
        }
    }

    /// Resolve a dungeon grid cell to its room.
    ///
    /// The room's composite index is the dungeon's `group` base value
    /// (high byte) combined with the grid cell's room-index byte.
    pub fn room_at(&mut self, dungeon: u8, x: usize, y: usize, floor: usize) -> Result<&Room> {
        let index = self.room_index_at(dungeon, x, y, floor)?;
        self.room(index)
    }

    /// Mutable variant of [`room_at`](Project::room_at).
    pub fn room_at_mut(
        &mut self,
        dungeon: u8,
        x: usize,
        y: usize,
        floor: usize,
    ) -> Result<&mut Room> {
        let index = self.room_index_at(dungeon, x, y, floor)?;
        self.room_mut(index)
    }

    fn room_index_at(&mut self, dungeon: u8, x: usize, y: usize, floor: usize) -> Result<u16> {
        let d = self.dungeon(dungeon)?;
        let group = d.base_value("group").unwrap_or(0);
        let room_byte = d.room_index(x, y, floor)?;
        Ok((u16::from(group) << 8) | u16::from(room_byte))
    }

    /// Get a game object by kind and `(id, sub_id)` pair.
    pub fn game_object(&mut self, kind: GameObjectKind, id: u8, sub_id: u8) -> Result<&GameObject> {
        self.game_object_by_key(kind, (u32::from(id) << 8) | u32::from(sub_id))
    }

    /// Get a game object by a caller-constructed composite key
    /// (`id << 8 | sub_id`). The cache treats the key as opaque.
    pub fn game_object_by_key(&mut self, kind: GameObjectKind, key: u32) -> Result<&GameObject> {
        match self.game_objects.entry((kind, key)) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let record = self
                    .storage
                    .game_object_record(kind, key)
                    .ok_or(RomError::InvalidKey {
                        kind: kind.name(),
                        key,
                    })?;
                Ok(v.insert(GameObject::from_record(kind, key, record)))
            }
        }
    }

    /// Resolve a placed object to its game object.
    ///
    /// Fails for placed types that have no game-object family (conditions,
    /// pointers).
    pub fn game_object_for(&mut self, object: &ObjectDefinition) -> Result<&GameObject> {
        let kind = object.object_type().game_object_kind().ok_or_else(|| {
            RomError::Custom(format!(
                "object type {} has no game object",
                object.object_type().name()
            ))
        })?;
        self.game_object(kind, object.id(), object.sub_id())
    }

    // ==================== Constants mappings ====================

    /// The constants mapping for a game-object kind, built on first access
    /// from the defines with that kind's prefix.
    pub fn object_mapping(&mut self, kind: GameObjectKind) -> Result<&ConstantsMapping> {
        match self.mappings.entry(kind) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let evaluator = AsmEvaluator::with_defines(&self.defines);
                let mapping = ConstantsMapping::build_with_configuration(
                    &self.defines,
                    &evaluator,
                    kind.constants_prefix(),
                    self.config,
                    Some(&mut self.notifications),
                )?;
                Ok(v.insert(mapping))
            }
        }
    }

    /// The `ENEMYID_` constants mapping.
    pub fn enemy_mapping(&mut self) -> Result<&ConstantsMapping> {
        self.object_mapping(GameObjectKind::Enemy)
    }

    /// The `INTERACID_` constants mapping.
    pub fn interaction_mapping(&mut self) -> Result<&ConstantsMapping> {
        self.object_mapping(GameObjectKind::Interaction)
    }

    /// The `PARTID_` constants mapping.
    pub fn part_mapping(&mut self) -> Result<&ConstantsMapping> {
        self.object_mapping(GameObjectKind::Part)
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("defines", &self.defines.len())
            .field("dungeons", &self.dungeons.len())
            .field("rooms", &self.rooms.len())
            .field("game_objects", &self.game_objects.len())
            .field("notifications", &self.notifications.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DungeonRecord, MemoryStorage, RoomRecord};

    fn project_with_room() -> Project {
        let mut storage = MemoryStorage::new();
        storage.insert_room(
            0x045,
            RoomRecord {
                width: 10,
                height: 8,
                tiles: vec![0; 80],
                flags: 0,
            },
        );
        Project::new(Box::new(storage))
    }

    #[test]
    fn test_repeated_lookup_returns_same_instance() {
        let mut project = project_with_room();
        let first = project.room(0x045).unwrap() as *const Room;
        let second = project.room(0x045).unwrap() as *const Room;
        assert_eq!(first, second);
    }

    #[test]
    fn test_mutation_is_visible_through_later_lookups() {
        let mut project = project_with_room();
        project.room_mut(0x045).unwrap().set_tile(1, 1, 0x2F).unwrap();
        assert_eq!(project.room(0x045).unwrap().tile(1, 1).unwrap(), 0x2F);
    }

    #[test]
    fn test_invalid_key() {
        let mut project = project_with_room();
        assert!(matches!(
            project.room(0x999),
            Err(RomError::InvalidKey { kind: "room", key: 0x999 })
        ));
        // The failed lookup did not pollute the cache.
        assert!(project.room(0x999).is_err());
    }

    #[test]
    fn test_dungeon_lookup() {
        let mut storage = MemoryStorage::new();
        storage.insert_dungeon(
            2,
            DungeonRecord {
                width: 8,
                height: 8,
                floors: vec![vec![0; 64]],
                base: Default::default(),
            },
        );
        let mut project = Project::new(Box::new(storage));
        assert_eq!(project.dungeon(2).unwrap().num_floors(), 1);
        assert!(matches!(
            project.dungeon(3),
            Err(RomError::InvalidKey { kind: "dungeon", .. })
        ));
    }

    #[test]
    fn test_eval_to_int_uses_defines() {
        let mut project = project_with_room();
        project.load_defines(".define ENEMYID_OCTOROK $05");
        assert_eq!(project.eval_to_int("ENEMYID_OCTOROK").unwrap(), 5);
    }

    #[test]
    fn test_object_mapping_rebuilds_after_load_defines() {
        let mut project = project_with_room();
        project.load_defines(".define ENEMYID_OCTOROK $05");
        assert_eq!(project.enemy_mapping().unwrap().len(), 1);

        project.load_defines(".define ENEMYID_ROPE $06");
        let mapping = project.enemy_mapping().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.code_to_name(6).unwrap(), "ENEMYID_ROPE");
    }
}
