//! Dungeon: an ordered sequence of floors over a shared room index space.

use indexmap::IndexMap;

use crate::error::{Result, RomError};
use crate::event::{EventHandlers, Subscription};
use crate::storage::DungeonRecord;

/// One floor of a dungeon: a grid of room-index bytes.
///
/// Floors are purely positional; they carry no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    rooms: Vec<u8>,
}

impl Floor {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            rooms: vec![0; width * height],
        }
    }

    fn from_rooms(mut rooms: Vec<u8>, width: usize, height: usize) -> Self {
        rooms.resize(width * height, 0);
        Self { rooms }
    }

    /// The floor's room-index bytes, row-major.
    pub fn rooms(&self) -> &[u8] {
        &self.rooms
    }
}

/// A dungeon: ordered floors, each a grid of room indices, plus a flat
/// key-value "base data" record of dungeon-wide properties.
///
/// Floor edits reorder the floor sequence only; room indices referenced by
/// grid cells are never renumbered (rooms are shared by reference, and the
/// same index may appear in any number of cells).
#[derive(Debug)]
pub struct Dungeon {
    index: u8,
    width: usize,
    height: usize,
    floors: Vec<Floor>,
    base: IndexMap<String, u8>,
    structure_changed: EventHandlers<()>,
}

impl Dungeon {
    /// Create a dungeon with a single empty floor.
    pub fn new(index: u8, width: usize, height: usize) -> Self {
        Self {
            index,
            width,
            height,
            floors: vec![Floor::empty(width, height)],
            base: IndexMap::new(),
            structure_changed: EventHandlers::new(),
        }
    }

    pub(crate) fn from_record(index: u8, record: DungeonRecord) -> Self {
        let width = record.width;
        let height = record.height;
        let mut floors: Vec<Floor> = record
            .floors
            .into_iter()
            .map(|rooms| Floor::from_rooms(rooms, width, height))
            .collect();
        // A dungeon always has at least one floor.
        if floors.is_empty() {
            floors.push(Floor::empty(width, height));
        }
        Self {
            index,
            width,
            height,
            floors,
            base: record.base,
            structure_changed: EventHandlers::new(),
        }
    }

    /// The dungeon's index.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Floor grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Floor grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of floors; always at least 1.
    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    /// Get a floor by index.
    pub fn floor(&self, floor: usize) -> Result<&Floor> {
        self.floors.get(floor).ok_or(RomError::FloorOutOfRange {
            floor,
            num_floors: self.floors.len(),
        })
    }

    /// Insert a new, empty floor at `index`.
    ///
    /// Valid positions are `0..=num_floors()`; floors at or above `index`
    /// shift up by one. Raises structure-changed.
    pub fn insert_floor(&mut self, index: usize) -> Result<()> {
        if index > self.floors.len() {
            return Err(RomError::FloorOutOfRange {
                floor: index,
                num_floors: self.floors.len(),
            });
        }
        self.floors.insert(index, Floor::empty(self.width, self.height));
        self.structure_changed.raise(&());
        Ok(())
    }

    /// Remove the floor at `index`, shifting later floors down.
    ///
    /// Refused with [`RomError::LastFloor`] when only one floor remains;
    /// the dungeon is unchanged on any error. Raises structure-changed.
    pub fn remove_floor(&mut self, index: usize) -> Result<()> {
        if self.floors.len() <= 1 {
            return Err(RomError::LastFloor);
        }
        if index >= self.floors.len() {
            return Err(RomError::FloorOutOfRange {
                floor: index,
                num_floors: self.floors.len(),
            });
        }
        self.floors.remove(index);
        self.structure_changed.raise(&());
        Ok(())
    }

    /// The room-index byte at a grid cell.
    pub fn room_index(&self, x: usize, y: usize, floor: usize) -> Result<u8> {
        let f = self.floor(floor)?;
        self.check_bounds(x, y)?;
        Ok(f.rooms[y * self.width + x])
    }

    /// Assign a room index to a grid cell.
    ///
    /// Pure grid-cell assignment: the index is not validated against any
    /// populated room (resolution is lazy). Raises structure-changed.
    pub fn set_room(&mut self, x: usize, y: usize, floor: usize, room_index: u8) -> Result<()> {
        if floor >= self.floors.len() {
            return Err(RomError::FloorOutOfRange {
                floor,
                num_floors: self.floors.len(),
            });
        }
        self.check_bounds(x, y)?;
        self.floors[floor].rooms[y * self.width + x] = room_index;
        self.structure_changed.raise(&());
        Ok(())
    }

    /// Read a dungeon-wide base data value.
    pub fn base_value(&self, name: &str) -> Option<u8> {
        self.base.get(name).copied()
    }

    /// Write a dungeon-wide base data value.
    pub fn set_base_value(&mut self, name: impl Into<String>, value: u8) {
        self.base.insert(name.into(), value);
    }

    /// Iterate over the base data record in declaration order.
    pub fn base_values(&self) -> impl Iterator<Item = (&str, u8)> {
        self.base.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Subscribe to this dungeon's structure-changed event.
    pub fn subscribe_structure_changed(
        &mut self,
        handler: impl FnMut(&()) + 'static,
    ) -> Subscription {
        self.structure_changed.subscribe(handler)
    }

    /// Unsubscribe a previously registered handler.
    pub fn unsubscribe_structure_changed(&mut self, subscription: Subscription) -> bool {
        self.structure_changed.unsubscribe(subscription)
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(RomError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
