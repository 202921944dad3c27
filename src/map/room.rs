//! Room: tile grid and packed per-room dungeon flags.

use bitflags::bitflags;

use crate::error::{Result, RomError};
use crate::event::{EventHandlers, Subscription};
use crate::storage::RoomRecord;

bitflags! {
    /// The room's packed minimap/dungeon property byte, one bit per flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DungeonFlags: u8 {
        /// Passage upward.
        const UP = 0x01;
        /// Passage to the right.
        const RIGHT = 0x02;
        /// Passage downward.
        const DOWN = 0x04;
        /// Passage to the left.
        const LEFT = 0x08;
        /// A small key is found here.
        const KEY = 0x10;
        /// A chest is found here.
        const CHEST = 0x20;
        /// The boss room.
        const BOSS = 0x40;
        /// The room is dark.
        const DARK = 0x80;
    }
}

/// One room of the map: a tile grid plus dungeon flags.
///
/// Rooms live in a global index space and are shared by reference: any
/// number of floor grid cells (in any dungeon) may cite the same room
/// index. A room does not know which dungeon positions reference it.
#[derive(Debug)]
pub struct Room {
    index: u16,
    width: usize,
    height: usize,
    tiles: Vec<u8>,
    dungeon_flags: DungeonFlags,
    room_modified: EventHandlers<()>,
}

impl Room {
    /// Create an empty room of the given dimensions.
    pub fn new(index: u16, width: usize, height: usize) -> Self {
        Self {
            index,
            width,
            height,
            tiles: vec![0; width * height],
            dungeon_flags: DungeonFlags::empty(),
            room_modified: EventHandlers::new(),
        }
    }

    pub(crate) fn from_record(index: u16, record: RoomRecord) -> Self {
        let mut tiles = record.tiles;
        tiles.resize(record.width * record.height, 0);
        Self {
            index,
            width: record.width,
            height: record.height,
            tiles,
            dungeon_flags: DungeonFlags::from_bits_retain(record.flags),
            room_modified: EventHandlers::new(),
        }
    }

    /// The room's composite index.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Tile grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tile grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the tile index at a grid cell.
    pub fn tile(&self, x: usize, y: usize) -> Result<u8> {
        self.check_bounds(x, y)?;
        Ok(self.tiles[y * self.width + x])
    }

    /// Set the tile index at a grid cell; raises room-modified.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: u8) -> Result<()> {
        self.check_bounds(x, y)?;
        self.tiles[y * self.width + x] = tile;
        self.room_modified.raise(&());
        Ok(())
    }

    /// The packed dungeon-flag byte.
    pub fn dungeon_flags(&self) -> DungeonFlags {
        self.dungeon_flags
    }

    /// Read a single dungeon flag.
    pub fn dungeon_flag(&self, flag: DungeonFlags) -> bool {
        self.dungeon_flags.contains(flag)
    }

    /// Write a single dungeon flag; raises room-modified.
    pub fn set_dungeon_flag(&mut self, flag: DungeonFlags, on: bool) {
        self.dungeon_flags.set(flag, on);
        self.room_modified.raise(&());
    }

    /// Subscribe to this room's modified event.
    pub fn subscribe_room_modified(&mut self, handler: impl FnMut(&()) + 'static) -> Subscription {
        self.room_modified.subscribe(handler)
    }

    /// Unsubscribe a previously registered handler.
    pub fn unsubscribe_room_modified(&mut self, subscription: Subscription) -> bool {
        self.room_modified.unsubscribe(subscription)
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
