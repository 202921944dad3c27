//! Hierarchical map model: Dungeon → Floor → Room grid.

pub mod dungeon;
pub mod room;

pub use dungeon::{Dungeon, Floor};
pub use room::{DungeonFlags, Room};
