//! # romdata
//!
//! A pure Rust data-model backend for editors of ROM-disassembly projects.
//!
//! A disassembly encodes game data (dungeons, rooms, object placements,
//! animations) as symbolic constants and indexed tables in assembly source.
//! This library presents that data as a live, mutable object graph that a
//! host editor can display and edit, while staying consistent with the
//! underlying representation.
//!
//! ## Features
//!
//! - Symbolic constant resolution: define extraction, expression
//!   evaluation, prefix-scoped bidirectional name ↔ byte-code mappings
//! - An identity-map registry: one live instance per typed record key
//! - A hierarchical map model (Dungeon → Floor → Room grid) with
//!   structural edits and change notifications
//! - A recursive object-group model of placed object instances
//! - Animation playback state driven by an external tick
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use romdata::{MemoryStorage, Project};
//!
//! let mut project = Project::new(Box::new(MemoryStorage::new()));
//! project.load_defines(".define ENEMYID_OCTOROK $05");
//!
//! let mapping = project.enemy_mapping()?;
//! assert_eq!(mapping.name_to_code("ENEMYID_OCTOROK")?, 0x05);
//! # Ok::<(), romdata::RomError>(())
//! ```
//!
//! ## Architecture
//!
//! - `Project` - central registry and object-identity authority
//! - `RecordSource` - boundary to the project's raw storage
//! - `ConstantsMapping` - name ↔ byte-code resolution
//! - `Dungeon` / `Room` - the structural map model
//! - `ObjectGroupTree` - placed object instances
//! - `GameObject` / `ObjectAnimation` - type-resolved entities and their
//!   animation data
//!
//! The model is single-threaded and synchronous: every call runs to
//! completion, and a host embedding it in a threaded environment must
//! serialize access itself.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod anim;
pub mod constants;
pub mod defines;
pub mod error;
pub mod eval;
pub mod event;
pub mod graphics;
pub mod map;
pub mod notification;
pub mod objects;
pub mod project;
pub mod storage;

// Re-export commonly used types
pub use error::{Result, RomError};

pub use constants::{ConstantsMapping, MappingConfiguration};
pub use defines::DefineTable;
pub use eval::{AsmEvaluator, ExpressionEvaluator};
pub use event::{EventHandlers, Subscription};

// Re-export map types
pub use map::{Dungeon, DungeonFlags, Floor, Room};

// Re-export object and animation types
pub use anim::{AnimationPlayer, ObjectAnimation, ObjectAnimationFrame};
pub use graphics::{DrawSurface, SpriteFlags, SpriteTile};
pub use objects::{
    GameObject, GameObjectKind, GroupId, ObjectDefinition, ObjectGroup, ObjectGroupKind,
    ObjectGroupTree, PlacedObjectType,
};

// Re-export project and storage
pub use project::Project;
pub use storage::{
    DungeonRecord, GameObjectRecord, MemoryStorage, RecordSource, RoomRecord,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_empty_project_creation() {
        let mut project = Project::new(Box::new(MemoryStorage::new()));
        assert!(project.defines().is_empty());
        assert!(project.enemy_mapping().unwrap().is_empty());
    }
}
