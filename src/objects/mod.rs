//! Placed-object model: recursive groups of object instances and the
//! type-resolved game objects they materialize into.

pub mod definition;
pub mod game_object;
pub mod group;

pub use definition::{ObjectDefinition, PlacedObjectType};
pub use game_object::{GameObject, GameObjectKind};
pub use group::{GroupId, ObjectGroup, ObjectGroupKind, ObjectGroupTree};
