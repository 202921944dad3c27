//! Placed object instances and their packed positions.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::error::{Result, RomError};
use crate::objects::game_object::GameObjectKind;
use crate::objects::group::GroupId;

/// The placed-object opcode family.
///
/// Whether an instance carries a position, and how that position is
/// encoded, is a property of the type, not of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacedObjectType {
    /// Gate: following objects only load when a condition holds.
    Condition,
    /// An interactive object (NPC, trigger, cutscene actor).
    Interaction,
    /// Jump to another object list.
    Pointer,
    /// Objects that load only while the dungeon boss is alive.
    BossObject,
    /// Objects that load only once the dungeon boss is dead.
    AntiBossObject,
    /// An enemy spawned at a random free position.
    RandomEnemy,
    /// An enemy placed at a specific position.
    SpecificEnemy,
    /// A part: small auxiliary object (projectile source, door, debris).
    Part,
    /// An object taking a full four-byte parameter block.
    QuadrupleValue,
    /// An item drop placed on a 16-pixel grid.
    ItemDrop,
}

static OPCODE_TABLE: Lazy<AHashMap<&'static str, PlacedObjectType>> = Lazy::new(|| {
    let mut m = AHashMap::new();
    m.insert("obj_Condition", PlacedObjectType::Condition);
    m.insert("obj_Interaction", PlacedObjectType::Interaction);
    m.insert("obj_Pointer", PlacedObjectType::Pointer);
    m.insert("obj_BossObject", PlacedObjectType::BossObject);
    m.insert("obj_AntiBossObject", PlacedObjectType::AntiBossObject);
    m.insert("obj_RandomEnemy", PlacedObjectType::RandomEnemy);
    m.insert("obj_SpecificEnemy", PlacedObjectType::SpecificEnemy);
    m.insert("obj_Part", PlacedObjectType::Part);
    m.insert("obj_WithParam", PlacedObjectType::QuadrupleValue);
    m.insert("obj_ItemDrop", PlacedObjectType::ItemDrop);
    m
});

impl PlacedObjectType {
    /// Resolve a source opcode name (`obj_SpecificEnemy`, ...).
    pub fn from_opcode(opcode: &str) -> Option<Self> {
        OPCODE_TABLE.get(opcode).copied()
    }

    /// The type's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Condition => "Condition",
            Self::Interaction => "Interaction",
            Self::Pointer => "Pointer",
            Self::BossObject => "BossObject",
            Self::AntiBossObject => "AntiBossObject",
            Self::RandomEnemy => "RandomEnemy",
            Self::SpecificEnemy => "SpecificEnemy",
            Self::Part => "Part",
            Self::QuadrupleValue => "QuadrupleValue",
            Self::ItemDrop => "ItemDrop",
        }
    }

    /// Whether instances of this type carry a position at all.
    pub fn has_position(&self) -> bool {
        matches!(
            self,
            Self::Interaction
                | Self::SpecificEnemy
                | Self::Part
                | Self::QuadrupleValue
                | Self::ItemDrop
        )
    }

    /// Whether the position uses the shortened one-byte encoding
    /// (one nibble per axis, 16-pixel cells).
    pub fn has_short_position(&self) -> bool {
        matches!(self, Self::Part | Self::ItemDrop)
    }

    /// The game-object family this type resolves to, if any.
    pub fn game_object_kind(&self) -> Option<GameObjectKind> {
        match self {
            Self::Interaction => Some(GameObjectKind::Interaction),
            Self::BossObject | Self::AntiBossObject | Self::RandomEnemy | Self::SpecificEnemy => {
                Some(GameObjectKind::Enemy)
            }
            Self::Part | Self::ItemDrop => Some(GameObjectKind::Part),
            Self::Condition | Self::Pointer | Self::QuadrupleValue => None,
        }
    }
}

/// Position payload of a placed object.
///
/// Full positions store one byte per axis. Short positions pack both axes
/// into one byte (y high nibble, x low nibble), each scaled to a 16-pixel
/// cell and centered with +8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    None,
    Full { x: u8, y: u8 },
    Short(u8),
}

/// One placed object instance inside an object group.
///
/// Identity is the owning `(group, index)` pair; moving an object mutates
/// its position bytes in place and never changes its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDefinition {
    object_type: PlacedObjectType,
    id: u8,
    sub_id: u8,
    position: Position,
    group: Option<GroupId>,
}

impl ObjectDefinition {
    /// Create an object of the given type with a zeroed position payload.
    pub fn new(object_type: PlacedObjectType, id: u8, sub_id: u8) -> Self {
        let position = if object_type.has_short_position() {
            Position::Short(0)
        } else if object_type.has_position() {
            Position::Full { x: 0, y: 0 }
        } else {
            Position::None
        };
        Self {
            object_type,
            id,
            sub_id,
            position,
            group: None,
        }
    }

    /// The placed-object type.
    pub fn object_type(&self) -> PlacedObjectType {
        self.object_type
    }

    /// Primary type code; resolved to a symbolic name through the kind's
    /// constants mapping.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Sub-type code.
    pub fn sub_id(&self) -> u8 {
        self.sub_id
    }

    /// The owning group, once the object has been added to a tree.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: GroupId) {
        self.group = Some(group);
    }

    /// Whether this object carries a position (type-level property).
    pub fn has_position(&self) -> bool {
        self.object_type.has_position()
    }

    /// Whether the position uses the shortened encoding (type-level).
    pub fn has_short_position(&self) -> bool {
        self.object_type.has_short_position()
    }

    /// The object's X pixel coordinate.
    pub fn x(&self) -> Result<u8> {
        match self.position {
            Position::None => Err(RomError::NoPosition(self.object_type.name())),
            Position::Full { x, .. } => Ok(x),
            Position::Short(b) => Ok((b & 0x0F) * 16 + 8),
        }
    }

    /// The object's Y pixel coordinate.
    pub fn y(&self) -> Result<u8> {
        match self.position {
            Position::None => Err(RomError::NoPosition(self.object_type.name())),
            Position::Full { y, .. } => Ok(y),
            Position::Short(b) => Ok((b >> 4) * 16 + 8),
        }
    }

    /// Set the X coordinate.
    ///
    /// Short positions snap to the center of their 16-pixel cell.
    pub fn set_x(&mut self, value: u8) -> Result<()> {
        match &mut self.position {
            Position::None => Err(RomError::NoPosition(self.object_type.name())),
            Position::Full { x, .. } => {
                *x = value;
                Ok(())
            }
            Position::Short(b) => {
                *b = (*b & 0xF0) | (value >> 4);
                Ok(())
            }
        }
    }

    /// Set the Y coordinate.
    pub fn set_y(&mut self, value: u8) -> Result<()> {
        match &mut self.position {
            Position::None => Err(RomError::NoPosition(self.object_type.name())),
            Position::Full { y, .. } => {
                *y = value;
                Ok(())
            }
            Position::Short(b) => {
                *b = (*b & 0x0F) | (value & 0xF0);
                Ok(())
            }
        }
    }

    /// The packed short-position byte, for types using that encoding.
    pub fn short_position(&self) -> Option<u8> {
        match self.position {
            Position::Short(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_resolution() {
        assert_eq!(
            PlacedObjectType::from_opcode("obj_SpecificEnemy"),
            Some(PlacedObjectType::SpecificEnemy)
        );
        assert_eq!(
            PlacedObjectType::from_opcode("obj_WithParam"),
            Some(PlacedObjectType::QuadrupleValue)
        );
        assert_eq!(PlacedObjectType::from_opcode("obj_Bogus"), None);
    }

    #[test]
    fn test_position_predicates() {
        assert!(!PlacedObjectType::Condition.has_position());
        assert!(!PlacedObjectType::Pointer.has_position());
        assert!(PlacedObjectType::SpecificEnemy.has_position());
        assert!(!PlacedObjectType::SpecificEnemy.has_short_position());
        assert!(PlacedObjectType::ItemDrop.has_position());
        assert!(PlacedObjectType::ItemDrop.has_short_position());
    }

    #[test]
    fn test_full_position_roundtrip() {
        let mut obj = ObjectDefinition::new(PlacedObjectType::SpecificEnemy, 0x05, 0);
        obj.set_x(0x48).unwrap();
        obj.set_y(0x58).unwrap();
        assert_eq!(obj.x().unwrap(), 0x48);
        assert_eq!(obj.y().unwrap(), 0x58);
    }

    #[test]
    fn test_short_position_snaps_to_cell_center() {
        let mut obj = ObjectDefinition::new(PlacedObjectType::ItemDrop, 0x01, 0);
        obj.set_x(0x37).unwrap(); // cell 3
        obj.set_y(0x21).unwrap(); // cell 2
        assert_eq!(obj.x().unwrap(), 3 * 16 + 8);
        assert_eq!(obj.y().unwrap(), 2 * 16 + 8);
        assert_eq!(obj.short_position(), Some(0x23));
    }

    #[test]
    fn test_positionless_type_errors() {
        let mut obj = ObjectDefinition::new(PlacedObjectType::Pointer, 0, 0);
        assert!(matches!(obj.x(), Err(RomError::NoPosition("Pointer"))));
        assert!(matches!(obj.set_y(4), Err(RomError::NoPosition(_))));
        assert_eq!(obj.short_position(), None);
    }

    #[test]
    fn test_game_object_kind_mapping() {
        assert_eq!(
            PlacedObjectType::RandomEnemy.game_object_kind(),
            Some(GameObjectKind::Enemy)
        );
        assert_eq!(
            PlacedObjectType::Interaction.game_object_kind(),
            Some(GameObjectKind::Interaction)
        );
        assert_eq!(PlacedObjectType::Condition.game_object_kind(), None);
    }
}
