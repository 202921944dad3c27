//! Game objects: type-resolved entities owning animation tables.

use indexmap::IndexMap;

use crate::anim::{decode_sprite_tiles, ObjectAnimation};
use crate::graphics::SpriteTile;
use crate::storage::GameObjectRecord;

/// Name of the animation synthesized when a record defines none.
const FALLBACK_ANIMATION: &str = "default";

/// The record families that resolve to game objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameObjectKind {
    /// Enemies.
    Enemy,
    /// Interactive objects (NPCs, cutscene actors, triggers).
    Interaction,
    /// Parts: small auxiliary objects (projectiles, debris).
    Part,
}

impl GameObjectKind {
    /// Lowercase kind name, used in messages and storage keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enemy => "enemy",
            Self::Interaction => "interaction",
            Self::Part => "part",
        }
    }

    /// The define prefix whose constants name this kind's type codes.
    pub fn constants_prefix(&self) -> &'static str {
        match self {
            Self::Enemy => "ENEMYID_",
            Self::Interaction => "INTERACID_",
            Self::Part => "PARTID_",
        }
    }
}

/// A type-resolved entity (enemy, interaction, part) owning its animations.
///
/// Constructed by the project registry from raw storage; one instance per
/// `(kind, id << 8 | sub_id)` key.
#[derive(Debug)]
pub struct GameObject {
    kind: GameObjectKind,
    id: u8,
    sub_id: u8,
    name: String,
    animations: IndexMap<String, ObjectAnimation>,
    default_animation: String,
}

impl GameObject {
    pub(crate) fn from_record(kind: GameObjectKind, key: u32, record: GameObjectRecord) -> Self {
        // Decode the shared frame table first; animations reference into it.
        // A malformed table entry poisons every animation of the object.
        let mut frame_table: Vec<Vec<SpriteTile>> = Vec::with_capacity(record.frame_table.len());
        let mut table_error = None;
        for (i, raw) in record.frame_table.iter().enumerate() {
            match decode_sprite_tiles(raw) {
                Ok(tiles) => frame_table.push(tiles),
                Err(e) => {
                    table_error = Some(format!("frame {i}: {e}"));
                    break;
                }
            }
        }

        let mut animations = IndexMap::new();
        for (name, data) in &record.animations {
            let animation = match &table_error {
                Some(message) => ObjectAnimation::invalid(name.clone(), message.clone()),
                None => ObjectAnimation::from_raw(name.clone(), data, &frame_table),
            };
            animations.insert(name.clone(), animation);
        }

        // Every game object designates exactly one default animation; fall
        // back to the first table, or an empty one, when the record names
        // none that exists.
        let default_animation = record
            .default_animation
            .filter(|name| animations.contains_key(name))
            .or_else(|| animations.keys().next().cloned())
            .unwrap_or_else(|| {
                animations.insert(
                    FALLBACK_ANIMATION.to_string(),
                    ObjectAnimation::empty(FALLBACK_ANIMATION),
                );
                FALLBACK_ANIMATION.to_string()
            });

        Self {
            kind,
            id: (key >> 8) as u8,
            sub_id: (key & 0xFF) as u8,
            name: record.name,
            animations,
            default_animation,
        }
    }

    /// The object's record family.
    pub fn kind(&self) -> GameObjectKind {
        self.kind
    }

    /// The object's primary type code.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// The object's sub-type code.
    pub fn sub_id(&self) -> u8 {
        self.sub_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an animation table by name.
    pub fn animation(&self, name: &str) -> Option<&ObjectAnimation> {
        self.animations.get(name)
    }

    /// Iterate over the animation tables in declaration order.
    pub fn animations(&self) -> impl Iterator<Item = &ObjectAnimation> {
        self.animations.values()
    }

    /// Number of animation tables.
    pub fn num_animations(&self) -> usize {
        self.animations.len()
    }

    /// The designated default animation, used for static previews.
    ///
    /// Always present; for an object with no animation data its frame
    /// lookup fails with [`RomError::NoAnimation`](crate::RomError).
    pub fn default_animation(&self) -> &ObjectAnimation {
        // The constructor guarantees the entry exists.
        &self.animations[&self.default_animation]
    }
}
