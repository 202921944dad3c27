//! Drawing boundary.
//!
//! The model never renders anything itself. A host hands a [`DrawSurface`]
//! to the drawing calls; the model emits sprite tiles into it and holds no
//! reference to the surface beyond the call.

use bitflags::bitflags;

bitflags! {
    /// Hardware attribute bits of a sprite tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpriteFlags: u8 {
        /// Tile is drawn behind the background layer.
        const PRIORITY = 0x80;
        /// Tile is flipped vertically.
        const FLIP_Y = 0x40;
        /// Tile is flipped horizontally.
        const FLIP_X = 0x20;
        /// Tile data comes from the second character bank.
        const BANK = 0x08;
    }
}

/// One drawable sprite tile of an animation frame.
///
/// `x`/`y` are signed offsets from the frame's origin; the low three bits
/// of `flags` select the palette, the rest are [`SpriteFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteTile {
    /// Index into the character tile set.
    pub tile_index: u16,
    /// Horizontal offset from the frame origin.
    pub x: i8,
    /// Vertical offset from the frame origin.
    pub y: i8,
    /// Raw attribute byte.
    pub flags: u8,
}

impl SpriteTile {
    /// Create a tile with no attribute bits set.
    pub fn new(tile_index: u16, x: i8, y: i8) -> Self {
        Self {
            tile_index,
            x,
            y,
            flags: 0,
        }
    }

    /// The attribute bits, without the palette number.
    pub fn sprite_flags(&self) -> SpriteFlags {
        SpriteFlags::from_bits_truncate(self.flags)
    }

    /// The palette number (low three attribute bits).
    pub fn palette(&self) -> u8 {
        self.flags & 0x07
    }
}

/// A pure sink the model draws frames and tiles into.
///
/// Implemented by the host's rendering layer; the model only calls
/// [`draw_tile`](DrawSurface::draw_tile) for the duration of a draw call.
pub trait DrawSurface {
    /// Draw one sprite tile at the given surface coordinates.
    fn draw_tile(&mut self, tile: &SpriteTile, x: i32, y: i32);
}
