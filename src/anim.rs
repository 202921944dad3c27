//! Animation playback state.
//!
//! An [`ObjectAnimation`] is an ordered sequence of frames, each with a
//! display duration and drawable tile content. The model exposes
//! current-frame lookup and an externally driven tick counter
//! ([`AnimationPlayer`]); it never touches a clock.
//!
//! Raw animation data is a sequence of `(duration, frame_ref)` byte pairs,
//! terminated by an `$FF` duration; `frame_ref` indexes the owning object's
//! frame table. Malformed data marks the whole animation invalid, which
//! surfaces at frame lookup time so a host can draw an error marker instead
//! of crashing.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Result, RomError};
use crate::graphics::{DrawSurface, SpriteTile};

/// Duration byte that terminates an animation's frame sequence.
const ANIMATION_TERMINATOR: u8 = 0xFF;

/// Bytes per packed sprite-tile record: y, x, tile index (u16 LE), flags.
const SPRITE_RECORD_SIZE: usize = 5;

/// One drawable step of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAnimationFrame {
    duration: u8,
    tiles: Vec<SpriteTile>,
}

impl ObjectAnimationFrame {
    /// Create a frame from a duration and its tile content.
    pub fn new(duration: u8, tiles: Vec<SpriteTile>) -> Self {
        Self { duration, tiles }
    }

    /// Tick count before the animation advances past this frame.
    pub fn duration(&self) -> u8 {
        self.duration
    }

    /// The frame's drawable tiles.
    pub fn tiles(&self) -> &[SpriteTile] {
        &self.tiles
    }

    /// Draw the frame with its origin at `(x, y)`.
    pub fn draw(&self, surface: &mut dyn DrawSurface, x: i32, y: i32) {
        for tile in &self.tiles {
            surface.draw_tile(tile, x + i32::from(tile.x), y + i32::from(tile.y));
        }
    }
}

/// An ordered sequence of animation frames.
#[derive(Debug, Clone)]
pub struct ObjectAnimation {
    name: String,
    frames: Vec<ObjectAnimationFrame>,
    /// Set when the raw data failed to decode; checked before any lookup.
    malformed: Option<String>,
}

impl ObjectAnimation {
    /// Create an animation with no frames defined.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            malformed: None,
        }
    }

    /// Create an animation from already-decoded frames.
    pub fn from_frames(name: impl Into<String>, frames: Vec<ObjectAnimationFrame>) -> Self {
        Self {
            name: name.into(),
            frames,
            malformed: None,
        }
    }

    /// Decode an animation from raw `(duration, frame_ref)` pairs.
    ///
    /// Decoding problems do not fail construction; they mark the animation
    /// malformed and surface as [`RomError::InvalidAnimation`] when a frame
    /// is looked up.
    pub fn from_raw(
        name: impl Into<String>,
        data: &[u8],
        frame_table: &[Vec<SpriteTile>],
    ) -> Self {
        let name = name.into();
        match decode_frames(data, frame_table) {
            Ok(frames) => Self {
                name,
                frames,
                malformed: None,
            },
            Err(message) => Self {
                name,
                frames: Vec::new(),
                malformed: Some(message),
            },
        }
    }

    /// Create an animation already known to be malformed.
    pub(crate) fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            malformed: Some(message.into()),
        }
    }

    /// The animation's table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of decoded frames.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Look up a frame by index.
    ///
    /// Fails with [`RomError::InvalidAnimation`] if the underlying data was
    /// malformed, [`RomError::NoAnimation`] if no frames are defined, or
    /// [`RomError::FrameOutOfRange`] for an index past the last frame.
    pub fn frame(&self, index: usize) -> Result<&ObjectAnimationFrame> {
        if let Some(message) = &self.malformed {
            return Err(RomError::InvalidAnimation(message.clone()));
        }
        if self.frames.is_empty() {
            return Err(RomError::NoAnimation);
        }
        self.frames.get(index).ok_or(RomError::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }
}

fn decode_frames(
    data: &[u8],
    frame_table: &[Vec<SpriteTile>],
) -> std::result::Result<Vec<ObjectAnimationFrame>, String> {
    let mut frames = Vec::new();
    let mut bytes = data.iter().copied();

    while let Some(duration) = bytes.next() {
        if duration == ANIMATION_TERMINATOR {
            break;
        }
        if duration == 0 {
            return Err(format!("zero duration in frame {}", frames.len()));
        }
        let frame_ref = bytes
            .next()
            .ok_or_else(|| format!("truncated entry in frame {}", frames.len()))?;
        let tiles = frame_table
            .get(usize::from(frame_ref))
            .ok_or_else(|| format!("frame reference {frame_ref} out of range"))?;
        frames.push(ObjectAnimationFrame::new(duration, tiles.clone()));
    }
    Ok(frames)
}

/// Decode packed sprite-tile records (y, x, u16 LE tile index, flags).
pub(crate) fn decode_sprite_tiles(data: &[u8]) -> Result<Vec<SpriteTile>> {
    if data.len() % SPRITE_RECORD_SIZE != 0 {
        return Err(RomError::InvalidAnimation(format!(
            "sprite record length {} not a multiple of {SPRITE_RECORD_SIZE}",
            data.len()
        )));
    }
    let mut cursor = Cursor::new(data);
    let mut tiles = Vec::with_capacity(data.len() / SPRITE_RECORD_SIZE);
    for _ in 0..data.len() / SPRITE_RECORD_SIZE {
        let y = cursor
            .read_i8()
            .map_err(|e| RomError::InvalidAnimation(e.to_string()))?;
        let x = cursor
            .read_i8()
            .map_err(|e| RomError::InvalidAnimation(e.to_string()))?;
        let tile_index = cursor
            .read_u16::<LittleEndian>()
            .map_err(|e| RomError::InvalidAnimation(e.to_string()))?;
        let flags = cursor
            .read_u8()
            .map_err(|e| RomError::InvalidAnimation(e.to_string()))?;
        tiles.push(SpriteTile {
            tile_index,
            x,
            y,
            flags,
        });
    }
    Ok(tiles)
}

/// Externally ticked frame-sequencing state.
///
/// The host drives [`tick`](AnimationPlayer::tick) from its own clock; the
/// player only counts ticks and wraps the frame index modulo the current
/// animation's frame count.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationPlayer {
    frame_index: usize,
    counter: u32,
}

impl AnimationPlayer {
    /// Create a player positioned at frame 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current frame index.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Rewind to frame 0 with a cleared tick counter.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.counter = 0;
    }

    /// Advance the tick counter by one against the given animation.
    ///
    /// Once the counter has reached the current frame's duration, the next
    /// tick resets it and advances the frame index, wrapping modulo the
    /// animation's frame count. Returns the frame index after the tick.
    /// Animation lookup errors propagate unchanged.
    pub fn tick(&mut self, animation: &ObjectAnimation) -> Result<usize> {
        let duration = animation.frame(self.frame_index)?.duration();
        if self.counter >= u32::from(duration) {
            self.counter = 0;
            self.frame_index = (self.frame_index + 1) % animation.num_frames();
        }
        self.counter += 1;
        Ok(self.frame_index)
    }
}
