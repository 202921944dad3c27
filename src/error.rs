//! Error types for the romdata library

use thiserror::Error;

/// Main error type for romdata operations
#[derive(Debug, Error)]
pub enum RomError {
    /// A symbolic constant name is not present in a constants mapping
    #[error("Unknown constant name: {0}")]
    UnknownName(String),

    /// A byte code is not present in a constants mapping
    #[error("Unknown byte code: {0:#04X}")]
    UnknownCode(u8),

    /// An expression could not be evaluated to an integer
    #[error("Bad expression: {0}")]
    BadExpression(String),

    /// A constant evaluated outside the byte range (strict mode only)
    #[error("Constant {name} evaluates to {value}, outside 0-255")]
    ValueOutOfRange { name: String, value: i64 },

    /// A record key has no corresponding storage
    #[error("Invalid {kind} key: {key:#X}")]
    InvalidKey { kind: &'static str, key: u32 },

    /// Grid coordinates outside a floor or tile grid
    #[error("Coordinates ({x},{y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Floor index outside the dungeon's floor sequence
    #[error("Floor {floor} out of range (dungeon has {num_floors} floors)")]
    FloorOutOfRange { floor: usize, num_floors: usize },

    /// Removing the last remaining floor is refused
    #[error("Cannot remove the last floor of a dungeon")]
    LastFloor,

    /// Object index outside a group's object list
    #[error("Object index {index} out of range (group has {len} objects)")]
    ObjectOutOfRange { index: usize, len: usize },

    /// Position accessor on an object type that carries no position
    #[error("Object type {0} has no position data")]
    NoPosition(&'static str),

    /// The object has no animation frames defined
    ///
    /// An expected "nothing to draw" case; callers normally skip it.
    #[error("No animation defined")]
    NoAnimation,

    /// Animation data could not be decoded
    ///
    /// A data-integrity problem, distinct from [`RomError::NoAnimation`];
    /// callers drawing previews should render a visible error marker.
    #[error("Invalid animation data: {0}")]
    InvalidAnimation(String),

    /// Frame index outside the animation's frame sequence
    #[error("Frame {index} out of range (animation has {len} frames)")]
    FrameOutOfRange { index: usize, len: usize },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for romdata operations
pub type Result<T> = std::result::Result<T, RomError>;

impl From<String> for RomError {
    fn from(s: String) -> Self {
        RomError::Custom(s)
    }
}

impl From<&str> for RomError {
    fn from(s: &str) -> Self {
        RomError::Custom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RomError::UnknownName("ENEMYID_OCTOROK".to_string());
        assert_eq!(err.to_string(), "Unknown constant name: ENEMYID_OCTOROK");
    }

    #[test]
    fn test_code_error_formats_hex() {
        let err = RomError::UnknownCode(0x5A);
        assert!(err.to_string().contains("0x5A"));
    }

    #[test]
    fn test_bounds_error() {
        let err = RomError::OutOfBounds {
            x: 9,
            y: 2,
            width: 8,
            height: 8,
        };
        assert!(err.to_string().contains("(9,2)"));
        assert!(err.to_string().contains("8x8"));
    }

    #[test]
    fn test_animation_errors_are_distinct() {
        let none = RomError::NoAnimation;
        let bad = RomError::InvalidAnimation("zero duration".to_string());
        assert!(matches!(none, RomError::NoAnimation));
        assert!(matches!(bad, RomError::InvalidAnimation(_)));
        assert_ne!(none.to_string(), bad.to_string());
    }
}
