//! Error types for subtile-core.

use thiserror::Error;

/// Construction-time failures.
///
/// Drawing never fails: out-of-bounds access is clipped silently. The only
/// hard errors happen when a buffer, sprite or tile grid is created with
/// dimensions that cannot back a nibble-packed store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Width or height was zero.
    #[error("empty dimensions: {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },

    /// Cell count does not fit the address space.
    #[error("dimensions too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    /// Source data length does not match the declared dimensions.
    #[error("data length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Tile size was zero.
    #[error("invalid tile size: {0}")]
    InvalidTileSize(u32),

    /// More tiles than the key encoder can name.
    #[error("tile grid needs {needed} keys but the key budget is {budget}")]
    KeyBudgetExceeded { needed: usize, budget: usize },

    /// The key encoder produced no usable key (e.g. a surrogate code point
    /// or a newline, which would break the tile map rows).
    #[error("no valid tile key for index {0}")]
    InvalidKey(usize),

    /// Two tiles were given the same key.
    #[error("tile key {key:?} used twice (index {index})")]
    DuplicateKey { key: char, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_messages_carry_details() {
        let err = ConstructionError::EmptyDimensions {
            width: 0,
            height: 4,
        };
        assert_eq!(err.to_string(), "empty dimensions: 0x4");

        let err = ConstructionError::KeyBudgetExceeded {
            needed: 1000,
            budget: 80,
        };
        let msg = err.to_string();
        assert!(msg.contains("1000"));
        assert!(msg.contains("80"));
    }

    #[test]
    fn data_length_mismatch_display() {
        let err = ConstructionError::DataLength {
            expected: 16,
            actual: 12,
        };
        assert!(err.to_string().contains("expected 16, got 12"));
    }
}
