//! Error types for subtile-engine.

use thiserror::Error;

use crate::core::ConstructionError;

/// Failures while publishing to a host display.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// I/O error from the display backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A legend entry named a key that is not in the published tile map.
    #[error("unknown tile key {0:?}")]
    UnknownKey(char),

    /// A legend was published before the tile map.
    #[error("legend published before tile map")]
    MapNotSet,
}

/// Anything that can go wrong while building a compositor.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("display error: {0}")]
    Display(#[from] DisplayError),
}
