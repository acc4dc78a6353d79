use thiserror::Error;

/// Rejected game configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 2x2 cells, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid dimensions {width}x{height} exceed the supported coordinate range")]
    GridTooLarge { width: usize, height: usize },
    #[error("tick rate must be between 1 and 120 Hz, got {0}")]
    InvalidTickRate(u32),
    #[error("initial snake length {length} does not fit on a {width}-wide grid")]
    InvalidInitialLength { length: usize, width: usize },
}

/// Outcome of a food placement that found nowhere to go.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on the grid")]
    GridFull,
}
