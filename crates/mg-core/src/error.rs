//! Error types for the generator

use thiserror::Error;

use crate::generator::GeneratorState;

/// Errors raised by generator construction and mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapGenError {
    #[error("Invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Wall height {value} is outside {min}..={max}")]
    WallHeightOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Minimum room size {value} is below {min}")]
    RoomSizeTooSmall { value: u32, min: u32 },

    #[error("Minimum room size {value} is above {max}")]
    RoomSizeTooLarge { value: u32, max: u32 },

    #[error("Generator is not ready (state: {state})")]
    NotReady { state: GeneratorState },
}
