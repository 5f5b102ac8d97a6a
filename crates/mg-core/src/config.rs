//! Generator configuration
//!
//! Immutable for the lifetime of one generation pass. Room sizes are
//! silently normalized (a maximum below the minimum is raised to it), while
//! values the algorithm cannot work with are rejected by `validate`.

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;

/// Smallest supported wall height
pub const MIN_WALL_HEIGHT: u32 = 1;

/// Largest supported wall height
pub const MAX_WALL_HEIGHT: u32 = 3;

/// Smallest supported room edge
pub const MIN_ROOM_SIZE: u32 = 3;

/// Largest supported room edge; larger maxima are clamped, larger minima rejected
pub const MAX_ROOM_SIZE: u32 = 1 << 16;

/// Layout and wall parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rows of wall face between a room and its roof (1..=3)
    pub wall_height: u32,
    /// Minimum room edge length
    pub min_room_size: u32,
    /// Maximum room edge length
    pub max_room_size: u32,
    /// Draw wall faces below the roof on the far side of southern borders
    pub show_outer_wall: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            wall_height: 1,
            min_room_size: 5,
            max_room_size: 10,
            show_outer_wall: true,
        }
    }
}

impl GeneratorConfig {
    /// Clamp `max_room_size` to `MAX_ROOM_SIZE`, then raise it to
    /// `min_room_size` when it is smaller
    pub fn normalized(mut self) -> Self {
        self.max_room_size = self.max_room_size.min(MAX_ROOM_SIZE);
        if self.max_room_size < self.min_room_size {
            self.max_room_size = self.min_room_size;
        }
        self
    }

    /// Reject configurations outside the supported ranges
    pub fn validate(&self) -> Result<(), MapGenError> {
        if !(MIN_WALL_HEIGHT..=MAX_WALL_HEIGHT).contains(&self.wall_height) {
            return Err(MapGenError::WallHeightOutOfRange {
                value: self.wall_height,
                min: MIN_WALL_HEIGHT,
                max: MAX_WALL_HEIGHT,
            });
        }
        if self.min_room_size < MIN_ROOM_SIZE {
            return Err(MapGenError::RoomSizeTooSmall {
                value: self.min_room_size,
                min: MIN_ROOM_SIZE,
            });
        }
        if self.min_room_size > MAX_ROOM_SIZE {
            return Err(MapGenError::RoomSizeTooLarge {
                value: self.min_room_size,
                max: MAX_ROOM_SIZE,
            });
        }
        Ok(())
    }

    /// Wall height as a signed grid distance
    pub fn wall_height(&self) -> i32 {
        self.wall_height.min(MAX_WALL_HEIGHT) as i32
    }

    /// Minimum room edge as a grid distance, capped at `MAX_ROOM_SIZE`
    pub fn min_room_size(&self) -> i32 {
        self.min_room_size.min(MAX_ROOM_SIZE) as i32
    }

    /// Maximum room edge as a grid distance, capped at `MAX_ROOM_SIZE`
    pub fn max_room_size(&self) -> i32 {
        self.max_room_size.min(MAX_ROOM_SIZE) as i32
    }

    /// Margin a room keeps from its block edge (wall rows plus the roof row)
    pub fn wall_margin(&self) -> i32 {
        self.wall_height() + 1
    }

    /// Smallest block extent that can still host a minimum-size room
    pub fn min_block_size(&self) -> i32 {
        self.min_room_size()
            .saturating_add(self.wall_margin().saturating_mul(2))
            .saturating_add(2)
    }
}
