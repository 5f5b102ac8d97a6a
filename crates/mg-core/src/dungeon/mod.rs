//! Dungeon layout
//!
//! Block partitioning, room placement, corridors between adjacent rooms, and
//! the wall/roof pass that dresses the ground layout.

mod adjacency;
mod corridor;
mod generation;
mod rect;
mod room;
mod walls;

pub use adjacency::{AdjacencyIndex, Neighbors, Side};
pub use corridor::{connect_rooms, Corridor};
pub use generation::{GenerationStrategy, Layout};
pub use rect::{BlockPartitioner, Rect, MAX_ROOMS, MIN_ROOMS};
pub use room::{place_room, Room, Sides};
pub use walls::WallRoofSynthesizer;
