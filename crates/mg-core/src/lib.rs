//! mg-core: procedural tile-map generation
//!
//! Partitions a map into blocks, places a room in each, joins neighboring
//! rooms with corridors, grows walls and roofs around the ground, and resolves
//! every cell into a multi-layer autotile buffer a renderer can draw directly.
//!
//! The crate has no I/O. Randomness comes in through [`RandomSource`] and
//! side effects on the host game go out through [`HostCollaborator`].

pub mod autotile;
pub mod buffer;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod generator;
pub mod grid;
pub mod host;
pub mod rng;
pub mod symbol;
pub mod tile;

pub use autotile::AutotileResolver;
pub use buffer::TileBuffer;
pub use config::GeneratorConfig;
pub use dungeon::{GenerationStrategy, Layout, Rect, Room};
pub use error::MapGenError;
pub use generator::{GeneratorState, MapGenerator};
pub use grid::{Direction, SymbolGrid};
pub use host::{EventCatalog, EventTemplate, HostCollaborator, RecordingHost};
pub use rng::{GenRng, RandomSource};
pub use symbol::{Symbol, SymbolTable, TileSource};
pub use tile::{Layer, TileId, LAYER_COUNT};
