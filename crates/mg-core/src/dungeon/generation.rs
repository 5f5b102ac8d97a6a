//! Layout generation
//!
//! A strategy turns the map region into blocks, rooms and corridors. The
//! result is plain geometry; stamping it onto a grid is a separate step so
//! downstream passes never care which strategy produced it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::adjacency::AdjacencyIndex;
use super::corridor::{connect_rooms, Corridor};
use super::rect::{BlockPartitioner, Rect};
use super::room::{place_room, Room};
use crate::config::GeneratorConfig;
use crate::grid::SymbolGrid;
use crate::rng::RandomSource;
use crate::symbol::Symbol;

/// How the map region is divided
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStrategy {
    /// One room filling the whole map
    FillRoom,
    /// Recursive partition into 2 to 5 rooms joined by corridors
    #[default]
    RoomAndPass,
}

impl GenerationStrategy {
    /// Split `region` into blocks
    pub fn partition<R: RandomSource + ?Sized>(
        self,
        region: Rect,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Vec<Rect> {
        match self {
            GenerationStrategy::FillRoom => vec![region],
            GenerationStrategy::RoomAndPass => BlockPartitioner::new(config, rng).partition(region),
        }
    }

    /// Build the full layout for a `width`×`height` map
    pub fn generate_layout<R: RandomSource + ?Sized>(
        self,
        width: usize,
        height: usize,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Layout {
        let region = Rect::new(1, 1, width as i32 - 2, height as i32 - 2);
        let blocks = self.partition(region, config, rng);

        let layout = match self {
            GenerationStrategy::FillRoom => {
                let wh = config.wall_height();
                let room = Room::new(region.inset(2, 2 + wh, 2, 2 + wh));
                Layout {
                    blocks,
                    rooms: vec![room],
                    corridors: Vec::new(),
                }
            }
            GenerationStrategy::RoomAndPass => {
                let adjacency = AdjacencyIndex::build(&blocks);
                let mut rooms: Vec<Room> = blocks
                    .iter()
                    .map(|block| place_room(block, config, rng))
                    .collect();
                let corridors = connect_rooms(&blocks, &mut rooms, &adjacency, rng);
                Layout {
                    blocks,
                    rooms,
                    corridors,
                }
            }
        };

        log::debug!(
            "{} layout: {} blocks, {} rooms, {} corridors",
            self,
            layout.blocks.len(),
            layout.rooms.len(),
            layout.corridors.len()
        );
        layout
    }
}

/// Blocks, rooms and corridors of one generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub blocks: Vec<Rect>,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

impl Layout {
    /// Reset the grid and draw rooms, then corridors
    pub fn stamp(&self, grid: &mut SymbolGrid) {
        grid.fill(Symbol::Space);
        for room in &self.rooms {
            grid.fill_rect(&room.rect, Symbol::Room);
        }
        for corridor in &self.corridors {
            for segment in &corridor.segments {
                grid.fill_rect(segment, Symbol::Pass);
            }
        }
    }

    /// Index and room containing a position
    pub fn room_at(&self, x: i32, y: i32) -> Option<(usize, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .find(|(_, room)| room.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GenRng;

    #[test]
    fn test_fill_room_layout() {
        let mut rng = GenRng::new(0);
        let layout =
            GenerationStrategy::FillRoom.generate_layout(20, 15, &GeneratorConfig::default(), &mut rng);
        assert_eq!(layout.blocks, vec![Rect::new(1, 1, 18, 13)]);
        assert_eq!(layout.rooms.len(), 1);
        assert_eq!(layout.rooms[0].rect, Rect::new(3, 4, 14, 7));
        assert!(layout.corridors.is_empty());
    }

    #[test]
    fn test_fill_room_on_tiny_map_is_empty() {
        let mut rng = GenRng::new(0);
        let layout =
            GenerationStrategy::FillRoom.generate_layout(5, 5, &GeneratorConfig::default(), &mut rng);
        assert!(layout.rooms[0].rect.is_empty());

        let mut grid = SymbolGrid::new(5, 5);
        layout.stamp(&mut grid);
        assert_eq!(grid.count(Symbol::Space), 25);
    }

    #[test]
    fn test_stamp_draws_corridors_over_rooms() {
        let mut rng = GenRng::new(11);
        let config = GeneratorConfig::default();
        let layout = GenerationStrategy::RoomAndPass.generate_layout(60, 40, &config, &mut rng);
        let mut grid = SymbolGrid::new(60, 40);
        layout.stamp(&mut grid);

        for corridor in &layout.corridors {
            for segment in &corridor.segments {
                for y in segment.y..segment.bottom() {
                    for x in segment.x..segment.right() {
                        assert_eq!(grid.get(x, y), Some(Symbol::Pass));
                    }
                }
            }
        }
        assert!(grid.count(Symbol::Room) > 0);
    }

    #[test]
    fn test_room_at() {
        let mut rng = GenRng::new(0);
        let layout =
            GenerationStrategy::FillRoom.generate_layout(20, 15, &GeneratorConfig::default(), &mut rng);
        assert_eq!(layout.room_at(3, 4).map(|(i, _)| i), Some(0));
        assert!(layout.room_at(2, 4).is_none());
        assert!(layout.room_at(17, 10).is_none());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(GenerationStrategy::FillRoom.to_string(), "FillRoom");
        let json = serde_json::to_string(&GenerationStrategy::RoomAndPass).unwrap();
        assert_eq!(json, "\"room-and-pass\"");
    }
}
