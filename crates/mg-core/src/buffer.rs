//! Published multi-layer tile buffer
//!
//! Flat array of `width × height × LAYER_COUNT` tile ids laid out layer by
//! layer, then row by row: `index = (layer * height + y) * width + x`.
//! Renderers read this layout directly.

use serde::{Deserialize, Serialize};

use crate::tile::{Layer, TileId, LAYER_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBuffer {
    width: usize,
    height: usize,
    data: Vec<TileId>,
}

impl TileBuffer {
    /// Buffer with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![TileId::EMPTY; width * height * LAYER_COUNT],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index of a cell, `None` outside the map
    pub fn index(&self, x: i32, y: i32, layer: Layer) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((layer.index() * self.height + y as usize) * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32, layer: Layer) -> Option<TileId> {
        self.index(x, y, layer).map(|i| self.data[i])
    }

    pub fn set(&mut self, x: i32, y: i32, layer: Layer, tile: TileId) {
        if let Some(i) = self.index(x, y, layer) {
            self.data[i] = tile;
        }
    }

    /// The whole buffer in renderer order
    pub fn data(&self) -> &[TileId] {
        &self.data
    }

    /// Raw ids, for renderers that want plain integers
    pub fn to_raw(&self) -> Vec<u32> {
        self.data.iter().map(|tile| tile.0).collect()
    }
}
