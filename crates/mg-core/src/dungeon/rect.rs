//! Rectangles and recursive block partitioning
//!
//! A region is split into blocks, each later hosting one room. Sibling
//! blocks are separated by a single reserved border column or row, so the
//! blocks plus their borders tile the region exactly.

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::rng::RandomSource;

/// Block count below which splitting always continues
pub const MIN_ROOMS: usize = 2;

/// Block count at which splitting stops
pub const MAX_ROOMS: usize = 5;

/// An axis-aligned rectangle; `x + w` and `y + h` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// First column past the right edge
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// First row past the bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn area(&self) -> i32 {
        if self.w > 0 && self.h > 0 {
            self.w * self.h
        } else {
            0
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// Check if this rectangle shares at least one cell with another
    pub const fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink on every side, clamping the extent at zero
    pub fn inset(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect {
            x: self.x + left,
            y: self.y + top,
            w: (self.w - left - right).max(0),
            h: (self.h - top - bottom).max(0),
        }
    }

    /// Smallest gap between this rectangle and the edges of `outer`
    ///
    /// Returns `(left, top, right, bottom)`.
    pub const fn margins_within(&self, outer: &Rect) -> (i32, i32, i32, i32) {
        (
            self.x - outer.x,
            self.y - outer.y,
            outer.right() - self.right(),
            outer.bottom() - self.bottom(),
        )
    }
}

/// Recursively splits a region into at most `MAX_ROOMS` blocks
pub struct BlockPartitioner<'a, R: RandomSource + ?Sized> {
    blocks: Vec<Rect>,
    min_block_size: i32,
    /// Extent a block must exceed to hold two minimum blocks and a separator
    split_extent: i32,
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> BlockPartitioner<'a, R> {
    pub fn new(config: &GeneratorConfig, rng: &'a mut R) -> Self {
        let min_block_size = config.min_block_size();
        Self {
            blocks: Vec::with_capacity(MAX_ROOMS),
            min_block_size,
            split_extent: min_block_size.saturating_mul(2).saturating_add(1),
            rng,
        }
    }

    /// Partition `region`; a region too small to split comes back as one block
    pub fn partition(mut self, region: Rect) -> Vec<Rect> {
        self.blocks.clear();
        self.blocks.push(region);
        self.split(0);
        self.blocks
    }

    fn split(&mut self, index: usize) {
        if self.rng.rand_bool(0.5) {
            if self.splittable_horizontally(index) {
                self.split_horizontally(index);
            }
            if self.splittable_vertically(index) {
                self.split_vertically(index);
            }
        } else {
            if self.splittable_vertically(index) {
                self.split_vertically(index);
            }
            if self.splittable_horizontally(index) {
                self.split_horizontally(index);
            }
        }
    }

    // Extent first: the count gate draws only when the block is wide enough.
    fn splittable_horizontally(&mut self, index: usize) -> bool {
        self.blocks[index].w > self.split_extent && self.count_allows_split()
    }

    fn splittable_vertically(&mut self, index: usize) -> bool {
        self.blocks[index].h > self.split_extent && self.count_allows_split()
    }

    /// Stop at `MAX_ROOMS`, and increasingly often once past `MIN_ROOMS`
    fn count_allows_split(&mut self) -> bool {
        let count = self.blocks.len();
        if count >= MAX_ROOMS {
            return false;
        }
        if count >= MIN_ROOMS {
            let stop = (count - MIN_ROOMS + 1) as f64 / (MAX_ROOMS - MIN_ROOMS + 1) as f64;
            if self.rng.rand_bool(stop) {
                return false;
            }
        }
        true
    }

    /// Extent of the first half, uniform over the range where both halves
    /// keep `min_block_size` and the cut lies in the middle half
    fn draw_cut(&mut self, extent: i32) -> i32 {
        let lo = (extent / 4).max(self.min_block_size);
        let hi = ((3 * extent - 1) / 4).min(extent - 1 - self.min_block_size);
        lo + self.rng.random_int(hi - lo + 1)
    }

    fn split_horizontally(&mut self, index: usize) {
        let block = self.blocks[index];
        let org_w = self.draw_cut(block.w);
        let new_block = Rect::new(block.x + org_w + 1, block.y, block.w - org_w - 1, block.h);
        self.blocks[index].w = org_w;
        self.blocks.push(new_block);
        log::debug!("split block {} at x={}: {:?}", index, new_block.x - 1, new_block);

        let new_index = self.blocks.len() - 1;
        self.split(index);
        self.split(new_index);
    }

    fn split_vertically(&mut self, index: usize) {
        let block = self.blocks[index];
        let org_h = self.draw_cut(block.h);
        let new_block = Rect::new(block.x, block.y + org_h + 1, block.w, block.h - org_h - 1);
        self.blocks[index].h = org_h;
        self.blocks.push(new_block);
        log::debug!("split block {} at y={}: {:?}", index, new_block.y - 1, new_block);

        let new_index = self.blocks.len() - 1;
        self.split(index);
        self.split(new_index);
    }
}
