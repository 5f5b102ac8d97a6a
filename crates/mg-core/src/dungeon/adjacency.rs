//! Block adjacency
//!
//! Two blocks are neighbors on a side when exactly one reserved border
//! row or column separates them and their spans on the other axis overlap.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::rect::Rect;

/// Side of a block or room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Corridor processing order
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Neighboring block indices per side, in block order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub top: Vec<usize>,
    pub bottom: Vec<usize>,
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

impl Neighbors {
    pub fn on(&self, side: Side) -> &[usize] {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn push(&mut self, side: Side, index: usize) {
        match side {
            Side::Top => self.top.push(index),
            Side::Bottom => self.bottom.push(index),
            Side::Left => self.left.push(index),
            Side::Right => self.right.push(index),
        }
    }
}

/// Per-block neighbor lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyIndex {
    neighbors: Vec<Neighbors>,
}

impl AdjacencyIndex {
    /// Pairwise scan over all blocks
    ///
    /// A pair gets at most one side; vertical sides win over horizontal ones.
    pub fn build(blocks: &[Rect]) -> Self {
        let mut neighbors = vec![Neighbors::default(); blocks.len()];

        for (crnt_index, crnt) in blocks.iter().enumerate() {
            for (tget_index, tget) in blocks.iter().enumerate() {
                if crnt_index == tget_index {
                    continue;
                }
                if let Some(side) = adjacent_side(crnt, tget) {
                    neighbors[crnt_index].push(side, tget_index);
                }
            }
        }

        Self { neighbors }
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbors of one block
    pub fn neighbors(&self, index: usize) -> Option<&Neighbors> {
        self.neighbors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Neighbors)> {
        self.neighbors.iter().enumerate()
    }
}

/// Side of `crnt` on which `tget` lies, if they are neighbors
fn adjacent_side(crnt: &Rect, tget: &Rect) -> Option<Side> {
    // Spans are compared as closed intervals, borders included
    let match_h = tget.x <= crnt.right() && crnt.x <= tget.right();
    let match_v = tget.y <= crnt.bottom() && crnt.y <= tget.bottom();

    if match_h {
        if crnt.y == tget.bottom() + 1 {
            return Some(Side::Top);
        }
        if tget.y == crnt.bottom() + 1 {
            return Some(Side::Bottom);
        }
    }
    if match_v {
        if crnt.x == tget.right() + 1 {
            return Some(Side::Left);
        }
        if tget.x == crnt.right() + 1 {
            return Some(Side::Right);
        }
    }
    None
}
