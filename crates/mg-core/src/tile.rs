//! Tile identifier contract shared with the renderer
//!
//! Identifiers follow the RPG Maker MV tile-sheet numbering. Plain tiles sit
//! below `TILE_ID_A1`; from there on every identifier belongs to an autotile
//! kind made of 48 consecutive shapes. The sheet an autotile lives on decides
//! its family:
//!
//! - A1/A2 and the upper half of A4 (wall tops) are floor-type autotiles
//! - the upper half of A3 is roof
//! - the lower halves of A3 and A4 are wall sides

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

pub const TILE_ID_B: u32 = 0;
pub const TILE_ID_C: u32 = 256;
pub const TILE_ID_D: u32 = 512;
pub const TILE_ID_E: u32 = 768;
pub const TILE_ID_A5: u32 = 1536;
pub const TILE_ID_A1: u32 = 2048;
pub const TILE_ID_A2: u32 = 2816;
pub const TILE_ID_A3: u32 = 4352;
pub const TILE_ID_A4: u32 = 5888;
pub const TILE_ID_MAX: u32 = 8192;

/// Shapes per autotile kind
pub const AUTOTILE_SHAPES: u32 = 48;

/// Number of render layers per cell
pub const LAYER_COUNT: usize = Layer::COUNT;

/// A concrete tile identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TileId(pub u32);

impl TileId {
    /// Identifier with nothing drawn
    pub const EMPTY: TileId = TileId(0);

    /// First identifier of an autotile kind
    pub const fn autotile(kind: u32) -> TileId {
        TileId(TILE_ID_A1 + kind * AUTOTILE_SHAPES)
    }

    pub const fn is_autotile(self) -> bool {
        self.0 >= TILE_ID_A1
    }

    pub const fn is_a1(self) -> bool {
        self.0 >= TILE_ID_A1 && self.0 < TILE_ID_A2
    }

    pub const fn is_a2(self) -> bool {
        self.0 >= TILE_ID_A2 && self.0 < TILE_ID_A3
    }

    pub const fn is_a3(self) -> bool {
        self.0 >= TILE_ID_A3 && self.0 < TILE_ID_A4
    }

    pub const fn is_a4(self) -> bool {
        self.0 >= TILE_ID_A4 && self.0 < TILE_ID_MAX
    }

    /// Autotile kind index, 0 for plain tiles
    pub const fn kind(self) -> u32 {
        if self.is_autotile() {
            (self.0 - TILE_ID_A1) / AUTOTILE_SHAPES
        } else {
            0
        }
    }

    /// Shape index within the kind, 0 for plain tiles
    pub const fn shape(self) -> u32 {
        if self.is_autotile() {
            (self.0 - TILE_ID_A1) % AUTOTILE_SHAPES
        } else {
            0
        }
    }

    /// First identifier of this tile's kind; plain tiles are returned as-is
    pub const fn autotile_base(self) -> TileId {
        if self.is_autotile() {
            TileId::autotile(self.kind())
        } else {
            self
        }
    }

    /// Identifier `shape` steps after this one
    pub const fn with_shape(self, shape: u32) -> TileId {
        TileId(self.0 + shape)
    }

    pub const fn is_roof(self) -> bool {
        self.is_a3() && self.kind() % 16 < 8
    }

    pub const fn is_wall_top(self) -> bool {
        self.is_a4() && self.kind() % 16 < 8
    }

    pub const fn is_wall_side(self) -> bool {
        (self.is_a3() || self.is_a4()) && self.kind() % 16 >= 8
    }

    pub const fn is_wall(self) -> bool {
        self.is_wall_top() || self.is_wall_side()
    }

    /// Two autotiles of one kind, or two identical plain tiles
    pub const fn is_same_kind(self, other: TileId) -> bool {
        if self.is_autotile() && other.is_autotile() {
            self.kind() == other.kind()
        } else {
            self.0 == other.0
        }
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        TileId(id)
    }
}

/// Render layers, in output-buffer order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[repr(usize)]
pub enum Layer {
    /// A-sheet tiles, lower
    TileALower = 0,
    /// A-sheet tiles, upper
    TileAUpper = 1,
    /// B..E-sheet tiles, lower
    TileBLower = 2,
    /// B..E-sheet tiles, upper
    TileBUpper = 3,
    /// Cast shadow bits
    Shadow = 4,
    /// Region ids
    Region = 5,
}

impl Layer {
    pub const ALL: [Layer; LAYER_COUNT] = [
        Layer::TileALower,
        Layer::TileAUpper,
        Layer::TileBLower,
        Layer::TileBUpper,
        Layer::Shadow,
        Layer::Region,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Layer> {
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autotile_base_normalizes_shape() {
        let id = TileId(TILE_ID_A2 + 3 * AUTOTILE_SHAPES + 17);
        assert_eq!(id.shape(), 17);
        assert_eq!(id.autotile_base(), TileId(TILE_ID_A2 + 3 * AUTOTILE_SHAPES));
        assert_eq!(TileId(42).autotile_base(), TileId(42));
    }

    #[test]
    fn test_sheet_families() {
        let roof = TileId::autotile((TILE_ID_A3 - TILE_ID_A1) / AUTOTILE_SHAPES);
        assert!(roof.is_roof());
        assert!(!roof.is_wall());

        let a3_wall = roof.with_shape(8 * AUTOTILE_SHAPES);
        assert!(a3_wall.is_wall_side());
        assert!(a3_wall.is_wall());

        let wall_top = TileId(TILE_ID_A4);
        assert!(wall_top.is_wall_top());
        assert!(!wall_top.is_wall_side());

        let floor = TileId(TILE_ID_A2);
        assert!(floor.is_autotile());
        assert!(!floor.is_wall() && !floor.is_roof());
    }

    #[test]
    fn test_same_kind() {
        let a = TileId(TILE_ID_A2 + 5);
        let b = TileId(TILE_ID_A2 + 40);
        let c = TileId(TILE_ID_A2 + AUTOTILE_SHAPES);
        assert!(a.is_same_kind(b));
        assert!(!a.is_same_kind(c));
        assert!(TileId(7).is_same_kind(TileId(7)));
        assert!(!TileId(7).is_same_kind(TileId(8)));
        assert!(!TileId(7).is_same_kind(a));
    }

    #[test]
    fn test_layer_indices() {
        assert_eq!(LAYER_COUNT, 6);
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
            assert_eq!(Layer::from_index(i), Some(*layer));
        }
        assert_eq!(Layer::from_index(6), None);
        assert_eq!(Layer::Shadow.index(), 4);
    }
}
