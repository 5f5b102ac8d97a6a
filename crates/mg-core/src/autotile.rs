//! Autotile shape resolution
//!
//! A symbol's base tile on an autotile sheet only names the tile kind; the
//! concrete shape depends on the neighbors. Resolution starts from every
//! shape of the family and, for each neighbor direction, keeps only the
//! shapes that connect (neighbor of the same kind) or that do not (any other
//! neighbor). Directions are numbered like a numeric keypad, 5 being the
//! cell itself.
//!
//! Floor-like tiles look at all 8 neighbors over 48 shapes. Wall sides use
//! 16 shapes: up and down connect like floors, while left and right look at
//! the neighbors beside the top and bottom of the wall column.

use crate::buffer::TileBuffer;
use crate::grid::SymbolGrid;
use crate::symbol::{Symbol, SymbolTable};
use crate::tile::{Layer, TileId};

/// Shadow id for cells with nothing cast on them
pub const SHADOW_NONE: TileId = TileId(0);

/// Shadow id cast by a wall or roof on the west
pub const SHADOW_CAST: TileId = TileId(5);

/// Shape sets of one autotile family, indexed by keypad direction
struct ShapeTable {
    candidates: u64,
    connect: [u64; 10],
    no_connect: [u64; 10],
}

const fn mask(shapes: &[u8]) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < shapes.len() {
        bits |= 1u64 << shapes[i];
        i += 1;
    }
    bits
}

const FLOOR: ShapeTable = ShapeTable {
    candidates: (1u64 << 48) - 1,
    connect: [
        0,
        mask(&[
            0, 1, 2, 3, 4, 5, 6, 7, 16, 17, 18, 19, 20, 21, 24, 26, 28, 29, 30, 31, 32, 33, 34,
            35, 36, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
            24, 25, 26, 27, 32, 34, 35, 36, 37, 42, 47,
        ]),
        mask(&[
            0, 1, 2, 3, 8, 9, 10, 11, 16, 17, 20, 22, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34,
            36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 20, 21, 22, 23, 24, 25, 26, 27,
            28, 29, 30, 31, 33, 36, 37, 38, 39, 45, 47,
        ]),
        0,
        mask(&[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
            28, 29, 30, 31, 33, 34, 35, 40, 41, 43, 47,
        ]),
        mask(&[
            0, 2, 4, 6, 8, 10, 12, 14, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 28, 30, 32, 33, 34,
            35, 36, 37, 38, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 24, 25, 26, 27,
            28, 29, 30, 31, 32, 38, 39, 40, 41, 44, 47,
        ]),
        mask(&[
            0, 1, 4, 5, 8, 9, 12, 13, 16, 18, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 32, 33, 34,
            35, 36, 37, 38, 39, 40, 42, 43, 44, 45, 46, 47,
        ]),
    ],
    no_connect: [
        0,
        mask(&[
            8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 22, 23, 25, 27, 28, 29, 30, 31, 32, 33,
            34, 35, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[28, 29, 30, 31, 33, 38, 39, 40, 41, 43, 44, 45, 46]),
        mask(&[
            4, 5, 6, 7, 12, 13, 14, 15, 18, 19, 21, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33,
            35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[16, 17, 18, 19, 32, 34, 35, 40, 41, 42, 43, 44, 46]),
        0,
        mask(&[24, 25, 26, 27, 32, 36, 37, 38, 39, 42, 44, 45, 46]),
        mask(&[
            1, 3, 5, 7, 9, 11, 13, 15, 16, 17, 18, 19, 20, 21, 22, 23, 26, 27, 29, 31, 32, 33, 34,
            35, 36, 37, 39, 40, 41, 42, 43, 44, 45, 46, 47,
        ]),
        mask(&[20, 21, 22, 23, 33, 34, 35, 36, 37, 42, 43, 45, 46]),
        mask(&[
            2, 3, 6, 7, 10, 11, 14, 15, 17, 19, 20, 21, 22, 23, 24, 25, 26, 27, 30, 31, 32, 33, 34,
            35, 36, 37, 38, 39, 41, 42, 43, 44, 45, 46, 47,
        ]),
    ],
};

const WALL: ShapeTable = ShapeTable {
    candidates: (1u64 << 16) - 1,
    connect: [
        0,
        0,
        mask(&[0, 1, 2, 3, 4, 5, 6, 7]),
        0,
        mask(&[0, 2, 4, 6, 8, 10, 12, 14]),
        0,
        mask(&[0, 1, 2, 3, 8, 9, 10, 11]),
        0,
        mask(&[0, 1, 4, 5, 8, 9, 12, 13]),
        0,
    ],
    no_connect: [
        0,
        0,
        mask(&[8, 9, 10, 11, 12, 13, 14, 15]),
        0,
        mask(&[1, 3, 5, 7, 9, 11, 13, 15]),
        0,
        mask(&[4, 5, 6, 7, 12, 13, 14, 15]),
        0,
        mask(&[2, 3, 6, 7, 10, 11, 14, 15]),
        0,
    ],
};

/// Neighbor directions checked for floor-like tiles
const FLOOR_DIRECTIONS: [usize; 8] = [1, 2, 3, 4, 6, 7, 8, 9];

/// Grid offset of a keypad direction, y growing downward
const fn keypad_offset(direction: usize) -> (i32, i32) {
    let d = direction as i32 - 1;
    (d % 3 - 1, 1 - d / 3)
}

impl ShapeTable {
    fn filter(&self, candidates: u64, direction: usize, connected: bool) -> u64 {
        if connected {
            candidates & self.connect[direction]
        } else {
            candidates & self.no_connect[direction]
        }
    }
}

/// Turns a finished symbol grid into concrete tile ids
pub struct AutotileResolver<'a> {
    grid: &'a SymbolGrid,
    table: &'a SymbolTable,
}

impl<'a> AutotileResolver<'a> {
    pub fn new(grid: &'a SymbolGrid, table: &'a SymbolTable) -> Self {
        Self { grid, table }
    }

    /// Tile id of one cell on one layer, `None` outside the grid
    pub fn resolve(&self, x: i32, y: i32, layer: Layer) -> Option<TileId> {
        let symbol = self.grid.get(x, y)?;
        if layer == Layer::Shadow {
            return Some(self.shadow(x, y));
        }

        let base = self.table.base_tile(symbol, layer);
        if !base.is_autotile() {
            return Some(base);
        }
        let candidates = if base.is_wall_side() {
            self.wall_shapes(x, y, base, layer)
        } else {
            self.floor_shapes(x, y, base, layer)
        };
        Some(base.with_shape(pick(candidates, x, y, layer)))
    }

    /// Resolve every cell of every layer into a fresh buffer
    pub fn resolve_all(&self) -> TileBuffer {
        let width = self.grid.width();
        let height = self.grid.height();
        let mut buffer = TileBuffer::new(width, height);
        for layer in Layer::ALL {
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    if let Some(tile) = self.resolve(x, y, layer) {
                        buffer.set(x, y, layer, tile);
                    }
                }
            }
        }
        buffer
    }

    fn neighbor_base(&self, x: i32, y: i32, layer: Layer) -> Option<TileId> {
        self.grid
            .get(x, y)
            .map(|symbol| self.table.base_tile(symbol, layer))
    }

    fn floor_shapes(&self, x: i32, y: i32, base: TileId, layer: Layer) -> u64 {
        let mut candidates = FLOOR.candidates;
        for direction in FLOOR_DIRECTIONS {
            let (dx, dy) = keypad_offset(direction);
            let Some(neighbor) = self.neighbor_base(x + dx, y + dy, layer) else {
                continue;
            };
            candidates = FLOOR.filter(candidates, direction, base.is_same_kind(neighbor));
        }
        candidates
    }

    fn wall_shapes(&self, x: i32, y: i32, base: TileId, layer: Layer) -> u64 {
        let mut candidates = WALL.candidates;

        for direction in [2, 8] {
            let (dx, dy) = keypad_offset(direction);
            let Some(neighbor) = self.neighbor_base(x + dx, y + dy, layer) else {
                continue;
            };
            candidates = WALL.filter(candidates, direction, base.is_same_kind(neighbor));
        }

        let (top, bottom) = self.column_span(x, y);
        for direction in [4, 6] {
            let (dx, _) = keypad_offset(direction);
            let (Some(upper), Some(lower)) = (
                self.neighbor_base(x + dx, top, layer),
                self.neighbor_base(x + dx, bottom, layer),
            ) else {
                continue;
            };
            let solid = |tile: TileId| tile.is_wall() || tile.is_roof();
            candidates = WALL.filter(candidates, direction, solid(upper) && solid(lower));
        }
        candidates
    }

    /// First and last row of the run of identical symbols through `(x, y)`
    fn column_span(&self, x: i32, y: i32) -> (i32, i32) {
        let symbol = self.grid.get(x, y);
        let mut top = y;
        while self.grid.get(x, top - 1) == symbol {
            top -= 1;
        }
        let mut bottom = y;
        while self.grid.get(x, bottom + 1) == symbol {
            bottom += 1;
        }
        (top, bottom)
    }

    /// A wall or roof to the west casts a shadow onto open cells
    fn shadow(&self, x: i32, y: i32) -> TileId {
        let Some(west) = self.grid.get(x - 1, y) else {
            return SHADOW_NONE;
        };
        if matches!(
            self.grid.get(x, y),
            Some(Symbol::Space | Symbol::Roof | Symbol::Wall)
        ) {
            return SHADOW_NONE;
        }
        match west {
            Symbol::Wall => SHADOW_CAST,
            Symbol::Roof
                if matches!(
                    self.grid.get(x - 1, y - 1),
                    Some(Symbol::Roof | Symbol::Wall)
                ) =>
            {
                SHADOW_CAST
            }
            _ => SHADOW_NONE,
        }
    }
}

/// Lowest remaining shape
fn pick(candidates: u64, x: i32, y: i32, layer: Layer) -> u32 {
    match candidates.count_ones() {
        0 => {
            log::warn!("no autotile shape fits ({x}, {y}) on {layer}");
            0
        }
        1 => candidates.trailing_zeros(),
        n => {
            log::trace!("{n} autotile shapes fit ({x}, {y}) on {layer}");
            candidates.trailing_zeros()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Rect;
    use crate::tile::{AUTOTILE_SHAPES, TILE_ID_A2, TILE_ID_A4};

    fn floor_resolve(neighbors: u8) -> u64 {
        // bit i set = keypad direction FLOOR_DIRECTIONS[i] connects
        let mut candidates = FLOOR.candidates;
        for (i, direction) in FLOOR_DIRECTIONS.iter().enumerate() {
            candidates = FLOOR.filter(candidates, *direction, neighbors & (1 << i) != 0);
        }
        candidates
    }

    #[test]
    fn test_keypad_offsets() {
        assert_eq!(keypad_offset(1), (-1, 1));
        assert_eq!(keypad_offset(2), (0, 1));
        assert_eq!(keypad_offset(3), (1, 1));
        assert_eq!(keypad_offset(4), (-1, 0));
        assert_eq!(keypad_offset(6), (1, 0));
        assert_eq!(keypad_offset(7), (-1, -1));
        assert_eq!(keypad_offset(8), (0, -1));
        assert_eq!(keypad_offset(9), (1, -1));
    }

    #[test]
    fn test_every_floor_neighborhood_resolves() {
        for neighbors in 0..=u8::MAX {
            let candidates = floor_resolve(neighbors);
            assert_ne!(candidates, 0, "neighborhood {neighbors:08b}");
            assert!(candidates.trailing_zeros() < AUTOTILE_SHAPES);
        }
    }

    #[test]
    fn test_floor_extremes() {
        // Surrounded by the same kind: the full center shape
        assert_eq!(floor_resolve(0xff).trailing_zeros(), 0);
        // Isolated: the single-cell shape
        assert_eq!(floor_resolve(0), 1 << 46);
    }

    #[test]
    fn test_every_wall_neighborhood_is_singleton() {
        for neighbors in 0..16u8 {
            let mut candidates = WALL.candidates;
            for (i, direction) in [2, 4, 6, 8].iter().enumerate() {
                candidates = WALL.filter(candidates, *direction, neighbors & (1 << i) != 0);
            }
            assert_eq!(candidates.count_ones(), 1, "neighborhood {neighbors:04b}");
        }
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = SymbolGrid::new(3, 3);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);
        assert_eq!(resolver.resolve(-1, 0, Layer::TileALower), None);
        assert_eq!(resolver.resolve(3, 0, Layer::Shadow), None);
        assert!(resolver.resolve(2, 2, Layer::Region).is_some());
    }

    #[test]
    fn test_static_tiles_pass_through() {
        let grid = SymbolGrid::new(3, 3);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);
        assert_eq!(
            resolver.resolve(1, 1, Layer::TileALower),
            Some(table.base_tile(Symbol::Space, Layer::TileALower))
        );
    }

    #[test]
    fn test_room_interior_and_corner() {
        let mut grid = SymbolGrid::new(6, 6);
        grid.fill_rect(&Rect::new(1, 1, 4, 4), Symbol::Room);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);

        let interior = resolver.resolve(2, 2, Layer::TileALower).unwrap();
        assert_eq!(interior, TileId(TILE_ID_A2));
        let corner = resolver.resolve(1, 1, Layer::TileALower).unwrap();
        assert_eq!(corner.autotile_base(), TileId(TILE_ID_A2));
        assert_ne!(corner, interior);
    }

    #[test]
    fn test_wall_column_sides() {
        // Roof row above a one-high wall face over a room
        let mut grid = SymbolGrid::new(5, 4);
        grid.fill_rect(&Rect::new(0, 0, 5, 1), Symbol::Roof);
        grid.fill_rect(&Rect::new(0, 1, 5, 1), Symbol::Wall);
        grid.fill_rect(&Rect::new(0, 2, 5, 2), Symbol::Room);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);

        let wall_base = table.base_tile(Symbol::Wall, Layer::TileALower);
        // Middle of the face: walls both sides, nothing of its kind above or below
        let middle = resolver.resolve(2, 1, Layer::TileALower).unwrap();
        assert_eq!(middle, wall_base.with_shape(10));
        // Left end: the map edge is skipped
        let left = resolver.resolve(0, 1, Layer::TileALower).unwrap();
        assert_eq!(left, wall_base.with_shape(10));
        assert!(left.is_wall_side());
        assert!(TileId(TILE_ID_A4).is_wall_top());
    }

    #[test]
    fn test_shadow_rules() {
        let mut grid = SymbolGrid::new(4, 4);
        grid.set(0, 1, Symbol::Wall);
        grid.set(1, 1, Symbol::Room);
        grid.set(0, 2, Symbol::Roof);
        grid.set(0, 3, Symbol::Roof);
        grid.set(1, 2, Symbol::Room);
        grid.set(1, 3, Symbol::Pass);
        grid.set(2, 1, Symbol::Wall);
        grid.set(2, 2, Symbol::Room);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);

        // West is a wall
        assert_eq!(resolver.resolve(1, 1, Layer::Shadow), Some(SHADOW_CAST));
        // West is roof with a wall above it
        assert_eq!(resolver.resolve(1, 2, Layer::Shadow), Some(SHADOW_CAST));
        // West is roof with roof above it
        assert_eq!(resolver.resolve(1, 3, Layer::Shadow), Some(SHADOW_CAST));
        // Walls never take a shadow
        assert_eq!(resolver.resolve(2, 1, Layer::Shadow), Some(SHADOW_NONE));
        // Left edge
        assert_eq!(resolver.resolve(0, 1, Layer::Shadow), Some(SHADOW_NONE));
        // West is room
        assert_eq!(resolver.resolve(2, 2, Layer::Shadow), Some(SHADOW_NONE));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let mut grid = SymbolGrid::new(8, 8);
        grid.fill_rect(&Rect::new(2, 2, 4, 3), Symbol::Room);
        grid.fill_rect(&Rect::new(2, 1, 4, 1), Symbol::Wall);
        grid.fill_rect(&Rect::new(1, 0, 6, 1), Symbol::Roof);
        let table = SymbolTable::default();
        let resolver = AutotileResolver::new(&grid, &table);
        assert_eq!(resolver.resolve_all(), resolver.resolve_all());
    }
}
