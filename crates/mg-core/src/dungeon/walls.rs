//! Wall and roof synthesis
//!
//! Grows a wall face of `wall_height` rows capped by a roof around every
//! ground region. Gaps between ground cells too short to hold a full wall
//! are filled with rubble instead. The pass only adds to the grid; cells
//! that are already wall, roof or rubble are rewritten, never cleared.

use crate::config::GeneratorConfig;
use crate::grid::SymbolGrid;
use crate::symbol::Symbol;

/// Derives wall, roof and rubble cells from the ground layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallRoofSynthesizer {
    wall_height: i32,
    show_outer_wall: bool,
}

impl WallRoofSynthesizer {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            wall_height: config.wall_height(),
            show_outer_wall: config.show_outer_wall,
        }
    }

    /// Run the neighbor sweep then the roof merge
    pub fn synthesize(&self, grid: &mut SymbolGrid) {
        let width = grid.width() as i32;
        let height = grid.height() as i32;

        for x in 0..width {
            for y in 0..height {
                if !grid.is_ground(x, y) {
                    continue;
                }
                self.upper_side(grid, x - 1, y - 1);
                self.upper(grid, x, y - 1);
                self.upper_side(grid, x + 1, y - 1);
                self.side(grid, x - 1, y);
                self.side(grid, x + 1, y);
                self.lower(grid, x - 1, y + 1);
                self.lower(grid, x, y + 1);
                self.lower(grid, x + 1, y + 1);
            }
        }

        // Bottom-up so a roof climbs through a whole wall column
        for x in (0..width).rev() {
            for y in (0..height).rev() {
                if grid.is(x, y, Symbol::Roof) && grid.is_wall(x, y - 1) {
                    grid.set(x, y - 1, Symbol::Roof);
                }
            }
        }
    }

    /// Cell that can still take a wall: inside the grid and not ground
    fn is_open(grid: &SymbolGrid, x: i32, y: i32) -> bool {
        grid.in_bounds(x, y) && !grid.is_ground(x, y)
    }

    /// Non-ground run above a ground cell, starting at `(x, y)`
    fn upper(&self, grid: &mut SymbolGrid, x: i32, y: i32) {
        if !Self::is_open(grid, x, y) {
            return;
        }
        let mut run = 0;
        while run < y && !grid.is_ground(x, y - run) {
            run += 1;
        }

        if run > self.wall_height {
            for dy in 0..self.wall_height {
                grid.set(x, y - dy, Symbol::Wall);
            }
            grid.set(x, y - self.wall_height, Symbol::Roof);
        } else {
            for dy in 0..run {
                if !grid.is_ground(x, y - dy) {
                    grid.set(x, y - dy, Symbol::Rubble);
                }
            }
        }
    }

    /// Non-ground run below a ground cell, starting at `(x, y)`
    fn lower(&self, grid: &mut SymbolGrid, x: i32, y: i32) {
        if !Self::is_open(grid, x, y) {
            return;
        }
        let height = grid.height() as i32;
        let mut run = 0;
        while y + run < height && !grid.is_ground(x, y + run) {
            run += 1;
        }

        if run > self.wall_height {
            grid.set(x, y, Symbol::Roof);
            if self.show_outer_wall {
                for dy in 1..=self.wall_height {
                    if !grid.is(x, y + dy, Symbol::Roof) {
                        grid.set(x, y + dy, Symbol::Wall);
                    }
                }
            }
        } else if !grid.is_wall(x, y) {
            for dy in 0..run {
                if !grid.is_ground(x, y + dy) {
                    grid.set(x, y + dy, Symbol::Rubble);
                }
            }
        }
    }

    /// Left or right of a ground cell: a wall face if ground continues below
    fn side(&self, grid: &mut SymbolGrid, x: i32, y: i32) {
        if !Self::is_open(grid, x, y) {
            return;
        }
        if grid.is_ground(x, y + 1) {
            self.upper(grid, x, y);
        } else {
            self.lower(grid, x, y);
        }
    }

    /// Diagonally above a ground cell: roof sits `wall_height` rows higher
    fn upper_side(&self, grid: &mut SymbolGrid, x: i32, y: i32) {
        if !Self::is_open(grid, x, y) {
            return;
        }
        self.lower(grid, x, y - self.wall_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Rect;

    fn synthesize(grid: &mut SymbolGrid, wall_height: u32, show_outer_wall: bool) {
        let config = GeneratorConfig {
            wall_height,
            show_outer_wall,
            ..Default::default()
        };
        WallRoofSynthesizer::new(&config).synthesize(grid);
    }

    fn rows(grid: &SymbolGrid) -> Vec<String> {
        grid.render(&[]).lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_single_room_gets_wall_and_roof() {
        let mut grid = SymbolGrid::new(9, 9);
        grid.fill_rect(&Rect::new(3, 3, 3, 3), Symbol::Room);
        synthesize(&mut grid, 1, true);

        assert_eq!(
            rows(&grid),
            vec![
                "         ",
                "  #####  ",
                "  #===#  ",
                "  #...#  ",
                "  #...#  ",
                "  #...#  ",
                "  #####  ",
                "  =====  ",
                "         ",
            ]
        );
    }

    #[test]
    fn test_face_above_room_uses_wall_height() {
        let mut grid = SymbolGrid::new(7, 10);
        grid.fill_rect(&Rect::new(2, 5, 3, 2), Symbol::Room);
        synthesize(&mut grid, 2, false);

        for x in 2..5 {
            assert_eq!(grid.get(x, 4), Some(Symbol::Wall));
            assert_eq!(grid.get(x, 3), Some(Symbol::Wall));
            assert_eq!(grid.get(x, 2), Some(Symbol::Roof));
        }
        assert_eq!(grid.get(2, 7), Some(Symbol::Roof));
        assert_eq!(grid.get(2, 8), Some(Symbol::Space));
    }

    #[test]
    fn test_short_gap_becomes_rubble() {
        // Two rooms stacked with a single row between them
        let mut grid = SymbolGrid::new(7, 12);
        grid.fill_rect(&Rect::new(2, 3, 3, 3), Symbol::Room);
        grid.fill_rect(&Rect::new(2, 7, 3, 3), Symbol::Room);
        synthesize(&mut grid, 1, true);

        for x in 2..5 {
            assert_eq!(grid.get(x, 6), Some(Symbol::Rubble));
        }
    }

    #[test]
    fn test_outer_wall_toggle() {
        let mut with = SymbolGrid::new(7, 9);
        with.fill_rect(&Rect::new(2, 3, 3, 2), Symbol::Room);
        let mut without = with.clone();
        synthesize(&mut with, 1, true);
        synthesize(&mut without, 1, false);

        assert_eq!(with.get(3, 6), Some(Symbol::Wall));
        assert_eq!(without.get(3, 6), Some(Symbol::Space));
        assert_eq!(with.get(3, 5), Some(Symbol::Roof));
        assert_eq!(without.get(3, 5), Some(Symbol::Roof));
    }

    #[test]
    fn test_roof_merges_up_through_walls() {
        let mut grid = SymbolGrid::new(3, 5);
        grid.set(1, 1, Symbol::Wall);
        grid.set(1, 2, Symbol::Wall);
        grid.set(1, 3, Symbol::Roof);
        synthesize(&mut grid, 1, true);
        assert_eq!(grid.get(1, 1), Some(Symbol::Roof));
        assert_eq!(grid.get(1, 2), Some(Symbol::Roof));
    }

    #[test]
    fn test_synthesis_is_stable() {
        let mut grid = SymbolGrid::new(12, 12);
        grid.fill_rect(&Rect::new(3, 4, 5, 4), Symbol::Room);
        grid.fill_rect(&Rect::new(5, 8, 1, 3), Symbol::Pass);
        synthesize(&mut grid, 1, true);
        let once = grid.clone();
        synthesize(&mut grid, 1, true);
        assert_eq!(grid, once);
    }
}
