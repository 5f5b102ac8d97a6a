//! Symbol grid
//!
//! Row-major width×height array of symbols, the single source of truth while
//! a map is generated. All coordinates are signed so callers can probe
//! neighbors without checking the edge first; out-of-range reads are `None`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::Rect;
use crate::symbol::Symbol;

/// Movement direction, numbered like a numeric keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Direction {
    Down = 2,
    Left = 4,
    Right = 6,
    Up = 8,
}

impl Direction {
    pub fn from_numpad(value: u8) -> Option<Direction> {
        match value {
            2 => Some(Direction::Down),
            4 => Some(Direction::Left),
            6 => Some(Direction::Right),
            8 => Some(Direction::Up),
            _ => None,
        }
    }

    pub const fn numpad(self) -> u8 {
        self as u8
    }

    /// Grid step, y grows downward
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
        }
    }
}

/// Mutable symbol map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolGrid {
    width: usize,
    height: usize,
    cells: Vec<Symbol>,
}

impl SymbolGrid {
    /// Grid filled with `Space`
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Symbol::Space; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Symbol> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell, ignoring out-of-range writes
    ///
    /// Returns true if the cell was written.
    pub fn set(&mut self, x: i32, y: i32, symbol: Symbol) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = symbol;
                true
            }
            None => false,
        }
    }

    /// Cell holds `symbol`; false outside the grid
    pub fn is(&self, x: i32, y: i32, symbol: Symbol) -> bool {
        self.get(x, y) == Some(symbol)
    }

    pub fn is_ground(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Symbol::is_ground)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.is(x, y, Symbol::Wall)
    }

    /// Reset every cell to one symbol
    pub fn fill(&mut self, symbol: Symbol) {
        self.cells.fill(symbol);
    }

    /// Stamp a rectangle, clipped to the grid
    pub fn fill_rect(&mut self, rect: &Rect, symbol: Symbol) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, symbol);
            }
        }
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// One glyph per cell, rows separated by newlines
    ///
    /// `overlays` replace the glyph at their position; later entries win.
    pub fn render(&self, overlays: &[(i32, i32, Symbol)]) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let symbol = overlays
                    .iter()
                    .rev()
                    .find(|&&(ox, oy, _)| (ox, oy) == (x, y))
                    .map(|&(_, _, symbol)| symbol)
                    .or_else(|| self.get(x, y))
                    .unwrap_or_default();
                out.push(symbol.glyph());
            }
            out.push('\n');
        }
        out
    }
}
