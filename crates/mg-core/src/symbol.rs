//! Semantic cell symbols and their tile mapping
//!
//! The generator works on a small closed set of symbols. Each symbol knows
//! its debug glyph, which symbols it may be walked into, and where its
//! reference tiles sit on an authoring template. A `SymbolTable` maps every
//! symbol to one base tile identifier per render layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::tile::{Layer, TileId, LAYER_COUNT, TILE_ID_A2, TILE_ID_A4, TILE_ID_A5};

/// Cell symbol
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum Symbol {
    /// Solid rock, nothing carved
    #[default]
    Space = 0,
    /// Room floor
    Room = 1,
    /// Corridor floor
    Pass = 2,
    /// Roof cap above a wall face
    Roof = 3,
    /// Wall face
    Wall = 4,
    /// Debris left where a wall would be too thin
    Rubble = 5,
    /// Start marker
    Start = 6,
    /// Goal marker
    Goal = 7,
    /// Player marker, only used for debug rendering
    PlayerMarker = 8,
}

impl Symbol {
    /// Glyph used by the debug rendering
    pub const fn glyph(self) -> char {
        match self {
            Symbol::PlayerMarker => '@',
            Symbol::Space => ' ',
            Symbol::Room => '.',
            Symbol::Pass => ',',
            Symbol::Roof => '#',
            Symbol::Wall => '=',
            Symbol::Rubble => '*',
            Symbol::Start => '<',
            Symbol::Goal => '>',
        }
    }

    /// Symbols this one may be walked into
    pub const fn passable_into(self) -> &'static [Symbol] {
        match self {
            Symbol::Room | Symbol::Pass | Symbol::Start | Symbol::Goal | Symbol::PlayerMarker => {
                &[Symbol::Room, Symbol::Pass]
            }
            Symbol::Roof => &[Symbol::Roof],
            Symbol::Space | Symbol::Wall | Symbol::Rubble => &[],
        }
    }

    /// Movement between two symbols is allowed only when each lists the other
    pub fn can_pass_to(self, other: Symbol) -> bool {
        self.passable_into().contains(&other) && other.passable_into().contains(&self)
    }

    /// Template coordinate holding this symbol's reference tiles
    pub const fn reference_coord(self) -> (usize, usize) {
        match self {
            Symbol::Space | Symbol::PlayerMarker => (0, 0),
            Symbol::Room => (0, 1),
            Symbol::Pass => (0, 2),
            Symbol::Roof => (0, 3),
            Symbol::Wall => (0, 4),
            Symbol::Rubble => (0, 5),
            Symbol::Start => (1, 0),
            Symbol::Goal => (1, 1),
        }
    }

    /// Walkable floor, including the start and goal markers
    pub const fn is_ground(self) -> bool {
        matches!(
            self,
            Symbol::Room | Symbol::Pass | Symbol::Start | Symbol::Goal
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Read access to a template map's tile layers
pub trait TileSource {
    /// Tile at a template coordinate, `None` outside the template
    fn tile_at(&self, x: usize, y: usize, layer: Layer) -> Option<TileId>;
}

/// Per-symbol base tile identifiers, one per render layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    tiles: [[TileId; LAYER_COUNT]; Symbol::COUNT],
}

impl SymbolTable {
    /// Table with every symbol mapped to empty tiles
    pub fn empty() -> Self {
        Self {
            tiles: [[TileId::EMPTY; LAYER_COUNT]; Symbol::COUNT],
        }
    }

    /// Read every symbol's reference coordinate from a template
    ///
    /// Autotile identifiers are normalized to the first shape of their kind;
    /// coordinates outside the template read as empty.
    pub fn from_template<S: TileSource + ?Sized>(source: &S) -> Self {
        let mut table = Self::empty();
        for symbol in Symbol::iter() {
            let (x, y) = symbol.reference_coord();
            for layer in Layer::ALL {
                let tile = source.tile_at(x, y, layer).unwrap_or_default();
                table.tiles[symbol.index()][layer.index()] = tile.autotile_base();
            }
        }
        table
    }

    /// Base tile of a symbol on one layer
    pub fn base_tile(&self, symbol: Symbol, layer: Layer) -> TileId {
        self.tiles[symbol.index()][layer.index()]
    }

    /// All layers of a symbol
    pub fn tiles(&self, symbol: Symbol) -> &[TileId; LAYER_COUNT] {
        &self.tiles[symbol.index()]
    }

    /// Replace a symbol's tiles, normalizing autotiles
    pub fn set_tiles(&mut self, symbol: Symbol, tiles: [TileId; LAYER_COUNT]) {
        self.tiles[symbol.index()] = tiles.map(TileId::autotile_base);
    }
}

impl Default for SymbolTable {
    /// Stock dungeon tiles: A2 floors, A4 wall tops as roof, A4 wall sides
    fn default() -> Self {
        let room = TileId(TILE_ID_A2);
        let pass = TileId(TILE_ID_A2 + 48);
        let roof = TileId(TILE_ID_A4);
        let wall = TileId(TILE_ID_A4 + 8 * 48);
        let space = TileId(TILE_ID_A5);

        let single = |tile: TileId| {
            let mut layers = [TileId::EMPTY; LAYER_COUNT];
            layers[Layer::TileALower.index()] = tile;
            layers
        };

        let mut table = Self::empty();
        table.set_tiles(Symbol::Space, single(space));
        table.set_tiles(Symbol::PlayerMarker, single(space));
        table.set_tiles(Symbol::Room, single(room));
        table.set_tiles(Symbol::Start, single(room));
        table.set_tiles(Symbol::Goal, single(room));
        table.set_tiles(Symbol::Pass, single(pass));
        table.set_tiles(Symbol::Roof, single(roof));
        table.set_tiles(Symbol::Wall, single(wall));

        let mut rubble = single(room);
        rubble[Layer::TileBLower.index()] = TileId(20);
        table.set_tiles(Symbol::Rubble, rubble);
        table
    }
}
