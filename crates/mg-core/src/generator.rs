//! Map generator
//!
//! Sequences layout, wall synthesis and autotile resolution, publishes the
//! tile buffer, and applies the runtime edits (dig, blast, erect wall, one
//! big room). Every edit re-runs the full synthesis before resolving tiles,
//! so wall columns are never read half-updated.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::autotile::AutotileResolver;
use crate::buffer::TileBuffer;
use crate::config::GeneratorConfig;
use crate::dungeon::{GenerationStrategy, Layout, Rect, Room, WallRoofSynthesizer};
use crate::error::MapGenError;
use crate::grid::{Direction, SymbolGrid};
use crate::host::{find_placement, EventCatalog, HostCollaborator};
use crate::rng::{GenRng, RandomSource};
use crate::symbol::{Symbol, SymbolTable};
use crate::tile::{Layer, TileId};

/// Lifecycle of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum GeneratorState {
    #[default]
    Uninitialized,
    Generating,
    Ready,
}

/// Owns the symbol grid of one map and everything derived from it
#[derive(Debug, Clone)]
pub struct MapGenerator<R: RandomSource = GenRng> {
    width: usize,
    height: usize,
    config: GeneratorConfig,
    table: SymbolTable,
    strategy: GenerationStrategy,
    rng: R,
    state: GeneratorState,
    grid: SymbolGrid,
    layout: Layout,
    buffer: TileBuffer,
    start: Option<(i32, i32)>,
    goal: Option<(i32, i32)>,
}

impl<R: RandomSource> MapGenerator<R> {
    /// Create an idle generator for a `width`×`height` map
    ///
    /// A maximum room size below the minimum is raised to it; other
    /// out-of-range settings and empty dimensions are rejected.
    pub fn new(
        width: usize,
        height: usize,
        config: GeneratorConfig,
        table: SymbolTable,
        strategy: GenerationStrategy,
        rng: R,
    ) -> Result<Self, MapGenError> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(MapGenError::InvalidDimensions { width, height });
        }
        let config = config.normalized();
        config.validate()?;

        Ok(Self {
            width,
            height,
            config,
            table,
            strategy,
            rng,
            state: GeneratorState::Uninitialized,
            grid: SymbolGrid::new(width, height),
            layout: Layout::default(),
            buffer: TileBuffer::new(width, height),
            start: None,
            goal: None,
        })
    }

    /// Build a fresh layout and publish its tiles
    pub fn generate(&mut self) {
        self.state = GeneratorState::Generating;
        self.layout = self
            .strategy
            .generate_layout(self.width, self.height, &self.config, &mut self.rng);
        self.layout.stamp(&mut self.grid);
        self.start = None;
        self.goal = None;
        self.refresh();
        self.state = GeneratorState::Ready;

        log::info!(
            "generated {}x{} {} map: {} rooms, {} corridors",
            self.width,
            self.height,
            self.strategy,
            self.layout.rooms.len(),
            self.layout.corridors.len()
        );
    }

    /// Clear host state, generate, then place the catalog's events
    pub fn setup<H: HostCollaborator + ?Sized>(
        &mut self,
        host: &mut H,
        catalog: &EventCatalog,
    ) -> Result<(), MapGenError> {
        host.reset_map_state();
        self.generate();
        self.populate(host, catalog)
    }

    /// Place start, goal and rated events on room cells
    ///
    /// The player is moved to the start event. Per-map rates roll once per
    /// event; per-room rates roll once per event and room, placing inside
    /// that room.
    pub fn populate<H: HostCollaborator + ?Sized>(
        &mut self,
        host: &mut H,
        catalog: &EventCatalog,
    ) -> Result<(), MapGenError> {
        self.ensure_ready()?;

        match catalog.start {
            Some(id) => {
                self.start = self.place_event(host, id, &[Symbol::Room], None)?;
                if let Some((x, y)) = self.start {
                    host.locate_player(x, y);
                }
            }
            None => log::warn!("no start event to place"),
        }
        match catalog.goal {
            Some(id) => self.goal = self.place_event(host, id, &[Symbol::Room], None)?,
            None => log::warn!("no goal event to place"),
        }

        for event in &catalog.events {
            if let Some(rate) = event.rate_map {
                if self.rng.rand_bool(rate) {
                    self.place_event(host, event.id, &[Symbol::Room], None)?;
                }
            }
        }

        let room_rects: Vec<Rect> = self.layout.rooms.iter().map(|room| room.rect).collect();
        for event in &catalog.events {
            if let Some(rate) = event.rate_room {
                for rect in &room_rects {
                    if self.rng.rand_bool(rate) {
                        self.place_event(host, event.id, &[Symbol::Room], Some(*rect))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Spawn one event on a free cell holding one of `targets`
    ///
    /// `area` defaults to the whole map. Returns the chosen cell, or `None`
    /// when no placement was found.
    pub fn place_event<H: HostCollaborator + ?Sized>(
        &mut self,
        host: &mut H,
        event_id: u32,
        targets: &[Symbol],
        area: Option<Rect>,
    ) -> Result<Option<(i32, i32)>, MapGenError> {
        self.ensure_ready()?;
        let area = area.unwrap_or_else(|| self.bounds());
        let placed = find_placement(&self.grid, targets, &area, &*host, &mut self.rng);
        if let Some((x, y)) = placed {
            host.spawn_event(event_id, x, y);
            log::debug!("event {event_id} placed at ({x}, {y})");
        }
        Ok(placed)
    }

    /// Carve a single cell into corridor
    ///
    /// Cells near the map edge are protected. Returns true if the cell
    /// changed.
    pub fn dig(&mut self, x: i32, y: i32) -> Result<bool, MapGenError> {
        self.edit(|generator| generator.dig_cell(x, y))
    }

    /// Dig the cell one step from `(x, y)` towards `direction`
    pub fn dig_ahead(&mut self, x: i32, y: i32, direction: Direction) -> Result<bool, MapGenError> {
        let (dx, dy) = direction.offset();
        self.dig(x + dx, y + dy)
    }

    /// Dig the 3×3 area centered on `(cx, cy)`; returns the cells changed
    pub fn blast(&mut self, cx: i32, cy: i32) -> Result<usize, MapGenError> {
        self.edit(|generator| {
            let mut changed = 0;
            for x in cx - 1..=cx + 1 {
                for y in cy - 1..=cy + 1 {
                    if generator.dig_cell(x, y) {
                        changed += 1;
                    }
                }
            }
            changed
        })
    }

    /// Turn a cell back into solid space, letting walls regrow around it
    ///
    /// Returns whether the cell changed; off-map and already solid cells
    /// are left alone.
    pub fn erect_wall(&mut self, x: i32, y: i32) -> Result<bool, MapGenError> {
        self.edit(|generator| match generator.grid.get(x, y) {
            Some(symbol) if symbol != Symbol::Space => generator.grid.set(x, y, Symbol::Space),
            _ => false,
        })
    }

    /// Replace the layout with a single room filling the map
    pub fn fill_to_one_room(&mut self) -> Result<(), MapGenError> {
        self.edit(|generator| {
            generator.strategy = GenerationStrategy::FillRoom;
            generator.layout = GenerationStrategy::FillRoom.generate_layout(
                generator.width,
                generator.height,
                &generator.config,
                &mut generator.rng,
            );
            generator.layout.stamp(&mut generator.grid);
        })
    }

    pub fn is_ready(&self) -> bool {
        self.state == GeneratorState::Ready
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Whether one step from `(x, y)` towards `direction` is allowed
    ///
    /// Both cells must be on the map and list each other as passable.
    pub fn is_passable(&self, x: i32, y: i32, direction: Direction) -> bool {
        if !self.is_ready() {
            return false;
        }
        let (dx, dy) = direction.offset();
        match (self.grid.get(x, y), self.grid.get(x + dx, y + dy)) {
            (Some(from), Some(to)) => from.can_pass_to(to),
            _ => false,
        }
    }

    pub fn is_ground(&self, x: i32, y: i32) -> bool {
        self.grid.is_ground(x, y)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.grid.is_wall(x, y)
    }

    /// Published tile id, `None` off the map or before the first generation
    pub fn tile_id(&self, x: i32, y: i32, layer: Layer) -> Option<TileId> {
        if !self.is_ready() {
            return None;
        }
        self.buffer.get(x, y, layer)
    }

    /// Published buffer in renderer order
    pub fn data(&self) -> &[TileId] {
        self.buffer.data()
    }

    pub fn buffer(&self) -> &TileBuffer {
        &self.buffer
    }

    pub fn grid(&self) -> &SymbolGrid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn strategy(&self) -> GenerationStrategy {
        self.strategy
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start_position(&self) -> Option<(i32, i32)> {
        self.start
    }

    pub fn goal_position(&self) -> Option<(i32, i32)> {
        self.goal
    }

    /// Room containing a position
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.layout.room_at(x, y).map(|(_, room)| room)
    }

    /// Whether two positions share a room; always true on a one-room map
    pub fn same_room(&self, a: (i32, i32), b: (i32, i32)) -> bool {
        if self.strategy == GenerationStrategy::FillRoom {
            return true;
        }
        match (self.layout.room_at(a.0, a.1), self.layout.room_at(b.0, b.1)) {
            (Some((i, _)), Some((j, _))) => i == j,
            _ => false,
        }
    }

    /// Glyph map with start, goal and optionally the player marked
    pub fn render_debug(&self, player: Option<(i32, i32)>) -> String {
        let mut overlays = Vec::with_capacity(3);
        if let Some((x, y)) = self.start {
            overlays.push((x, y, Symbol::Start));
        }
        if let Some((x, y)) = self.goal {
            overlays.push((x, y, Symbol::Goal));
        }
        if let Some((x, y)) = player {
            overlays.push((x, y, Symbol::PlayerMarker));
        }
        self.grid.render(&overlays)
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn ensure_ready(&self) -> Result<(), MapGenError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(MapGenError::NotReady { state: self.state })
        }
    }

    /// Apply a grid edit, then resynthesize and republish
    fn edit<T>(&mut self, apply: impl FnOnce(&mut Self) -> T) -> Result<T, MapGenError> {
        self.ensure_ready()?;
        self.state = GeneratorState::Generating;
        let result = apply(self);
        self.refresh();
        self.state = GeneratorState::Ready;
        Ok(result)
    }

    /// Corridor-carve one cell outside the protected border
    fn dig_cell(&mut self, x: i32, y: i32) -> bool {
        let wh = self.config.wall_height();
        let (width, height) = (self.width as i32, self.height as i32);
        if x < 2 || x >= width - 2 || y < wh + 2 || y >= height - wh - 2 {
            return false;
        }
        if self.grid.is_ground(x, y) {
            return false;
        }
        self.grid.set(x, y, Symbol::Pass)
    }

    fn refresh(&mut self) {
        WallRoofSynthesizer::new(&self.config).synthesize(&mut self.grid);
        self.buffer = AutotileResolver::new(&self.grid, &self.table).resolve_all();
    }
}
