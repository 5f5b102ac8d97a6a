//! Host-side collaborators
//!
//! The generator never spawns anything itself. After a map is generated it
//! picks positions for the authored events and hands them to a
//! `HostCollaborator`, which owns entities, the player and per-map state.

use serde::{Deserialize, Serialize};

use crate::dungeon::Rect;
use crate::grid::SymbolGrid;
use crate::rng::RandomSource;
use crate::symbol::Symbol;

/// Side effects the generator asks of the host game
pub trait HostCollaborator {
    /// Forget per-map state left over from a previous map
    fn reset_map_state(&mut self) {}

    /// An entity already stands at the position
    fn is_occupied(&self, x: i32, y: i32) -> bool;

    /// Spawn an instance of an authored event
    fn spawn_event(&mut self, event_id: u32, x: i32, y: i32);

    /// Put the player at the position
    fn locate_player(&mut self, x: i32, y: i32);
}

/// An event spawned through `RecordingHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedEvent {
    pub event_id: u32,
    pub x: i32,
    pub y: i32,
}

/// Host that only remembers what it was asked to do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingHost {
    pub events: Vec<SpawnedEvent>,
    pub player: Option<(i32, i32)>,
    pub resets: usize,
}

impl HostCollaborator for RecordingHost {
    fn reset_map_state(&mut self) {
        self.events.clear();
        self.player = None;
        self.resets += 1;
    }

    fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.events.iter().any(|event| (event.x, event.y) == (x, y))
    }

    fn spawn_event(&mut self, event_id: u32, x: i32, y: i32) {
        self.events.push(SpawnedEvent { event_id, x, y });
    }

    fn locate_player(&mut self, x: i32, y: i32) {
        self.player = Some((x, y));
    }
}

/// An authored event and its spawn rates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: u32,
    /// Chance of one instance per map
    pub rate_map: Option<f64>,
    /// Chance of one instance in each room
    pub rate_room: Option<f64>,
}

/// Events available to populate a generated map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventCatalog {
    /// Event placed where the player starts
    pub start: Option<u32>,
    /// Event placed as the goal
    pub goal: Option<u32>,
    /// Rated events, in authoring order
    pub events: Vec<EventTemplate>,
}

/// Random free cell inside `area` holding one of `targets`
///
/// Gives up after `(area)²` draws; returns `None` straight away when no cell
/// of the area holds a target symbol.
pub fn find_placement<H, R>(
    grid: &SymbolGrid,
    targets: &[Symbol],
    area: &Rect,
    host: &H,
    rng: &mut R,
) -> Option<(i32, i32)>
where
    H: HostCollaborator + ?Sized,
    R: RandomSource + ?Sized,
{
    let is_target = |x: i32, y: i32| grid.get(x, y).is_some_and(|s| targets.contains(&s));

    let any = (area.y..area.bottom()).any(|y| (area.x..area.right()).any(|x| is_target(x, y)));
    if !any {
        log::warn!("no {targets:?} cell in {area:?}");
        return None;
    }

    let attempts = (area.area() as u64).pow(2);
    for _ in 0..attempts {
        let x = area.x + rng.random_int(area.w);
        let y = area.y + rng.random_int(area.h);
        if !host.is_occupied(x, y) && is_target(x, y) {
            return Some((x, y));
        }
    }

    log::warn!("gave up placing on {targets:?} in {area:?} after {attempts} attempts");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GenRng;

    #[test]
    fn test_recording_host() {
        let mut host = RecordingHost::default();
        host.spawn_event(3, 1, 2);
        host.locate_player(1, 2);
        assert!(host.is_occupied(1, 2));
        assert!(!host.is_occupied(2, 1));
        assert_eq!(host.player, Some((1, 2)));

        host.reset_map_state();
        assert!(host.events.is_empty());
        assert_eq!(host.player, None);
        assert_eq!(host.resets, 1);
    }

    #[test]
    fn test_placement_lands_on_target() {
        let mut grid = SymbolGrid::new(10, 10);
        grid.fill_rect(&Rect::new(2, 2, 3, 3), Symbol::Room);
        let host = RecordingHost::default();
        let mut rng = GenRng::new(5);

        for _ in 0..20 {
            let (x, y) =
                find_placement(&grid, &[Symbol::Room], &Rect::new(0, 0, 10, 10), &host, &mut rng)
                    .unwrap();
            assert_eq!(grid.get(x, y), Some(Symbol::Room));
        }
    }

    #[test]
    fn test_placement_without_target_cells() {
        let grid = SymbolGrid::new(6, 6);
        let host = RecordingHost::default();
        let mut rng = GenRng::new(5);
        let area = Rect::new(0, 0, 6, 6);
        assert_eq!(find_placement(&grid, &[Symbol::Room], &area, &host, &mut rng), None);
    }

    #[test]
    fn test_placement_skips_occupied_cells() {
        let mut grid = SymbolGrid::new(4, 4);
        grid.set(1, 1, Symbol::Room);
        grid.set(2, 1, Symbol::Room);
        let mut host = RecordingHost::default();
        host.spawn_event(1, 1, 1);
        let mut rng = GenRng::new(9);

        let area = Rect::new(0, 0, 4, 4);
        assert_eq!(
            find_placement(&grid, &[Symbol::Room], &area, &host, &mut rng),
            Some((2, 1))
        );

        host.spawn_event(2, 2, 1);
        assert_eq!(find_placement(&grid, &[Symbol::Room], &area, &host, &mut rng), None);
    }
}
