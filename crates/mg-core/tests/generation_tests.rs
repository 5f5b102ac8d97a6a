//! End-to-end generation scenarios

use mg_core::dungeon::Side;
use mg_core::{
    AutotileResolver, Direction, GenRng, GenerationStrategy, GeneratorConfig, Layer,
    MapGenerator, Rect, Symbol, SymbolTable,
};
use strum::IntoEnumIterator;

fn generator(width: usize, height: usize, strategy: GenerationStrategy, seed: u64) -> MapGenerator {
    let mut generator = MapGenerator::new(
        width,
        height,
        GeneratorConfig::default(),
        SymbolTable::default(),
        strategy,
        GenRng::new(seed),
    )
    .expect("valid generator");
    generator.generate();
    generator
}

#[test]
fn test_fill_room_scenario() {
    let generator = generator(20, 15, GenerationStrategy::FillRoom, 0);
    let grid = generator.grid();

    assert_eq!(generator.layout().rooms[0].rect, Rect::new(3, 4, 14, 7));
    for y in 4..=10 {
        for x in 3..=16 {
            assert_eq!(grid.get(x, y), Some(Symbol::Room), "({x}, {y})");
        }
    }

    // One row of wall face, roof beyond it
    for x in 3..=16 {
        assert_eq!(grid.get(x, 3), Some(Symbol::Wall), "({x}, 3)");
        assert_eq!(grid.get(x, 2), Some(Symbol::Roof), "({x}, 2)");
    }
    for y in 2..=11 {
        assert_eq!(grid.get(2, y), Some(Symbol::Roof), "(2, {y})");
        assert_eq!(grid.get(17, y), Some(Symbol::Roof), "(17, {y})");
    }
    for x in 2..=17 {
        assert_eq!(grid.get(x, 11), Some(Symbol::Roof), "({x}, 11)");
        assert_eq!(grid.get(x, 12), Some(Symbol::Wall), "({x}, 12)");
    }

    assert_eq!(grid.count(Symbol::Pass), 0);
    assert_eq!(grid.count(Symbol::Rubble), 0);
    assert_eq!(grid.count(Symbol::Room), 14 * 7);
    assert_eq!(grid.count(Symbol::Wall), 14 + 16);
    assert_eq!(grid.count(Symbol::Roof), 16 * 2 + 8 * 2);
}

#[test]
fn test_room_and_pass_scenario() {
    for seed in [1, 7, 42, 1337, 2026] {
        let generator = generator(40, 30, GenerationStrategy::RoomAndPass, seed);
        let layout = generator.layout();

        assert!(
            (2..=5).contains(&layout.blocks.len()),
            "seed {seed}: {} blocks",
            layout.blocks.len()
        );
        for room in &layout.rooms {
            assert!((5..=10).contains(&room.rect.w), "seed {seed}: {room:?}");
            assert!((5..=10).contains(&room.rect.h), "seed {seed}: {room:?}");
        }
        assert!(!layout.corridors.is_empty(), "seed {seed}: no corridors");

        // Every corridor reaches both of its rooms through Pass cells
        let grid = generator.grid();
        for corridor in &layout.corridors {
            for segment in &corridor.segments {
                for y in segment.y..segment.bottom() {
                    for x in segment.x..segment.right() {
                        assert_eq!(grid.get(x, y), Some(Symbol::Pass), "seed {seed}: ({x}, {y})");
                    }
                }
            }
            let from = layout.rooms[corridor.from];
            let to = layout.rooms[corridor.to];
            assert!(from.has_pass(corridor.side));
            assert!(to.has_pass(corridor.side.opposite()));
        }
    }
}

#[test]
fn test_dig_into_wall_scenario() {
    let mut generator = generator(20, 15, GenerationStrategy::FillRoom, 0);
    assert_eq!(generator.grid().get(8, 2), Some(Symbol::Roof));

    assert_eq!(generator.dig(8, 3), Ok(true));
    let grid = generator.grid();
    assert_eq!(grid.get(8, 3), Some(Symbol::Pass));
    // The face moves up one row above the new corridor cell
    assert_eq!(grid.get(8, 2), Some(Symbol::Wall));
    assert_eq!(grid.get(8, 1), Some(Symbol::Roof));
    assert!(generator.is_passable(8, 4, Direction::Up));
}

#[test]
fn test_blast_at_corner_scenario() {
    let mut generator = generator(20, 15, GenerationStrategy::FillRoom, 0);

    // Column 1 lies in the protected border
    assert_eq!(generator.blast(2, 4), Ok(4));
    let grid = generator.grid();
    for y in 3..=5 {
        assert!(!grid.is_ground(1, y), "(1, {y})");
    }
    for (x, y) in [(2, 3), (3, 3), (2, 4), (2, 5)] {
        assert_eq!(grid.get(x, y), Some(Symbol::Pass), "({x}, {y})");
    }
    assert_eq!(grid.get(3, 4), Some(Symbol::Room));
    assert_eq!(grid.get(3, 5), Some(Symbol::Room));
}

#[test]
fn test_walls_are_never_passable() {
    let generator = generator(40, 30, GenerationStrategy::RoomAndPass, 99);
    let grid = generator.grid();
    let blocked = [Symbol::Wall, Symbol::Rubble, Symbol::Space];

    for y in 0..30 {
        for x in 0..40 {
            let here = grid.get(x, y).unwrap();
            for direction in Direction::iter() {
                let (dx, dy) = direction.offset();
                let passable = generator.is_passable(x, y, direction);
                match grid.get(x + dx, y + dy) {
                    Some(there) => {
                        assert_eq!(passable, here.can_pass_to(there));
                        if blocked.contains(&here) || blocked.contains(&there) {
                            assert!(!passable, "({x}, {y}) {direction}");
                        }
                    }
                    None => assert!(!passable),
                }
            }
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let generator = generator(40, 30, GenerationStrategy::RoomAndPass, 5);
    let resolver = AutotileResolver::new(generator.grid(), generator.symbol_table());
    assert_eq!(&resolver.resolve_all(), generator.buffer());
    assert_eq!(resolver.resolve_all(), resolver.resolve_all());
}

#[test]
fn test_same_seed_same_map() {
    let a = generator(50, 40, GenerationStrategy::RoomAndPass, 314);
    let b = generator(50, 40, GenerationStrategy::RoomAndPass, 314);
    assert_eq!(a.layout(), b.layout());
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_ground_tiles_keep_their_kind() {
    let generator = generator(40, 30, GenerationStrategy::RoomAndPass, 8);
    let table = generator.symbol_table();
    let grid = generator.grid();

    for y in 0..30 {
        for x in 0..40 {
            let symbol = grid.get(x, y).unwrap();
            let base = table.base_tile(symbol, Layer::TileALower);
            let tile = generator.tile_id(x, y, Layer::TileALower).unwrap();
            if base.is_autotile() {
                assert!(tile.is_same_kind(base), "({x}, {y}) {symbol}");
            } else {
                assert_eq!(tile, base);
            }
        }
    }
}

#[test]
fn test_corridor_sides_are_distinct() {
    let generator = generator(60, 45, GenerationStrategy::RoomAndPass, 21);
    let layout = generator.layout();
    let mut used: Vec<(usize, Side)> = Vec::new();
    for corridor in &layout.corridors {
        for end in [
            (corridor.from, corridor.side),
            (corridor.to, corridor.side.opposite()),
        ] {
            assert!(!used.contains(&end), "{end:?} carries two corridors");
            used.push(end);
        }
    }
}
