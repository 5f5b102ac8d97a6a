//! mg-cli: helpers behind the `mapgen` binary
//!
//! Argument parsers for clap, map edits applied after generation, and the
//! JSON dump of the published tile buffer.

use serde::Serialize;

use mg_core::{GenerationStrategy, MapGenError, MapGenerator, RandomSource, TileBuffer};

/// Parse `x,y` into a cell position
pub fn parse_point(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

/// Parse a strategy by its kebab-case name
pub fn parse_strategy(s: &str) -> Result<GenerationStrategy, String> {
    match s {
        "fill-room" => Ok(GenerationStrategy::FillRoom),
        "room-and-pass" => Ok(GenerationStrategy::RoomAndPass),
        _ => Err(format!(
            "unknown strategy '{s}' (expected fill-room or room-and-pass)"
        )),
    }
}

/// A change requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEdit {
    BigRoom,
    Dig(i32, i32),
    Blast(i32, i32),
    Wall(i32, i32),
}

/// Edits in the order they are applied: the big room first, then digs,
/// blasts and walls in command-line order
pub fn collect_edits(
    big_room: bool,
    dig: &[(i32, i32)],
    blast: &[(i32, i32)],
    wall: &[(i32, i32)],
) -> Vec<MapEdit> {
    let mut edits = Vec::with_capacity(dig.len() + blast.len() + wall.len() + 1);
    if big_room {
        edits.push(MapEdit::BigRoom);
    }
    edits.extend(dig.iter().map(|&(x, y)| MapEdit::Dig(x, y)));
    edits.extend(blast.iter().map(|&(x, y)| MapEdit::Blast(x, y)));
    edits.extend(wall.iter().map(|&(x, y)| MapEdit::Wall(x, y)));
    edits
}

/// Apply edits to a ready generator
pub fn apply_edits<R: RandomSource>(
    generator: &mut MapGenerator<R>,
    edits: &[MapEdit],
) -> Result<(), MapGenError> {
    for edit in edits {
        match *edit {
            MapEdit::BigRoom => generator.fill_to_one_room()?,
            MapEdit::Dig(x, y) => {
                if !generator.dig(x, y)? {
                    log::info!("nothing to dig at ({x}, {y})");
                }
            }
            MapEdit::Blast(x, y) => {
                let changed = generator.blast(x, y)?;
                log::info!("blast at ({x}, {y}) opened {changed} cells");
            }
            MapEdit::Wall(x, y) => {
                if !generator.erect_wall(x, y)? {
                    log::info!("nothing to fill at ({x}, {y})");
                }
            }
        }
    }
    Ok(())
}

/// Published buffer as written by `--tiles`
#[derive(Debug, Serialize)]
pub struct TileDump {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl From<&TileBuffer> for TileDump {
    fn from(buffer: &TileBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            data: buffer.to_raw(),
        }
    }
}
