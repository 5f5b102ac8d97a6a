//! Map generator command line
//!
//! Generates a map, applies the requested edits and prints the debug
//! rendering.

use std::error::Error;

use clap::{ArgAction, Parser};

use mg_assets::{load_config, MapAssets};
use mg_cli::{apply_edits, collect_edits, parse_point, parse_strategy, TileDump};
use mg_core::{
    GenRng, GenerationStrategy, GeneratorConfig, MapGenerator, RecordingHost, SymbolTable,
};

/// Procedural room-and-corridor map generator
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about = "Generate a tile map and print it", long_about = None)]
struct Args {
    /// Map width in cells
    #[arg(short = 'W', long, default_value_t = 40)]
    width: usize,

    /// Map height in cells
    #[arg(short = 'H', long, default_value_t = 30)]
    height: usize,

    /// Layout strategy (fill-room, room-and-pass)
    #[arg(short = 's', long, value_parser = parse_strategy, default_value = "room-and-pass")]
    strategy: GenerationStrategy,

    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Generator settings file (JSON)
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Rows of wall face (1-3)
    #[arg(long)]
    wall_height: Option<u32>,

    /// Minimum room edge
    #[arg(long = "min-room")]
    min_room_size: Option<u32>,

    /// Maximum room edge
    #[arg(long = "max-room")]
    max_room_size: Option<u32>,

    /// Leave out wall faces below southern roofs
    #[arg(long)]
    no_outer_wall: bool,

    /// Template map providing tiles and events (JSON)
    #[arg(short = 't', long)]
    template: Option<String>,

    /// Dig one cell, x,y (repeatable)
    #[arg(long, value_parser = parse_point)]
    dig: Vec<(i32, i32)>,

    /// Dig the 3x3 area around x,y (repeatable)
    #[arg(long, value_parser = parse_point)]
    blast: Vec<(i32, i32)>,

    /// Fill a cell back in, x,y (repeatable)
    #[arg(long, value_parser = parse_point)]
    wall: Vec<(i32, i32)>,

    /// Replace the layout with one big room
    #[arg(long)]
    big_room: bool,

    /// Also print the tile buffer as JSON
    #[arg(long)]
    tiles: bool,

    /// More log output (repeat for more)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Settings file first, then flags on top
    fn generator_config(&self) -> Result<GeneratorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(wall_height) = self.wall_height {
            config.wall_height = wall_height;
        }
        if let Some(min) = self.min_room_size {
            config.min_room_size = min;
        }
        if let Some(max) = self.max_room_size {
            config.max_room_size = max;
        }
        if self.no_outer_wall {
            config.show_outer_wall = false;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.generator_config()?;
    let rng = match args.seed {
        Some(seed) => GenRng::new(seed),
        None => GenRng::from_entropy(),
    };
    log::info!("seed {}", rng.seed());

    let assets = args
        .template
        .as_deref()
        .map(MapAssets::load_from_file)
        .transpose()?;
    let table = assets
        .as_ref()
        .map_or_else(SymbolTable::default, |assets| assets.table.clone());

    let mut generator =
        MapGenerator::new(args.width, args.height, config, table, args.strategy, rng)?;
    let mut host = RecordingHost::default();
    match &assets {
        Some(assets) => generator.setup(&mut host, &assets.catalog)?,
        None => generator.generate(),
    }

    let edits = collect_edits(args.big_room, &args.dig, &args.blast, &args.wall);
    apply_edits(&mut generator, &edits)?;

    print!("{}", generator.render_debug(host.player));
    for event in &host.events {
        println!("event {} at ({}, {})", event.event_id, event.x, event.y);
    }
    if args.tiles {
        println!(
            "{}",
            serde_json::to_string(&TileDump::from(generator.buffer()))?
        );
    }
    Ok(())
}
