use anyhow::{bail, Result};
use clap::Parser;
use dungeon_core::mapgen::model::LevelData;
use dungeon_core::mapgen::{generate_level, BLOCK_SIZE};
use dungeon_core::{Opening, OpeningDirection, Pos, Room, RoomCatalogue};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First seed of the sweep
    #[arg(short, long, default_value_t = 0)]
    start: u64,
    /// Number of consecutive seeds to generate
    #[arg(short, long, default_value_t = 1000)]
    count: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Sweeping {} seeds starting at {}...", args.count, args.start);
    let data = LevelData {
        rooms: vec!["anchor".to_owned()],
        number_of_rooms: 4,
        width: 12,
        height: 12,
        style: "black".to_owned(),
        enemy_budget: 8,
    };

    for seed in args.start..args.start + args.count {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(anchor_room());

        let level = match generate_level(&mut catalogue, "sweep", 1, &data, seed) {
            Ok(level) => level,
            Err(error) => bail!("Seed {seed} failed to generate: {error}"),
        };

        // Assert invariants
        let grid_tiles = (data.width * BLOCK_SIZE) as i32;
        for room in &level.rooms {
            if room.x < BLOCK_SIZE as i32
                || room.y < BLOCK_SIZE as i32
                || room.x + room.width as i32 > grid_tiles - BLOCK_SIZE as i32
                || room.y + room.height as i32 > grid_tiles - BLOCK_SIZE as i32
            {
                bail!("Seed {seed}: room {} breaches the border", room.room_name);
            }
        }
        if level.rooms.len() != data.number_of_rooms {
            bail!("Seed {seed}: placed {} of {} rooms", level.rooms.len(), data.number_of_rooms);
        }
        if level.npcs.len() != data.enemy_budget as usize {
            bail!(
                "Seed {seed}: spent budget {} on {} spawns",
                data.enemy_budget,
                level.npcs.len()
            );
        }
    }

    println!("Sweep completed successfully.");
    Ok(())
}

fn anchor_room() -> Room {
    Room {
        name: "anchor".to_owned(),
        tileset: "dungeon-base".to_owned(),
        decoration_tileset: None,
        overlay_tileset: None,
        layout: vec![vec![32; 2 * BLOCK_SIZE]; BLOCK_SIZE],
        decorations: None,
        overlays: None,
        openings: vec![Opening { pos: Pos { y: 0, x: 0 }, direction: OpeningDirection::Top }],
        npcs: Vec::new(),
        doors: Vec::new(),
        items: Vec::new(),
        connections: Vec::new(),
        start_room: true,
    }
}
