use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::mapgen::model::LevelData;
use dungeon_core::mapgen::{generate_level, BLOCK_SIZE};
use dungeon_core::{Opening, OpeningDirection, Pos, Room, RoomCatalogue};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Grid width in blocks
    #[arg(long, default_value_t = 12)]
    width: usize,
    /// Grid height in blocks
    #[arg(long, default_value_t = 12)]
    height: usize,
    /// Total room count; the demo catalogue contributes two, the rest are
    /// synthesized
    #[arg(short, long, default_value_t = 4)]
    rooms: usize,
    /// Magic style for filler rooms
    #[arg(long, default_value = "blue")]
    style: String,
    /// Dungeon depth
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Enemy budget to spend on spawns
    #[arg(short, long, default_value_t = 6)]
    budget: u32,
    /// Write the full level descriptor as JSON to this path
    #[arg(long)]
    json_out: Option<String>,
    /// Log generation internals
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(log_level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("Failed to install logger")?;

    let mut catalogue = demo_catalogue();
    let data = LevelData {
        rooms: vec!["entrance-hall".to_owned(), "guard-post".to_owned()],
        number_of_rooms: args.rooms,
        width: args.width,
        height: args.height,
        style: args.style.clone(),
        enemy_budget: args.budget,
    };

    let id = format!("dungeonLevel{}", args.level);
    let level = generate_level(&mut catalogue, &id, args.level, &data, args.seed)
        .with_context(|| format!("Failed to generate {id} from seed {}", args.seed))?;

    println!("{}", render_preview(&level.layout));
    println!("Level: {id} (seed {})", args.seed);
    println!("Start: {}, {} px", level.start_position_x, level.start_position_y);
    println!("Tilesets: {}", level.tilesets.join(", "));
    for room in &level.rooms {
        println!(
            "  room {} at tile {}, {} ({}x{})",
            room.room_name, room.x, room.y, room.width, room.height
        );
    }
    println!(
        "NPCs: {}, doors: {}, connections: {}",
        level.npcs.len(),
        level.doors.len(),
        level.connections.len()
    );

    if let Some(path) = &args.json_out {
        let json = serde_json::to_string_pretty(&level).context("Failed to serialize level")?;
        fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
        println!("Descriptor written to {path}");
    }

    Ok(())
}

/// One character per tile: untouched cells blank, open floor dotted,
/// everything else (walls, shadows, decorations) solid.
fn render_preview(layout: &[Vec<i32>]) -> String {
    let mut preview = String::with_capacity(layout.len() * (layout[0].len() + 1));
    for row in layout {
        for &tile in row {
            preview.push(match tile {
                -1 => ' ',
                tile if tile % 1000 == 32 => '.',
                _ => '#',
            });
        }
        preview.push('\n');
    }
    preview
}

/// Two hand-authored rooms: a start hall with stairs back up and a guarded
/// side room. Everything beyond these is synthesized at generation time.
fn demo_catalogue() -> RoomCatalogue {
    let mut catalogue = RoomCatalogue::new();

    let mut hall = bordered_room("entrance-hall", 2, 2);
    hall.start_room = true;
    hall.openings = vec![
        Opening { pos: Pos { y: 0, x: 1 }, direction: OpeningDirection::Top },
        Opening { pos: Pos { y: 1, x: 0 }, direction: OpeningDirection::Left },
    ];
    hall.connections.push(dungeon_core::catalogue::ConnectionPlacement {
        x: 8,
        y: 4,
        target_map: Some("PREVIOUS_LEVEL".to_owned()),
        target_room: None,
        target_x: None,
        target_y: None,
        target_scene: None,
    });
    catalogue.put(hall);

    let mut post = bordered_room("guard-post", 1, 1);
    post.openings =
        vec![Opening { pos: Pos { y: 0, x: 0 }, direction: OpeningDirection::Bottom }];
    post.npcs.push(dungeon_core::catalogue::NpcPlacement {
        id: "watcher".to_owned(),
        npc_type: "enemy-zombie".to_owned(),
        x: 4,
        y: 4,
        facing_x: None,
        facing_y: Some(1),
        script: None,
    });
    post.doors.push(dungeon_core::catalogue::DoorPlacement {
        id: "south".to_owned(),
        x: 4,
        y: 7,
        door_type: "wood".to_owned(),
        open: false,
    });
    catalogue.put(post);

    catalogue
}

/// A block-aligned room with wall tiles on its edges and floor inside.
fn bordered_room(name: &str, width_blocks: usize, height_blocks: usize) -> Room {
    let width = width_blocks * BLOCK_SIZE;
    let height = height_blocks * BLOCK_SIZE;
    let mut layout = vec![vec![32; width]; height];
    for x in 0..width {
        layout[0][x] = 8;
        layout[height - 1][x] = 2;
    }
    for row in layout.iter_mut() {
        row[0] = 6;
        row[width - 1] = 4;
    }
    layout[0][0] = 13;
    layout[0][width - 1] = 12;
    layout[height - 1][0] = 11;
    layout[height - 1][width - 1] = 10;

    Room {
        name: name.to_owned(),
        tileset: "dungeon-base".to_owned(),
        decoration_tileset: None,
        overlay_tileset: None,
        layout,
        decorations: None,
        overlays: None,
        openings: Vec::new(),
        npcs: Vec::new(),
        doors: Vec::new(),
        items: Vec::new(),
        connections: Vec::new(),
        start_room: false,
    }
}
