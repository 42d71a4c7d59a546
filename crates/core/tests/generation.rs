use std::collections::VecDeque;

use dungeon_core::mapgen::{generate_level, model::LevelData, BLOCK_SIZE, TILE_HEIGHT, TILE_WIDTH};
use dungeon_core::{Opening, OpeningDirection, Pos, Room, RoomCatalogue};

const FLOOR: i32 = 32;

fn open_room(name: &str, tileset: &str, start: bool) -> Room {
    open_room_facing(name, tileset, start, OpeningDirection::Top)
}

fn open_room_facing(name: &str, tileset: &str, start: bool, direction: OpeningDirection) -> Room {
    Room {
        name: name.to_owned(),
        tileset: tileset.to_owned(),
        decoration_tileset: None,
        overlay_tileset: None,
        layout: vec![vec![FLOOR; BLOCK_SIZE]; BLOCK_SIZE],
        decorations: None,
        overlays: None,
        openings: vec![Opening { pos: Pos { y: 0, x: 0 }, direction }],
        npcs: Vec::new(),
        doors: Vec::new(),
        items: Vec::new(),
        connections: Vec::new(),
        start_room: start,
    }
}

fn two_room_request() -> LevelData {
    LevelData {
        rooms: vec!["alpha".to_owned(), "beta".to_owned()],
        number_of_rooms: 2,
        width: 8,
        height: 8,
        style: "blue".to_owned(),
        enemy_budget: 0,
    }
}

/// Walks four-directionally over tiles holding plain floor, which covers
/// both all-floor room interiors and the open center of corridor blocks.
fn floor_connected(layout: &[Vec<i32>], from: (usize, usize), to: (usize, usize)) -> bool {
    let height = layout.len();
    let width = layout[0].len();
    let mut seen = vec![false; width * height];
    let mut frontier = VecDeque::from([from]);
    seen[from.0 * width + from.1] = true;

    while let Some((y, x)) = frontier.pop_front() {
        if (y, x) == to {
            return true;
        }
        let mut push = |ny: usize, nx: usize| {
            if !seen[ny * width + nx] && layout[ny][nx] % 1000 == FLOOR {
                seen[ny * width + nx] = true;
                frontier.push_back((ny, nx));
            }
        };
        if y > 0 {
            push(y - 1, x);
        }
        if y + 1 < height {
            push(y + 1, x);
        }
        if x > 0 {
            push(y, x - 1);
        }
        if x + 1 < width {
            push(y, x + 1);
        }
    }
    false
}

fn room_center(room: &dungeon_core::mapgen::model::PlacedRoom) -> (usize, usize) {
    ((room.y as usize) + room.height / 2, (room.x as usize) + room.width / 2)
}

#[test]
fn two_rooms_on_a_small_grid_stay_inside_the_border_and_connect() {
    let data = two_room_request();
    for seed in 0..25_u64 {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(open_room("alpha", "dungeon-base", true));
        catalogue.put(open_room("beta", "dungeon-base", false));

        let level =
            generate_level(&mut catalogue, "level-1", 1, &data, seed).expect("generation succeeds");

        // One block of clearance on every side, in tile coordinates.
        let grid_tiles = data.width * BLOCK_SIZE;
        for room in &level.rooms {
            assert!(room.x as usize >= BLOCK_SIZE, "seed {seed}: room at the west border");
            assert!(room.y as usize >= BLOCK_SIZE, "seed {seed}: room at the north border");
            assert!(
                room.x as usize + room.width <= grid_tiles - BLOCK_SIZE,
                "seed {seed}: room at the east border"
            );
            assert!(
                room.y as usize + room.height <= grid_tiles - BLOCK_SIZE,
                "seed {seed}: room at the south border"
            );
        }

        // The two footprints never touch, not even diagonally.
        let [first, second] = &level.rooms[..] else {
            panic!("expected two placed rooms");
        };
        let gap = BLOCK_SIZE as i32;
        let overlap_x = first.x < second.x + (second.width as i32 + gap)
            && second.x < first.x + (first.width as i32 + gap);
        let overlap_y = first.y < second.y + (second.height as i32 + gap)
            && second.y < first.y + (first.height as i32 + gap);
        assert!(!(overlap_x && overlap_y), "seed {seed}: rooms closer than one block");

        // The carved corridor leaves a walkable route between the rooms.
        assert!(
            floor_connected(&level.layout, room_center(first), room_center(second)),
            "seed {seed}: no floor route between the rooms"
        );
    }
}

#[test]
fn right_and_left_facing_openings_connect_horizontally() {
    let data = two_room_request();
    for seed in 0..25_u64 {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(open_room_facing("alpha", "dungeon-base", true, OpeningDirection::Right));
        catalogue.put(open_room_facing("beta", "dungeon-base", false, OpeningDirection::Left));

        let level =
            generate_level(&mut catalogue, "level-1", 1, &data, seed).expect("generation succeeds");

        let [first, second] = &level.rooms[..] else {
            panic!("expected two placed rooms");
        };
        assert!(
            floor_connected(&level.layout, room_center(first), room_center(second)),
            "seed {seed}: no floor route between sideways-facing openings"
        );
    }
}

#[test]
fn a_room_spanning_the_whole_interior_still_generates() {
    // On a 5x5-block grid a 3x3-block room has exactly one legal offset,
    // one block in from the border.
    let mut keep = open_room("keep", "dungeon-base", true);
    keep.layout = vec![vec![FLOOR; 3 * BLOCK_SIZE]; 3 * BLOCK_SIZE];
    let data = LevelData {
        rooms: vec!["keep".to_owned()],
        number_of_rooms: 1,
        width: 5,
        height: 5,
        style: "blue".to_owned(),
        enemy_budget: 0,
    };

    for seed in 0..10_u64 {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(keep.clone());

        let level =
            generate_level(&mut catalogue, "level-1", 1, &data, seed).expect("exact fit generates");

        assert_eq!(level.rooms.len(), 1);
        assert_eq!((level.rooms[0].x, level.rooms[0].y), (BLOCK_SIZE as i32, BLOCK_SIZE as i32));
        assert_eq!(level.rooms[0].width, 3 * BLOCK_SIZE);
        assert_eq!(level.rooms[0].height, 3 * BLOCK_SIZE);
    }
}

#[test]
fn start_position_sits_at_the_start_room_center() {
    let mut catalogue = RoomCatalogue::new();
    catalogue.put(open_room("alpha", "dungeon-base", false));
    catalogue.put(open_room("beta", "dungeon-base", true));
    let data = two_room_request();

    let level = generate_level(&mut catalogue, "level-1", 1, &data, 7).expect("generation");

    let start = level.rooms.iter().find(|room| room.room_name == "beta").expect("beta placed");
    assert_eq!(
        level.start_position_x,
        start.x * TILE_WIDTH + (start.width as i32 * TILE_WIDTH) / 2
    );
    assert_eq!(
        level.start_position_y,
        start.y * TILE_HEIGHT + (start.height as i32 * TILE_HEIGHT) / 2
    );
}

#[test]
fn repeated_tilesets_share_one_gid_base() {
    let mut catalogue = RoomCatalogue::new();
    catalogue.put(open_room("quarry", "stone", true));
    catalogue.put(open_room("glacier", "ice", false));
    catalogue.put(open_room("mine", "stone", false));
    let data = LevelData {
        rooms: vec!["quarry".to_owned(), "glacier".to_owned(), "mine".to_owned()],
        number_of_rooms: 3,
        width: 12,
        height: 12,
        style: "blue".to_owned(),
        enemy_budget: 0,
    };

    let level = generate_level(&mut catalogue, "level-1", 1, &data, 13).expect("generation");

    assert_eq!(level.tilesets, vec!["stone".to_owned(), "ice".to_owned()]);

    for room in &level.rooms {
        let (y, x) = room_center(room);
        let expected = match room.room_name.as_str() {
            "glacier" => 1000 + FLOOR,
            _ => FLOOR,
        };
        assert_eq!(
            level.layout[y][x], expected,
            "room {} should use its tileset's base",
            room.room_name
        );
    }
}

#[test]
fn corridor_tiles_keep_raw_ids_even_with_offset_tilesets() {
    let mut catalogue = RoomCatalogue::new();
    catalogue.put(open_room("glacier", "ice", true));
    catalogue.put(open_room("cavern", "obsidian", false));
    let mut data = two_room_request();
    data.rooms = vec!["glacier".to_owned(), "cavern".to_owned()];

    let level = generate_level(&mut catalogue, "level-1", 1, &data, 5).expect("generation");

    // Every tile outside the two room rectangles stems from a corridor
    // pattern and stays below the first gid base.
    let inside_a_room = |y: usize, x: usize| {
        level.rooms.iter().any(|room| {
            (room.y as usize..room.y as usize + room.height).contains(&y)
                && (room.x as usize..room.x as usize + room.width).contains(&x)
        })
    };
    let mut corridor_tiles = 0;
    for (y, row) in level.layout.iter().enumerate() {
        for (x, &tile) in row.iter().enumerate() {
            if tile >= 0 && !inside_a_room(y, x) {
                assert!(tile < 1000, "corridor tile {tile} at {y}, {x} carries a gid base");
                corridor_tiles += 1;
            }
        }
    }
    assert!(corridor_tiles > 0, "two openings must produce at least one corridor block");
}
