//! Shared fixtures for the generator test suites.

use crate::catalogue::Room;
use crate::types::{Opening, OpeningDirection, Pos};

use super::model::LevelData;
use super::{BLOCK_SIZE, OPEN_FLOOR_TILE};

/// A block-aligned room filled with open floor and a single top opening in
/// its north-west block.
pub(crate) fn block_room(name: &str, width_blocks: usize, height_blocks: usize, start: bool) -> Room {
    Room {
        name: name.to_owned(),
        tileset: "dungeon-base".to_owned(),
        decoration_tileset: None,
        overlay_tileset: None,
        layout: vec![vec![OPEN_FLOOR_TILE; width_blocks * BLOCK_SIZE]; height_blocks * BLOCK_SIZE],
        decorations: None,
        overlays: None,
        openings: vec![Opening { pos: Pos { y: 0, x: 0 }, direction: OpeningDirection::Top }],
        npcs: Vec::new(),
        doors: Vec::new(),
        items: Vec::new(),
        connections: Vec::new(),
        start_room: start,
    }
}

/// A two-room request on a 10x10 block grid with no enemy budget.
pub(crate) fn small_level_data() -> LevelData {
    LevelData {
        rooms: vec!["hall".to_owned(), "cell".to_owned()],
        number_of_rooms: 2,
        width: 10,
        height: 10,
        style: "blue".to_owned(),
        enemy_budget: 0,
    }
}
