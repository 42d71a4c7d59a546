//! Room templates and the in-memory catalogue the generator resolves them from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Opening;

/// An NPC placement local to a room, in tile coordinates. Script payloads
/// are carried opaquely; interpreting them is someone else's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcPlacement {
    pub id: String,
    #[serde(rename = "type")]
    pub npc_type: String,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorPlacement {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub door_type: String,
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPlacement {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

/// An inter-level connection as authored on a room template. `target_map`
/// may hold the sentinel tokens `NEXT_LEVEL` or `PREVIOUS_LEVEL`, which
/// assembly rewrites to concrete destinations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_scene: Option<String>,
}

/// A named, immutable room template. The generator only ever reads these;
/// placement, corridor carving and assembly all work on copies of the data
/// they need.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub tileset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration_tileset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_tileset: Option<String>,
    /// Local tile indices, row-major; values `<= 0` mean "no tile here".
    pub layout: Vec<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Vec<Vec<i32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlays: Option<Vec<Vec<i32>>>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub npcs: Vec<NpcPlacement>,
    #[serde(default)]
    pub doors: Vec<DoorPlacement>,
    #[serde(default)]
    pub items: Vec<ItemPlacement>,
    #[serde(default)]
    pub connections: Vec<ConnectionPlacement>,
    #[serde(default)]
    pub start_room: bool,
}

impl Room {
    /// Tile dimensions of the base layout as (height, width).
    pub fn tile_size(&self) -> (usize, usize) {
        (self.layout.len(), self.layout.first().map_or(0, Vec::len))
    }
}

/// The room repository the generator is handed: name lookups for level
/// requests, registration for freshly synthesized filler rooms.
#[derive(Clone, Debug, Default)]
pub struct RoomCatalogue {
    rooms: HashMap<String, Room>,
}

impl RoomCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn put(&mut self, room: Room) {
        self.rooms.insert(room.name.clone(), room);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Maps a level's magic style to the tileset filler rooms are drawn with.
pub fn tileset_for_style(style: &str) -> &'static str {
    match style {
        "red" => "dungeon-ember",
        "blue" => "dungeon-frost",
        "green" => "dungeon-overgrowth",
        "white" => "dungeon-marble",
        "black" => "dungeon-obsidian",
        _ => "dungeon-base",
    }
}
