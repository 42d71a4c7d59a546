//! Public data models for level requests and the generated level descriptor.

use serde::{Deserialize, Serialize};

/// Per-level slice of a dungeon run request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    /// Catalogue names of the rooms this level must contain.
    pub rooms: Vec<String>,
    /// Minimum room count; the gap to `rooms.len()` is filled with
    /// synthesized rooms.
    pub number_of_rooms: usize,
    /// Grid width in blocks.
    pub width: usize,
    /// Grid height in blocks.
    pub height: usize,
    /// Magic style, mapped to a tileset for filler rooms.
    pub style: String,
    pub enemy_budget: u32,
}

/// An NPC in the final descriptor, in world pixel coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcSpawn {
    pub id: String,
    #[serde(rename = "type")]
    pub npc_type: String,
    pub x: i32,
    pub y: i32,
    pub facing_x: i32,
    pub facing_y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorSpawn {
    pub id: String,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub door_type: String,
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpawn {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

/// An inter-level connection with sentinel targets already rewritten to
/// concrete destinations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConnection {
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

/// Where a room landed, in tile coordinates, with its tile dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedRoom {
    pub room_name: String,
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

/// The complete generated level. Coordinates are world pixels except where
/// a field documents otherwise; the three grids hold global tile
/// identifiers (`tileset base + local index`) or the empty sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonLevel {
    pub id: String,
    pub start_position_x: i32,
    pub start_position_y: i32,
    pub rooms: Vec<PlacedRoom>,
    /// Ascending by assigned identifier base, i.e. first-seen order.
    pub tilesets: Vec<String>,
    pub layout: Vec<Vec<i32>>,
    pub decoration_layout: Vec<Vec<i32>>,
    pub overlay_layout: Vec<Vec<i32>>,
    pub npcs: Vec<NpcSpawn>,
    pub connections: Vec<LevelConnection>,
    pub doors: Vec<DoorSpawn>,
    pub items: Vec<ItemSpawn>,
    pub enemy_level: u32,
}
