//! Final level assembly: converting room-local placements to world pixels,
//! rewriting sentinel connections, and spending the leftover enemy budget
//! on filler spawns.

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::catalogue::Room;
use crate::types::Pos;

use super::compose::TileGrids;
use super::model::{DoorSpawn, ItemSpawn, LevelConnection, NpcSpawn, PlacedRoom};
use super::placement::Placement;
use super::rng::index_below;
use super::{BLOCK_SIZE, OPEN_FLOOR_TILE, TILE_HEIGHT, TILE_WIDTH};

/// The type spawned for budget-filling enemies.
const FILLER_ENEMY_TYPE: &str = "enemy-zombie";

/// Budget cost of spawning one NPC of the given type. Unknown types cost 1.
pub fn enemy_budget_cost(npc_type: &str) -> u32 {
    match npc_type {
        "enemy-zombie" => 1,
        "enemy-vampire" => 3,
        "enemy-necromancer" => 4,
        "boss-lich" => 10,
        _ => 1,
    }
}

/// Resolved destination of a connection after sentinel rewriting.
struct ConnectionTarget {
    target_map: Option<String>,
    target_room: Option<String>,
    target_x: Option<i32>,
    target_y: Option<i32>,
}

fn to_pixels(tile: Pos) -> (i32, i32) {
    (tile.x * TILE_WIDTH, tile.y * TILE_HEIGHT)
}

fn room_tile(local_x: i32, local_y: i32, offset: Pos) -> Pos {
    Pos {
        y: local_y + offset.y * BLOCK_SIZE as i32,
        x: local_x + offset.x * BLOCK_SIZE as i32,
    }
}

/// Converts every room NPC to a world-pixel spawn, deducting each type's
/// cost from the budget. The budget saturates at zero rather than going
/// negative, so an expensive room cannot produce a refund elsewhere.
pub(super) fn convert_npcs(
    rooms: &[Room],
    placement: &Placement,
    budget: &mut u32,
) -> Vec<NpcSpawn> {
    let mut spawns = Vec::new();
    for (room_index, room) in rooms.iter().enumerate() {
        let offset = placement.offsets[room_index];
        for npc in &room.npcs {
            *budget = budget.saturating_sub(enemy_budget_cost(&npc.npc_type));
            let (x, y) = to_pixels(room_tile(npc.x, npc.y, offset));
            spawns.push(NpcSpawn {
                id: format!("{}-{}", room.name, npc.id),
                npc_type: npc.npc_type.clone(),
                x,
                y,
                facing_x: npc.facing_x.unwrap_or(0),
                facing_y: npc.facing_y.unwrap_or(0),
            });
        }
    }
    spawns
}

/// Door ids are namespaced `levelid_roomname_doorid` so repeated room
/// templates cannot collide across or within a level.
pub(super) fn collect_doors(rooms: &[Room], placement: &Placement, level_id: &str) -> Vec<DoorSpawn> {
    let mut doors = Vec::new();
    for (room_index, room) in rooms.iter().enumerate() {
        let offset = placement.offsets[room_index];
        for door in &room.doors {
            let (x, y) = to_pixels(room_tile(door.x, door.y, offset));
            doors.push(DoorSpawn {
                id: format!("{level_id}_{}_{}", room.name, door.id),
                x,
                y,
                door_type: door.door_type.clone(),
                open: door.open,
            });
        }
    }
    doors
}

pub(super) fn collect_items(rooms: &[Room], placement: &Placement) -> Vec<ItemSpawn> {
    let mut items = Vec::new();
    for (room_index, room) in rooms.iter().enumerate() {
        let offset = placement.offsets[room_index];
        for item in &room.items {
            let (x, y) = to_pixels(room_tile(item.x, item.y, offset));
            items.push(ItemSpawn { id: item.id.clone(), x, y });
        }
    }
    items
}

/// Collects connections with the `NEXT_LEVEL`/`PREVIOUS_LEVEL` sentinels
/// rewritten to concrete destinations. Going up from depth 1 leads back to
/// town; every other hop targets the adjacent dungeon level's fixed
/// connection room.
pub(super) fn collect_connections(
    rooms: &[Room],
    placement: &Placement,
    dungeon_level: u32,
) -> Vec<LevelConnection> {
    let mut connections = Vec::new();
    for (room_index, room) in rooms.iter().enumerate() {
        let offset = placement.offsets[room_index];
        for connection in &room.connections {
            let (x, y) = to_pixels(room_tile(connection.x, connection.y, offset));
            let target = match connection.target_map.as_deref() {
                Some("NEXT_LEVEL") => ConnectionTarget {
                    target_map: Some(format!("dungeonLevel{}", dungeon_level + 1)),
                    target_room: Some("connection_up".to_owned()),
                    target_x: Some(12),
                    target_y: Some(5),
                },
                Some("PREVIOUS_LEVEL") if dungeon_level == 1 => ConnectionTarget {
                    target_map: Some("town_new".to_owned()),
                    target_room: Some("town_new".to_owned()),
                    target_x: Some(75),
                    target_y: Some(45),
                },
                Some("PREVIOUS_LEVEL") => ConnectionTarget {
                    target_map: Some(format!("dungeonLevel{}", dungeon_level - 1)),
                    target_room: Some("connection_down".to_owned()),
                    target_x: Some(11),
                    target_y: Some(6),
                },
                _ => ConnectionTarget {
                    target_map: connection.target_map.clone(),
                    target_room: connection.target_room.clone(),
                    target_x: connection.target_x,
                    target_y: connection.target_y,
                },
            };
            connections.push(LevelConnection {
                x,
                y,
                target_map: target.target_map,
                target_room: target.target_room,
                target_x: target.target_x,
                target_y: target.target_y,
                target_scene: connection.target_scene.clone(),
            });
        }
    }
    connections
}

/// Spends the remaining enemy budget on zombies, drawn uniformly without
/// replacement from every tile whose combined layout value is exactly the
/// open corridor floor. Stops when the budget or the candidates run out.
pub(super) fn filler_enemies(
    rng: &mut ChaCha8Rng,
    grids: &TileGrids,
    budget: &mut u32,
) -> Vec<NpcSpawn> {
    let mut spawns = Vec::new();
    if *budget == 0 {
        return spawns;
    }

    let mut candidates = Vec::new();
    for row in 0..grids.height() {
        for column in 0..grids.width() {
            if grids.layout_at(row, column) == OPEN_FLOOR_TILE {
                candidates.push(Pos { y: row as i32, x: column as i32 });
            }
        }
    }

    let mut next_id = 0;
    while *budget > 0 && !candidates.is_empty() {
        let tile = candidates.remove(index_below(rng, candidates.len()));
        *budget -= 1;
        let (x, y) = to_pixels(tile);
        debug!("placed {FILLER_ENEMY_TYPE} at {x}, {y}, budget left {budget}");
        spawns.push(NpcSpawn {
            id: format!("filler-{next_id}"),
            npc_type: FILLER_ENEMY_TYPE.to_owned(),
            x,
            y,
            facing_x: 0,
            facing_y: 0,
        });
        next_id += 1;
    }
    spawns
}

/// Room placement summaries in tile coordinates.
pub(super) fn placed_rooms(rooms: &[Room], placement: &Placement) -> Vec<PlacedRoom> {
    rooms
        .iter()
        .zip(&placement.offsets)
        .map(|(room, offset)| {
            let (height, width) = room.tile_size();
            PlacedRoom {
                room_name: room.name.clone(),
                x: offset.x * BLOCK_SIZE as i32,
                y: offset.y * BLOCK_SIZE as i32,
                width,
                height,
            }
        })
        .collect()
}

/// World-pixel center of the start room, where the camera and player begin.
pub(super) fn start_position(room: &Room, offset: Pos) -> (i32, i32) {
    let (height, width) = room.tile_size();
    let (left, top) = to_pixels(Pos {
        y: offset.y * BLOCK_SIZE as i32,
        x: offset.x * BLOCK_SIZE as i32,
    });
    (left + (width as i32 * TILE_WIDTH) / 2, top + (height as i32 * TILE_HEIGHT) / 2)
}
