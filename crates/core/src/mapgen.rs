//! Procedural dungeon-layout generation split into pipeline stages: room
//! placement search, corridor pathfinding, corridor/room tile composition,
//! and final level assembly.

pub mod model;

mod assembly;
mod compose;
mod corridors;
mod filler;
mod generator;
mod paths;
mod placement;
mod rng;

#[cfg(test)]
mod test_support;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::catalogue::RoomCatalogue;
use crate::error::GenerateError;

pub use assembly::enemy_budget_cost;
pub use generator::DungeonGenerator;
pub use model::DungeonLevel;

/// Edge length of one block, in tiles. Rooms are placed and corridors are
/// routed at block granularity.
pub const BLOCK_SIZE: usize = 8;

/// Tile dimensions in world pixels.
pub const TILE_WIDTH: i32 = 16;
pub const TILE_HEIGHT: i32 = 16;

/// Spacing between global tile-identifier bases. Each tileset discovered
/// during a run is assigned the next multiple as its base.
pub const GID_MULTIPLE: i32 = 1000;

/// Sentinel for grid cells no room or corridor has written.
pub const EMPTY_TILE: i32 = -1;

/// The plain walkable floor tile of the corridor patterns; filler enemies
/// spawn on cells holding exactly this value.
pub const OPEN_FLOOR_TILE: i32 = 32;

const MAX_GENERATION_RESETS: u32 = 100;
const MAX_ROOM_PLACEMENT_TRIES: u32 = 1000;

/// Generates one dungeon level from a seed. Convenience wrapper around
/// [`DungeonGenerator`] for callers that do not manage their own RNG.
pub fn generate_level(
    catalogue: &mut RoomCatalogue,
    id: &str,
    dungeon_level: u32,
    data: &model::LevelData,
    seed: u64,
) -> Result<DungeonLevel, GenerateError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    DungeonGenerator::new(dungeon_level).generate(catalogue, id, data, &mut rng)
}
