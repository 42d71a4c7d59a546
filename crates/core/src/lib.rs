pub mod catalogue;
pub mod error;
pub mod mapgen;
pub mod types;

pub use catalogue::{tileset_for_style, Room, RoomCatalogue};
pub use error::GenerateError;
pub use mapgen::{enemy_budget_cost, generate_level, DungeonGenerator, DungeonLevel};
pub use types::*;
