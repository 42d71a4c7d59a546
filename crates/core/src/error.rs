//! Fatal generation failures. Both placement and pathfinding exhaustion
//! signal level data that cannot fit the requested grid, not a transient
//! condition, so neither is retried beyond the bounds built into the
//! search loops.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("no room named `{0}` in the catalogue")]
    UnknownRoom(String),

    #[error(
        "failed to place {room_count} rooms on a {blocks_x}x{blocks_y} block grid \
         after {attempts} full attempts"
    )]
    PlacementExhausted { room_count: usize, blocks_x: usize, blocks_y: usize, attempts: u32 },

    #[error("no corridor route from `{source_room}` to `{target_room}`; this should not happen")]
    PathExhausted { source_room: String, target_room: String },
}
