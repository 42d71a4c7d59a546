//! Randomized retry search for non-overlapping, grid-aligned room positions.

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::catalogue::Room;
use crate::error::GenerateError;
use crate::types::Pos;

use super::rng::index_below;
use super::{BLOCK_SIZE, MAX_GENERATION_RESETS, MAX_ROOM_PLACEMENT_TRIES};

/// Block-granularity occupancy of placed room footprints.
#[derive(Debug)]
pub(super) struct BlockGrid {
    width: usize,
    height: usize,
    used: Vec<bool>,
}

impl BlockGrid {
    fn new(width: usize, height: usize) -> Self {
        Self { width, height, used: vec![false; width * height] }
    }

    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn height(&self) -> usize {
        self.height
    }

    pub(super) fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub(super) fn is_used(&self, pos: Pos) -> bool {
        debug_assert!(self.in_bounds(pos));
        self.used[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    fn mark(&mut self, pos: Pos) {
        debug_assert!(self.in_bounds(pos));
        self.used[(pos.y as usize) * self.width + (pos.x as usize)] = true;
    }

    /// Snapshot of the occupancy flags, used to seed search taboo sets.
    pub(super) fn used_flags(&self) -> &[bool] {
        &self.used
    }
}

/// A successful placement: per-room block offsets, index-aligned with the
/// room list, plus the occupancy grid they produced.
#[derive(Debug)]
pub(super) struct Placement {
    pub(super) offsets: Vec<Pos>,
    pub(super) occupancy: BlockGrid,
}

/// Footprint of a room in blocks as (height, width).
pub(super) fn footprint_blocks(room: &Room) -> (usize, usize) {
    let (tile_height, tile_width) = room.tile_size();
    (tile_height.div_ceil(BLOCK_SIZE), tile_width.div_ceil(BLOCK_SIZE))
}

/// Finds a spot for every room such that no two footprints, each expanded
/// by a one-block halo, overlap. Whole-attempt restart instead of
/// backtracking: room counts are small and grids generous, so a fresh
/// random attempt is cheaper than being clever.
pub(super) fn place_rooms(
    rng: &mut ChaCha8Rng,
    rooms: &[Room],
    blocks_x: usize,
    blocks_y: usize,
) -> Result<Placement, GenerateError> {
    for attempt in 0..MAX_GENERATION_RESETS {
        debug!("room placement attempt {} of {}", attempt + 1, MAX_GENERATION_RESETS);
        if let Some(placement) = try_place_all(rng, rooms, blocks_x, blocks_y) {
            return Ok(placement);
        }
    }
    Err(GenerateError::PlacementExhausted {
        room_count: rooms.len(),
        blocks_x,
        blocks_y,
        attempts: MAX_GENERATION_RESETS,
    })
}

fn try_place_all(
    rng: &mut ChaCha8Rng,
    rooms: &[Room],
    blocks_x: usize,
    blocks_y: usize,
) -> Option<Placement> {
    let mut occupancy = BlockGrid::new(blocks_x, blocks_y);
    let mut offsets = Vec::with_capacity(rooms.len());

    for room in rooms {
        let (height, width) = footprint_blocks(room);
        // Offsets keep one block clear of the grid border so the halo check
        // below never leaves the grid. A room spanning the whole interior
        // has exactly one valid offset, 1.
        let span_x = blocks_x.checked_sub(width + 2)?;
        let span_y = blocks_y.checked_sub(height + 2)?;

        let mut tries = 0_u32;
        let offset = loop {
            let candidate = Pos {
                y: (1 + index_below(rng, span_y.max(1))) as i32,
                x: (1 + index_below(rng, span_x.max(1))) as i32,
            };
            if fits_with_halo(&occupancy, candidate, height, width) {
                break candidate;
            }
            tries += 1;
            if tries > MAX_ROOM_PLACEMENT_TRIES {
                return None;
            }
        };

        for y in 0..height {
            for x in 0..width {
                occupancy.mark(offset.offset(y as i32, x as i32));
            }
        }
        debug!("placed room {} at block ({}, {})", room.name, offset.y, offset.x);
        offsets.push(offset);
    }

    Some(Placement { offsets, occupancy })
}

fn fits_with_halo(occupancy: &BlockGrid, offset: Pos, height: usize, width: usize) -> bool {
    for y in -1..=(height as i32) {
        for x in -1..=(width as i32) {
            if occupancy.is_used(offset.offset(y, x)) {
                return false;
            }
        }
    }
    true
}
