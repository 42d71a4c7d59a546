//! Corridor pathfinding: connects every room opening into one network
//! rooted at the start room, accumulating per-block directional masks.

use std::collections::VecDeque;

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::catalogue::Room;
use crate::error::GenerateError;
use crate::types::{Opening, Pos};

use super::corridors::{direction_bit, mask_toward_room};
use super::placement::{BlockGrid, Placement};
use super::rng::index_below;

/// Block-granularity corridor usage. Each cell accumulates the mask bits of
/// every path carved through it, so crossing paths merge into junctions.
pub(super) struct CorridorGrid {
    width: usize,
    height: usize,
    masks: Vec<u8>,
}

impl CorridorGrid {
    fn new(width: usize, height: usize) -> Self {
        Self { width, height, masks: vec![0; width * height] }
    }

    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn height(&self) -> usize {
        self.height
    }

    pub(super) fn mask_at(&self, pos: Pos) -> u8 {
        self.masks[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    pub(super) fn or_mask(&mut self, pos: Pos, bits: u8) {
        self.masks[(pos.y as usize) * self.width + (pos.x as usize)] |= bits;
    }
}

/// The opening's block in absolute block coordinates, still inside the room.
fn side_block(room_offset: Pos, opening: Opening) -> Pos {
    room_offset.offset(opening.pos.y, opening.pos.x)
}

/// The block one step outside the room, where the corridor attaches.
fn entry_block(room_offset: Pos, opening: Opening) -> Pos {
    let outward = opening.direction.outward();
    side_block(room_offset, opening).offset(outward.y, outward.x)
}

/// Carves corridors until every opening is reachable from the start room's
/// first opening. Source and target openings are drawn uniformly at random
/// each round, which grows organically varied topology rather than a
/// minimum-spanning-tree shape.
pub(super) fn carve_corridors(
    rng: &mut ChaCha8Rng,
    rooms: &[Room],
    placement: &Placement,
    start_room_index: usize,
) -> Result<CorridorGrid, GenerateError> {
    let mut corridors = CorridorGrid::new(placement.occupancy.width(), placement.occupancy.height());

    let start_openings = &rooms[start_room_index].openings;
    if start_openings.is_empty() {
        return Ok(corridors);
    }

    let mut visited: Vec<(usize, Opening)> = vec![(start_room_index, start_openings[0])];
    let mut targets: Vec<(usize, Opening)> = start_openings[1..]
        .iter()
        .map(|&opening| (start_room_index, opening))
        .collect();
    for (room_index, room) in rooms.iter().enumerate() {
        if room_index == start_room_index {
            continue;
        }
        targets.extend(room.openings.iter().map(|&opening| (room_index, opening)));
    }

    // A lone opening gets a single dead-end block facing back into its room.
    if targets.is_empty() {
        let opening = start_openings[0];
        let entry = entry_block(placement.offsets[start_room_index], opening);
        corridors.or_mask(entry, mask_toward_room(opening.direction));
        return Ok(corridors);
    }

    while !targets.is_empty() {
        let (source_room, source_opening) = visited[index_below(rng, visited.len())];
        let target_index = index_below(rng, targets.len());
        let (target_room, target_opening) = targets[target_index];

        let source_offset = placement.offsets[source_room];
        let target_offset = placement.offsets[target_room];
        let path = shortest_path(
            &placement.occupancy,
            entry_block(source_offset, source_opening),
            entry_block(target_offset, target_opening),
        )
        .ok_or_else(|| GenerateError::PathExhausted {
            source_room: rooms[source_room].name.clone(),
            target_room: rooms[target_room].name.clone(),
        })?;

        debug!(
            "carved corridor from {} to {} through {} blocks",
            rooms[source_room].name,
            rooms[target_room].name,
            path.len()
        );

        // The opening-side blocks join only as mask neighbors, so the first
        // and last corridor blocks face into their rooms.
        apply_path_masks(
            &mut corridors,
            side_block(source_offset, source_opening),
            &path,
            side_block(target_offset, target_opening),
        );

        if !visited.iter().any(|&(room, opening)| room == target_room && opening == target_opening)
        {
            visited.push((target_room, target_opening));
        }
        targets.remove(target_index);
    }

    Ok(corridors)
}

/// Breadth-first search from `start` to `goal` over blocks not claimed by
/// any room. FIFO exploration keeps found paths shortest in block steps.
fn shortest_path(occupancy: &BlockGrid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let width = occupancy.width();
    let index_of = |pos: Pos| (pos.y as usize) * width + (pos.x as usize);
    let pos_of = |index: usize| Pos { y: (index / width) as i32, x: (index % width) as i32 };

    if !occupancy.in_bounds(start) || occupancy.is_used(start) {
        return None;
    }

    // Room blocks start out explored, which makes them the taboo set.
    let mut explored = occupancy.used_flags().to_vec();
    let mut parents = vec![usize::MAX; explored.len()];
    let mut frontier = VecDeque::from([start]);
    explored[index_of(start)] = true;

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            let mut path = vec![current];
            let mut cursor = index_of(current);
            while parents[cursor] != usize::MAX {
                cursor = parents[cursor];
                path.push(pos_of(cursor));
            }
            path.reverse();
            return Some(path);
        }
        for next in [
            current.offset(-1, 0),
            current.offset(1, 0),
            current.offset(0, -1),
            current.offset(0, 1),
        ] {
            if !occupancy.in_bounds(next) || explored[index_of(next)] {
                continue;
            }
            explored[index_of(next)] = true;
            parents[index_of(next)] = index_of(current);
            frontier.push_back(next);
        }
    }

    None
}

/// ORs each path block's mask with bits derived from its predecessor and
/// successor steps. Identical bits combine idempotently, so repeated
/// traversals leave the grid unchanged after the first.
fn apply_path_masks(corridors: &mut CorridorGrid, source_side: Pos, path: &[Pos], target_side: Pos) {
    for (index, &current) in path.iter().enumerate() {
        let previous = if index == 0 { source_side } else { path[index - 1] };
        let next = if index + 1 == path.len() { target_side } else { path[index + 1] };
        corridors.or_mask(current, direction_bit(current, previous) | direction_bit(current, next));
    }
}
