//! Synthesizes generic filler rooms when a level requests more rooms than
//! it names. Filler rooms reuse the corridor tile vocabulary, so they blend
//! in with the carved hallways around them.

use log::debug;
use rand_chacha::ChaCha8Rng;

use crate::catalogue::Room;
use crate::types::{Opening, OpeningDirection, Pos};

use super::rng::{index_below, range_inclusive};
use super::{BLOCK_SIZE, OPEN_FLOOR_TILE};

/// Wall band depth along the north edge: wall face plus two shadow rows.
const NORTH_WALL_ROWS: usize = 3;

/// Builds a rectangular filler room of one or two blocks per axis with one
/// or two edge openings, drawn with the given tileset.
pub(super) fn generate_room(rng: &mut ChaCha8Rng, tileset: &str, name: &str) -> Room {
    let width_blocks = range_inclusive(rng, 1, 2);
    let height_blocks = range_inclusive(rng, 1, 2);
    let mut layout = walled_layout(height_blocks * BLOCK_SIZE, width_blocks * BLOCK_SIZE);

    let opening_count = range_inclusive(rng, 1, 2);
    let mut free_edges = vec![
        OpeningDirection::Top,
        OpeningDirection::Right,
        OpeningDirection::Bottom,
        OpeningDirection::Left,
    ];
    let mut openings = Vec::with_capacity(opening_count);
    for _ in 0..opening_count {
        let direction = free_edges.remove(index_below(rng, free_edges.len()));
        let opening = edge_opening(rng, direction, width_blocks, height_blocks);
        carve_doorway(&mut layout, opening);
        openings.push(opening);
    }

    debug!(
        "synthesized filler room {name}: {width_blocks}x{height_blocks} blocks, \
         {opening_count} openings"
    );

    Room {
        name: name.to_owned(),
        tileset: tileset.to_owned(),
        decoration_tileset: None,
        overlay_tileset: None,
        layout,
        decorations: None,
        overlays: None,
        openings,
        npcs: Vec::new(),
        doors: Vec::new(),
        items: Vec::new(),
        connections: Vec::new(),
        start_room: false,
    }
}

/// A fully enclosed floor plan: wall faces on all four edges, shadow rows
/// under the north wall, open floor inside.
fn walled_layout(height: usize, width: usize) -> Vec<Vec<i32>> {
    let mut layout = vec![vec![OPEN_FLOOR_TILE; width]; height];
    for (x, tile) in layout[0].iter_mut().enumerate() {
        *tile = 8;
        if x == 0 {
            *tile = 13;
        } else if x == width - 1 {
            *tile = 12;
        }
    }
    for x in 1..width - 1 {
        layout[1][x] = 15;
        layout[2][x] = 18;
    }
    for (x, tile) in layout[height - 1].iter_mut().enumerate() {
        *tile = 2;
        if x == 0 {
            *tile = 11;
        } else if x == width - 1 {
            *tile = 10;
        }
    }
    for row in layout.iter_mut().take(height - 1).skip(1) {
        row[0] = 6;
        row[width - 1] = 4;
    }
    layout
}

/// Picks a random block along the given edge of the room footprint.
fn edge_opening(
    rng: &mut ChaCha8Rng,
    direction: OpeningDirection,
    width_blocks: usize,
    height_blocks: usize,
) -> Opening {
    let column = index_below(rng, width_blocks) as i32;
    let row = index_below(rng, height_blocks) as i32;
    let pos = match direction {
        OpeningDirection::Top => Pos { y: 0, x: column },
        OpeningDirection::Bottom => Pos { y: height_blocks as i32 - 1, x: column },
        OpeningDirection::Left => Pos { y: row, x: 0 },
        OpeningDirection::Right => Pos { y: row, x: width_blocks as i32 - 1 },
    };
    Opening { pos, direction }
}

/// Opens the wall band in front of an opening so the room floor meets the
/// corridor that will attach outside. The doorway is two tiles wide,
/// centered in the opening's block.
fn carve_doorway(layout: &mut [Vec<i32>], opening: Opening) {
    let height = layout.len();
    let width = layout[0].len();
    let block_y = opening.pos.y as usize * BLOCK_SIZE;
    let block_x = opening.pos.x as usize * BLOCK_SIZE;
    let mid = BLOCK_SIZE / 2;

    match opening.direction {
        OpeningDirection::Top => {
            for y in 0..NORTH_WALL_ROWS {
                for x in [block_x + mid - 1, block_x + mid] {
                    layout[y][x] = OPEN_FLOOR_TILE;
                }
            }
        }
        OpeningDirection::Bottom => {
            for x in [block_x + mid - 1, block_x + mid] {
                layout[height - 1][x] = OPEN_FLOOR_TILE;
            }
        }
        OpeningDirection::Left => {
            for y in [block_y + mid - 1, block_y + mid] {
                layout[y][0] = OPEN_FLOOR_TILE;
            }
        }
        OpeningDirection::Right => {
            for y in [block_y + mid - 1, block_y + mid] {
                layout[y][width - 1] = OPEN_FLOOR_TILE;
            }
        }
    }
}
