//! Corridor tile synthesis. Each corridor block carries a 4-bit mask of the
//! edges it opens toward; this module maps every non-empty mask to an 8x8
//! tile pattern and stamps the patterns into the level layout.

use crate::types::{OpeningDirection, Pos};

use super::compose::TileGrids;
use super::paths::CorridorGrid;
use super::BLOCK_SIZE;

pub(super) const BIT_NORTH: u8 = 1;
pub(super) const BIT_EAST: u8 = 2;
pub(super) const BIT_SOUTH: u8 = 4;
pub(super) const BIT_WEST: u8 = 8;

pub(super) type BlockPattern = [[i32; BLOCK_SIZE]; BLOCK_SIZE];

// Tile vocabulary used by the patterns: 32 open floor, 8/2/6/4 north, south,
// west and east walls, 13/12/11/10 outer corners, 9/7/3/1 inner corners,
// 15/18 wall shadow rows, 22/25/39 torch column details, 14/16/17/19 shaded
// inner corner details.

const STUB_NORTH: BlockPattern = [
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [11, 2, 2, 2, 2, 2, 2, 10],
];

const STUB_EAST: BlockPattern = [
    [13, 8, 8, 8, 8, 8, 8, 8],
    [6, 15, 22, 15, 15, 15, 22, 15],
    [6, 18, 25, 18, 18, 18, 25, 18],
    [6, 32, 39, 32, 32, 32, 39, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [11, 2, 2, 2, 2, 2, 2, 2],
];

const STUB_SOUTH: BlockPattern = [
    [13, 8, 8, 8, 8, 8, 8, 12],
    [6, 15, 22, 15, 15, 22, 15, 4],
    [6, 18, 25, 18, 18, 25, 18, 4],
    [6, 32, 39, 32, 32, 39, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
];

const STUB_WEST: BlockPattern = [
    [8, 8, 8, 8, 8, 8, 8, 12],
    [15, 15, 22, 15, 15, 15, 22, 4],
    [18, 18, 25, 18, 18, 18, 25, 4],
    [32, 32, 39, 32, 32, 32, 39, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [2, 2, 2, 2, 2, 2, 2, 10],
];

const STRAIGHT_VERTICAL: BlockPattern = [
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
    [6, 32, 32, 32, 32, 32, 32, 4],
];

const STRAIGHT_HORIZONTAL: BlockPattern = [
    [8, 8, 8, 8, 8, 8, 8, 8],
    [15, 15, 22, 15, 15, 15, 22, 15],
    [18, 18, 25, 18, 18, 18, 25, 18],
    [32, 32, 39, 32, 32, 32, 39, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

const ELBOW_NORTH_EAST: BlockPattern = [
    [6, 32, 32, 32, 32, 32, 32, 7],
    [6, 32, 32, 32, 32, 32, 32, 14],
    [6, 32, 32, 32, 32, 32, 32, 17],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [11, 2, 2, 2, 2, 2, 2, 2],
];

const ELBOW_NORTH_WEST: BlockPattern = [
    [9, 32, 32, 32, 32, 32, 32, 4],
    [16, 32, 32, 32, 32, 32, 32, 4],
    [19, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [2, 2, 2, 2, 2, 2, 2, 10],
];

const ELBOW_SOUTH_EAST: BlockPattern = [
    [13, 8, 8, 8, 8, 8, 8, 8],
    [6, 15, 15, 15, 15, 22, 15, 15],
    [6, 18, 18, 18, 18, 25, 18, 18],
    [6, 32, 32, 32, 32, 39, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 1],
];

const ELBOW_SOUTH_WEST: BlockPattern = [
    [8, 8, 8, 8, 8, 8, 8, 12],
    [15, 15, 22, 15, 15, 15, 15, 4],
    [18, 18, 25, 18, 18, 18, 18, 4],
    [32, 32, 39, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [3, 32, 32, 32, 32, 32, 32, 4],
];

const TEE_NORTH_EAST_SOUTH: BlockPattern = [
    [6, 32, 32, 32, 32, 32, 32, 7],
    [6, 32, 32, 32, 32, 32, 32, 14],
    [6, 32, 32, 32, 32, 32, 32, 17],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 32],
    [6, 32, 32, 32, 32, 32, 32, 1],
];

const TEE_NORTH_SOUTH_WEST: BlockPattern = [
    [9, 32, 32, 32, 32, 32, 32, 4],
    [16, 32, 32, 32, 32, 32, 32, 4],
    [19, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [32, 32, 32, 32, 32, 32, 32, 4],
    [3, 32, 32, 32, 32, 32, 32, 4],
];

const TEE_NORTH_EAST_WEST: BlockPattern = [
    [9, 32, 32, 32, 32, 32, 32, 7],
    [16, 32, 32, 32, 32, 32, 32, 14],
    [19, 32, 32, 32, 32, 32, 32, 17],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

const TEE_EAST_SOUTH_WEST: BlockPattern = [
    [8, 8, 8, 8, 8, 8, 8, 8],
    [15, 15, 22, 15, 15, 15, 22, 15],
    [18, 18, 25, 18, 18, 18, 25, 18],
    [32, 32, 39, 32, 32, 32, 39, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [3, 32, 32, 32, 32, 32, 32, 1],
];

const CROSS: BlockPattern = [
    [9, 32, 32, 32, 32, 32, 32, 7],
    [16, 32, 32, 32, 32, 32, 32, 14],
    [19, 32, 32, 32, 32, 32, 32, 17],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [32, 32, 32, 32, 32, 32, 32, 32],
    [3, 32, 32, 32, 32, 32, 32, 1],
];

/// Mask bit pointing from `from` toward the four-adjacent block `toward`.
pub(super) fn direction_bit(from: Pos, toward: Pos) -> u8 {
    if toward.y < from.y {
        BIT_NORTH
    } else if toward.y > from.y {
        BIT_SOUTH
    } else if toward.x > from.x {
        BIT_EAST
    } else if toward.x < from.x {
        BIT_WEST
    } else {
        0
    }
}

/// Mask for a dead-end block sitting outside an opening: it opens back
/// toward the room it was carved for.
pub(super) fn mask_toward_room(direction: OpeningDirection) -> u8 {
    match direction {
        OpeningDirection::Top => BIT_SOUTH,
        OpeningDirection::Right => BIT_WEST,
        OpeningDirection::Bottom => BIT_NORTH,
        OpeningDirection::Left => BIT_EAST,
    }
}

/// The tile pattern rendering a corridor block with the given open edges.
/// Only the empty mask has no pattern.
pub(super) fn pattern_for(mask: u8) -> Option<&'static BlockPattern> {
    match mask {
        m if m == BIT_NORTH => Some(&STUB_NORTH),
        m if m == BIT_EAST => Some(&STUB_EAST),
        m if m == BIT_SOUTH => Some(&STUB_SOUTH),
        m if m == BIT_WEST => Some(&STUB_WEST),
        m if m == BIT_NORTH | BIT_SOUTH => Some(&STRAIGHT_VERTICAL),
        m if m == BIT_EAST | BIT_WEST => Some(&STRAIGHT_HORIZONTAL),
        m if m == BIT_NORTH | BIT_EAST => Some(&ELBOW_NORTH_EAST),
        m if m == BIT_NORTH | BIT_WEST => Some(&ELBOW_NORTH_WEST),
        m if m == BIT_SOUTH | BIT_EAST => Some(&ELBOW_SOUTH_EAST),
        m if m == BIT_SOUTH | BIT_WEST => Some(&ELBOW_SOUTH_WEST),
        m if m == BIT_NORTH | BIT_EAST | BIT_SOUTH => Some(&TEE_NORTH_EAST_SOUTH),
        m if m == BIT_NORTH | BIT_SOUTH | BIT_WEST => Some(&TEE_NORTH_SOUTH_WEST),
        m if m == BIT_NORTH | BIT_EAST | BIT_WEST => Some(&TEE_NORTH_EAST_WEST),
        m if m == BIT_EAST | BIT_SOUTH | BIT_WEST => Some(&TEE_EAST_SOUTH_WEST),
        m if m == BIT_NORTH | BIT_EAST | BIT_SOUTH | BIT_WEST => Some(&CROSS),
        _ => None,
    }
}

/// Writes corridor patterns into the base layout. Corridor tiles carry their
/// raw ids; only room tiles get tileset gid offsets.
pub(super) fn stamp_corridors(grids: &mut TileGrids, corridors: &CorridorGrid) {
    for block_y in 0..corridors.height() {
        for block_x in 0..corridors.width() {
            let mask = corridors.mask_at(Pos { y: block_y as i32, x: block_x as i32 });
            let Some(pattern) = pattern_for(mask) else {
                continue;
            };
            for (row, tiles) in pattern.iter().enumerate() {
                for (column, &tile) in tiles.iter().enumerate() {
                    grids.set_layout(
                        block_y * BLOCK_SIZE + row,
                        block_x * BLOCK_SIZE + column,
                        tile,
                    );
                }
            }
        }
    }
}
