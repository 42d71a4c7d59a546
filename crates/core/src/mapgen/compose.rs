//! Tile-level compositing: the three level-wide tile grids, the tileset gid
//! registry, and the pass that stamps placed room layouts into the grids.

use std::collections::HashMap;

use log::debug;

use crate::catalogue::Room;

use super::placement::Placement;
use super::{BLOCK_SIZE, EMPTY_TILE, GID_MULTIPLE};

/// The base, decoration and overlay tile layers of a level, all sized
/// `width x height` in tiles and initialised to the empty sentinel.
pub(super) struct TileGrids {
    width: usize,
    height: usize,
    layout: Vec<i32>,
    decorations: Vec<i32>,
    overlays: Vec<i32>,
}

impl TileGrids {
    pub(super) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            layout: vec![EMPTY_TILE; width * height],
            decorations: vec![EMPTY_TILE; width * height],
            overlays: vec![EMPTY_TILE; width * height],
        }
    }

    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn height(&self) -> usize {
        self.height
    }

    pub(super) fn layout_at(&self, row: usize, column: usize) -> i32 {
        self.layout[row * self.width + column]
    }

    pub(super) fn set_layout(&mut self, row: usize, column: usize, tile: i32) {
        self.layout[row * self.width + column] = tile;
    }

    pub(super) fn set_decoration(&mut self, row: usize, column: usize, tile: i32) {
        self.decorations[row * self.width + column] = tile;
    }

    pub(super) fn set_overlay(&mut self, row: usize, column: usize, tile: i32) {
        self.overlays[row * self.width + column] = tile;
    }

    pub(super) fn layout_rows(&self) -> Vec<Vec<i32>> {
        self.rows_of(&self.layout)
    }

    pub(super) fn decoration_rows(&self) -> Vec<Vec<i32>> {
        self.rows_of(&self.decorations)
    }

    pub(super) fn overlay_rows(&self) -> Vec<Vec<i32>> {
        self.rows_of(&self.overlays)
    }

    fn rows_of(&self, tiles: &[i32]) -> Vec<Vec<i32>> {
        tiles.chunks(self.width).map(<[i32]>::to_vec).collect()
    }
}

/// First-use registration of tileset names, each granted a gid base of
/// `registration index * GID_MULTIPLE`. Repeat uses share the first base.
pub(super) struct TilesetRegistry {
    bases: HashMap<String, i32>,
    names: Vec<String>,
}

impl TilesetRegistry {
    /// Registers every tileset the rooms reference, walking rooms in order
    /// and each room's base, decoration and overlay tilesets in that order.
    pub(super) fn from_rooms(rooms: &[Room]) -> Self {
        let mut registry = Self { bases: HashMap::new(), names: Vec::new() };
        for room in rooms {
            registry.register(&room.tileset);
            if let Some(decoration_tileset) = &room.decoration_tileset {
                registry.register(decoration_tileset);
            }
            if let Some(overlay_tileset) = &room.overlay_tileset {
                registry.register(overlay_tileset);
            }
        }
        registry
    }

    fn register(&mut self, name: &str) {
        if !self.bases.contains_key(name) {
            self.bases.insert(name.to_owned(), (self.names.len() as i32) * GID_MULTIPLE);
            self.names.push(name.to_owned());
        }
    }

    pub(super) fn base(&self, name: &str) -> i32 {
        self.bases.get(name).copied().unwrap_or(0)
    }

    /// Tileset names ordered by ascending gid base.
    pub(super) fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// Stamps every placed room's tile layers into the level grids. Zero and
/// negative room tiles are transparent and leave the grid cell untouched;
/// positive tiles land shifted by their tileset's gid base.
pub(super) fn stamp_rooms(
    grids: &mut TileGrids,
    rooms: &[Room],
    placement: &Placement,
    registry: &TilesetRegistry,
) {
    for (room_index, room) in rooms.iter().enumerate() {
        let offset = placement.offsets[room_index];
        let tile_row = (offset.y as usize) * BLOCK_SIZE;
        let tile_column = (offset.x as usize) * BLOCK_SIZE;
        debug!("drawing room {} at tile {}, {}", room.name, tile_row, tile_column);

        let base = registry.base(&room.tileset);
        for (y, row) in room.layout.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if tile > 0 {
                    grids.set_layout(tile_row + y, tile_column + x, base + tile);
                }
            }
        }

        if let (Some(tileset), Some(decorations)) = (&room.decoration_tileset, &room.decorations) {
            let base = registry.base(tileset);
            for (y, row) in decorations.iter().enumerate() {
                for (x, &tile) in row.iter().enumerate() {
                    if tile > 0 {
                        grids.set_decoration(tile_row + y, tile_column + x, base + tile);
                    }
                }
            }
        }

        if let (Some(tileset), Some(overlays)) = (&room.overlay_tileset, &room.overlays) {
            let base = registry.base(tileset);
            for (y, row) in overlays.iter().enumerate() {
                for (x, &tile) in row.iter().enumerate() {
                    if tile > 0 {
                        grids.set_overlay(tile_row + y, tile_column + x, base + tile);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::placement::place_rooms;
    use super::super::test_support::block_room;
    use super::*;

    #[test]
    fn grids_start_out_empty() {
        let grids = TileGrids::new(16, 8);
        let layout = grids.layout_rows();
        assert_eq!(layout.len(), 8);
        assert!(layout.iter().all(|row| row.len() == 16));
        assert!(layout.iter().flatten().all(|&tile| tile == EMPTY_TILE));
        assert!(grids.decoration_rows().iter().flatten().all(|&tile| tile == EMPTY_TILE));
        assert!(grids.overlay_rows().iter().flatten().all(|&tile| tile == EMPTY_TILE));
    }

    #[test]
    fn tileset_bases_step_by_gid_multiple_in_first_use_order() {
        let mut first = block_room("a", 1, 1, true);
        first.tileset = "stone".to_owned();
        first.decoration_tileset = Some("stone-props".to_owned());
        let mut second = block_room("b", 1, 1, false);
        second.tileset = "ice".to_owned();
        let mut third = block_room("c", 1, 1, false);
        third.tileset = "stone".to_owned();

        let registry = TilesetRegistry::from_rooms(&[first, second, third]);
        assert_eq!(registry.base("stone"), 0);
        assert_eq!(registry.base("stone-props"), GID_MULTIPLE);
        assert_eq!(registry.base("ice"), 2 * GID_MULTIPLE);
        assert_eq!(registry.names(), vec!["stone", "stone-props", "ice"]);
    }

    #[test]
    fn stamped_rooms_shift_positive_tiles_by_their_base() {
        let mut first = block_room("a", 1, 1, true);
        first.tileset = "stone".to_owned();
        let mut second = block_room("b", 1, 1, false);
        second.tileset = "ice".to_owned();
        let rooms = vec![first, second];

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let placement = place_rooms(&mut rng, &rooms, 8, 8).expect("rooms fit");
        let registry = TilesetRegistry::from_rooms(&rooms);
        let mut grids = TileGrids::new(8 * BLOCK_SIZE, 8 * BLOCK_SIZE);
        stamp_rooms(&mut grids, &rooms, &placement, &registry);

        for (room_index, expected_base) in [(0, 0), (1, GID_MULTIPLE)] {
            let offset = placement.offsets[room_index];
            let row = (offset.y as usize) * BLOCK_SIZE;
            let column = (offset.x as usize) * BLOCK_SIZE;
            let tile = rooms[room_index].layout[0][0];
            assert!(tile > 0);
            assert_eq!(grids.layout_at(row, column), expected_base + tile);
        }
    }

    #[test]
    fn non_positive_room_tiles_leave_the_grid_untouched() {
        let mut room = block_room("holey", 1, 1, true);
        room.layout[3][3] = 0;
        room.layout[4][4] = -1;
        let rooms = vec![room];

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let placement = place_rooms(&mut rng, &rooms, 8, 8).expect("room fits");
        let registry = TilesetRegistry::from_rooms(&rooms);
        let mut grids = TileGrids::new(8 * BLOCK_SIZE, 8 * BLOCK_SIZE);
        stamp_rooms(&mut grids, &rooms, &placement, &registry);

        let offset = placement.offsets[0];
        let row = (offset.y as usize) * BLOCK_SIZE;
        let column = (offset.x as usize) * BLOCK_SIZE;
        assert_eq!(grids.layout_at(row + 3, column + 3), EMPTY_TILE);
        assert_eq!(grids.layout_at(row + 4, column + 4), EMPTY_TILE);
    }
}
