//! The pipeline driver: resolves and synthesizes rooms, runs placement,
//! carving and compositing, and assembles the final level descriptor.

use log::info;
use rand_chacha::ChaCha8Rng;

use crate::catalogue::{tileset_for_style, Room, RoomCatalogue};
use crate::error::GenerateError;

use super::compose::{stamp_rooms, TileGrids, TilesetRegistry};
use super::corridors::stamp_corridors;
use super::model::{DungeonLevel, LevelData};
use super::paths::carve_corridors;
use super::placement::place_rooms;
use super::{assembly, filler, BLOCK_SIZE};

/// Generates dungeon levels at a fixed depth. Construct one per level; all
/// remaining state lives on the stack of [`DungeonGenerator::generate`].
pub struct DungeonGenerator {
    dungeon_level: u32,
}

impl DungeonGenerator {
    pub fn new(dungeon_level: u32) -> Self {
        Self { dungeon_level }
    }

    /// Runs the full pipeline for one level request. Rooms named by the
    /// request are resolved from the catalogue; the gap up to the requested
    /// room count is filled with synthesized rooms, which are registered in
    /// the catalogue so later levels can reference them.
    pub fn generate(
        &self,
        catalogue: &mut RoomCatalogue,
        id: &str,
        data: &LevelData,
        rng: &mut ChaCha8Rng,
    ) -> Result<DungeonLevel, GenerateError> {
        let rooms = self.resolve_rooms(catalogue, data, rng)?;
        let start_room_index = rooms.iter().position(|room| room.start_room).unwrap_or(0);

        let registry = TilesetRegistry::from_rooms(&rooms);
        let placement = place_rooms(rng, &rooms, data.width, data.height)?;

        let mut budget = data.enemy_budget;
        let mut npcs = assembly::convert_npcs(&rooms, &placement, &mut budget);

        let corridors = carve_corridors(rng, &rooms, &placement, start_room_index)?;

        let mut grids = TileGrids::new(data.width * BLOCK_SIZE, data.height * BLOCK_SIZE);
        stamp_rooms(&mut grids, &rooms, &placement, &registry);
        stamp_corridors(&mut grids, &corridors);

        npcs.extend(assembly::filler_enemies(rng, &grids, &mut budget));

        let (start_position_x, start_position_y) =
            assembly::start_position(&rooms[start_room_index], placement.offsets[start_room_index]);

        info!(
            "generated level {id}: {} rooms on {}x{} blocks, {} npcs",
            rooms.len(),
            data.width,
            data.height,
            npcs.len()
        );

        Ok(DungeonLevel {
            id: id.to_owned(),
            start_position_x,
            start_position_y,
            rooms: assembly::placed_rooms(&rooms, &placement),
            tilesets: registry.names(),
            layout: grids.layout_rows(),
            decoration_layout: grids.decoration_rows(),
            overlay_layout: grids.overlay_rows(),
            npcs,
            connections: assembly::collect_connections(&rooms, &placement, self.dungeon_level),
            doors: assembly::collect_doors(&rooms, &placement, id),
            items: assembly::collect_items(&rooms, &placement),
            enemy_level: self.dungeon_level,
        })
    }

    /// The level's room list: named rooms looked up in the catalogue, then
    /// synthesized filler rooms until the requested count is reached.
    fn resolve_rooms(
        &self,
        catalogue: &mut RoomCatalogue,
        data: &LevelData,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<Room>, GenerateError> {
        let mut rooms = data
            .rooms
            .iter()
            .map(|name| {
                catalogue
                    .get(name)
                    .cloned()
                    .ok_or_else(|| GenerateError::UnknownRoom(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let filler_tileset = tileset_for_style(&data.style);
        let mut filler_index = 0;
        while rooms.len() < data.number_of_rooms {
            let mut name = format!("filler-{filler_index}");
            while catalogue.contains(&name) {
                filler_index += 1;
                name = format!("filler-{filler_index}");
            }
            let room = filler::generate_room(rng, filler_tileset, &name);
            catalogue.put(room.clone());
            rooms.push(room);
        }

        Ok(rooms)
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::super::test_support::{block_room, small_level_data};
    use super::super::{EMPTY_TILE, TILE_HEIGHT, TILE_WIDTH};
    use super::*;

    #[test]
    fn unknown_room_names_fail_fast() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(block_room("hall", 2, 1, true));
        let mut data = small_level_data();
        data.rooms = vec!["hall".to_owned(), "missing".to_owned()];

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = DungeonGenerator::new(1).generate(&mut catalogue, "level-1", &data, &mut rng);
        assert_eq!(result, Err(GenerateError::UnknownRoom("missing".to_owned())));
    }

    #[test]
    fn filler_rooms_top_up_the_requested_count_and_join_the_catalogue() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(block_room("hall", 1, 1, true));
        let mut data = small_level_data();
        data.rooms = vec!["hall".to_owned()];
        data.number_of_rooms = 3;
        data.width = 14;
        data.height = 14;

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let level = DungeonGenerator::new(1)
            .generate(&mut catalogue, "level-1", &data, &mut rng)
            .expect("generation");

        assert_eq!(level.rooms.len(), 3);
        assert_eq!(level.rooms[1].room_name, "filler-0");
        assert_eq!(level.rooms[2].room_name, "filler-1");
        assert!(catalogue.contains("filler-0"));
        assert!(catalogue.contains("filler-1"));
        assert_eq!(
            catalogue.get("filler-0").map(|room| room.tileset.as_str()),
            Some(tileset_for_style(&data.style))
        );
    }

    #[test]
    fn filler_names_skip_entries_already_in_the_catalogue() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(block_room("hall", 1, 1, true));
        catalogue.put(block_room("filler-0", 1, 1, false));
        let mut data = small_level_data();
        data.rooms = vec!["hall".to_owned()];
        data.number_of_rooms = 2;

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let level = DungeonGenerator::new(1)
            .generate(&mut catalogue, "level-1", &data, &mut rng)
            .expect("generation");

        assert_eq!(level.rooms[1].room_name, "filler-1");
    }

    #[test]
    fn start_room_defaults_to_the_first_room() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(block_room("first", 1, 1, false));
        catalogue.put(block_room("second", 1, 1, false));
        let mut data = small_level_data();
        data.rooms = vec!["first".to_owned(), "second".to_owned()];

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let level = DungeonGenerator::new(1)
            .generate(&mut catalogue, "level-1", &data, &mut rng)
            .expect("generation");

        let first = &level.rooms[0];
        let center_x = first.x * TILE_WIDTH + (first.width as i32 * TILE_WIDTH) / 2;
        let center_y = first.y * TILE_HEIGHT + (first.height as i32 * TILE_HEIGHT) / 2;
        assert_eq!((level.start_position_x, level.start_position_y), (center_x, center_y));
    }

    #[test]
    fn level_grids_cover_the_requested_block_area() {
        let mut catalogue = RoomCatalogue::new();
        catalogue.put(block_room("hall", 2, 1, true));
        catalogue.put(block_room("cell", 1, 1, false));
        let data = small_level_data();

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let level = DungeonGenerator::new(2)
            .generate(&mut catalogue, "level-2", &data, &mut rng)
            .expect("generation");

        assert_eq!(level.layout.len(), data.height * BLOCK_SIZE);
        assert!(level.layout.iter().all(|row| row.len() == data.width * BLOCK_SIZE));
        assert_eq!(level.decoration_layout.len(), level.layout.len());
        assert_eq!(level.overlay_layout.len(), level.layout.len());
        assert!(level.layout.iter().flatten().any(|&tile| tile != EMPTY_TILE));
        assert_eq!(level.enemy_level, 2);
    }
}
