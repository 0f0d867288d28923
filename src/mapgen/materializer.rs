use super::grid::VolumeGrid;
use super::MissionRequest;
use crate::battle::{GeneratedMap, MapPart, PlacedSector};
use crate::catalog::BattleMapDef;
use crate::content::{ContentSource, TileLibrary};
use crate::types::MapPartKind;

pub fn materialize<S: ContentSource>(
    def: &BattleMapDef,
    grid: &VolumeGrid,
    attempt: usize,
    mission: &MissionRequest,
    library: &mut TileLibrary<S>,
) -> GeneratedMap {
    let mut sectors = Vec::new();
    let mut parts = Vec::new();

    for (origin, slot) in grid.occupied() {
        let spec = &def.sectors[slot.sector];
        sectors.push(PlacedSector {
            sector_id: spec.id.clone(),
            origin,
            size: slot.size,
        });

        let tiles = library.sector_tiles(spec);
        let shift = origin * def.chunk_size;
        for kind in MapPartKind::ALL {
            for placement in tiles.of_kind(kind) {
                parts.push(MapPart::new(
                    parts.len(),
                    kind,
                    placement.tile.clone(),
                    placement.position + shift,
                ));
            }
        }
    }

    GeneratedMap {
        map_id: def.id.clone(),
        size: grid.size() * def.chunk_size,
        size_in_chunks: grid.size(),
        chunk_size: def.chunk_size,
        attempt,
        mission_type: mission.mission_type,
        mission_location_id: mission.location_id.clone(),
        player_craft: mission.craft.clone(),
        destroyed_ground_tile: def.destroyed_ground_tile.clone(),
        rubble_left_wall: def.rubble_left_wall.clone(),
        rubble_right_wall: def.rubble_right_wall.clone(),
        rubble_scenery: def.rubble_scenery.clone(),
        sectors,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::super::grid::Slot;
    use super::*;
    use crate::catalog::SectorSpec;
    use crate::content::{MemoryContentSource, SectorTiles, TilePlacement};
    use crate::types::{MissionType, Vec3};

    fn placement(x: i32, y: i32, z: i32, tile: &str) -> TilePlacement {
        TilePlacement {
            position: Vec3::new(x, y, z),
            tile: tile.to_string(),
        }
    }

    fn def() -> BattleMapDef {
        BattleMapDef {
            id: "TEST".to_string(),
            max_battle_size: Vec3::new(2, 1, 1),
            chunk_size: Vec3::new(10, 10, 4),
            tilesets: Vec::new(),
            destroyed_ground_tile: Some("DESTROYED".to_string()),
            rubble_left_wall: vec!["RUBBLE_L".to_string()],
            rubble_right_wall: vec!["RUBBLE_R".to_string()],
            rubble_scenery: vec!["RUBBLE_S".to_string()],
            sectors: vec![
                SectorSpec {
                    id: "ROOM".to_string(),
                    size: Vec3::ONE,
                    occurrence_min: 0,
                    occurrence_max: 2,
                    tiles: "ROOM_TILES".to_string(),
                },
                SectorSpec {
                    id: "EMPTY".to_string(),
                    size: Vec3::ONE,
                    occurrence_min: 0,
                    occurrence_max: 2,
                    tiles: "MISSING".to_string(),
                },
            ],
        }
    }

    fn mission() -> MissionRequest {
        MissionRequest {
            mission_type: MissionType::UfoRecovery,
            location_id: "UFO_1".to_string(),
            craft: Some("SKYRANGER".to_string()),
        }
    }

    fn room_tiles() -> SectorTiles {
        SectorTiles {
            grounds: vec![placement(0, 0, 0, "FLOOR"), placement(1, 0, 0, "FLOOR")],
            left_walls: vec![placement(0, 0, 0, "WALL_L")],
            right_walls: vec![placement(0, 0, 0, "WALL_R")],
            scenery: vec![placement(1, 0, 0, "CHAIR")],
        }
    }

    #[test]
    fn tiles_are_shifted_by_sector_origin_in_voxels() {
        let def = def();
        let mut grid = VolumeGrid::new(Vec3::new(2, 1, 1));
        grid.set(Vec3::new(0, 0, 0), Slot { sector: 0, size: Vec3::ONE });
        grid.set(Vec3::new(1, 0, 0), Slot { sector: 0, size: Vec3::ONE });
        let mut library =
            TileLibrary::new(MemoryContentSource::default().with_sector("ROOM_TILES", room_tiles()));

        let map = materialize(&def, &grid, 2, &mission(), &mut library);

        assert_eq!(map.size, Vec3::new(20, 10, 4));
        assert_eq!(map.parts.len(), 10);
        assert_eq!(library.source().sector_load_count("ROOM_TILES"), 1);
        let shifted: Vec<_> = map.parts[5..].iter().map(|p| p.initial_position()).collect();
        assert_eq!(shifted[0], Vec3::new(10, 0, 0));
        assert_eq!(shifted[1], Vec3::new(11, 0, 0));
        assert!(map.parts.iter().all(|p| p.current_position == p.initial_position()));
        let ids: std::collections::HashSet<usize> = map.parts.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), map.parts.len());
    }

    #[test]
    fn metadata_and_cosmetics_are_copied_through() {
        let def = def();
        let mut grid = VolumeGrid::new(Vec3::new(2, 1, 1));
        grid.set(Vec3::new(0, 0, 0), Slot { sector: 1, size: Vec3::ONE });
        grid.set(Vec3::new(1, 0, 0), Slot { sector: 1, size: Vec3::ONE });
        let mut library = TileLibrary::new(MemoryContentSource::default());

        let map = materialize(&def, &grid, 5, &mission(), &mut library);

        assert!(map.parts.is_empty());
        assert_eq!(map.attempt, 5);
        assert_eq!(map.mission_type, MissionType::UfoRecovery);
        assert_eq!(map.mission_location_id, "UFO_1");
        assert_eq!(map.player_craft.as_deref(), Some("SKYRANGER"));
        assert_eq!(map.destroyed_ground_tile.as_deref(), Some("DESTROYED"));
        assert_eq!(map.rubble_scenery, vec!["RUBBLE_S".to_string()]);
        assert_eq!(map.placement_counts().get("EMPTY"), Some(&2));
        assert_eq!(library.source().sector_load_count("MISSING"), 1);
    }
}
