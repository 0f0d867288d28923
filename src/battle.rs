use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{MapPartKind, MissionType, Vec3};

/// One tile instance on the battlefield. The initial position is fixed at
/// generation; the current position belongs to the simulation afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapPart {
    pub id: usize,
    pub kind: MapPartKind,
    pub tile: String,
    initial_position: Vec3,
    pub current_position: Vec3,
}

impl MapPart {
    pub fn new(id: usize, kind: MapPartKind, tile: String, position: Vec3) -> Self {
        Self {
            id,
            kind,
            tile,
            initial_position: position,
            current_position: position,
        }
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedSector {
    pub sector_id: String,
    pub origin: Vec3,
    pub size: Vec3,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedMap {
    pub map_id: String,
    /// Size in voxels.
    pub size: Vec3,
    pub size_in_chunks: Vec3,
    pub chunk_size: Vec3,
    /// Which candidate produced the map, 1-based.
    pub attempt: usize,
    pub mission_type: MissionType,
    pub mission_location_id: String,
    pub player_craft: Option<String>,
    pub destroyed_ground_tile: Option<String>,
    pub rubble_left_wall: Vec<String>,
    pub rubble_right_wall: Vec<String>,
    pub rubble_scenery: Vec<String>,
    pub sectors: Vec<PlacedSector>,
    pub parts: Vec<MapPart>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MapSummary {
    #[serde(rename = "mapId")]
    pub map_id: String,
    pub size: Vec3,
    #[serde(rename = "sizeInChunks")]
    pub size_in_chunks: Vec3,
    pub attempt: usize,
    #[serde(rename = "missionType")]
    pub mission_type: MissionType,
    #[serde(rename = "sectorCounts")]
    pub sector_counts: BTreeMap<String, u32>,
    #[serde(rename = "partCounts")]
    pub part_counts: BTreeMap<MapPartKind, usize>,
    #[serde(rename = "totalParts")]
    pub total_parts: usize,
}

impl GeneratedMap {
    pub fn placement_counts(&self) -> BTreeMap<String, u32> {
        let mut out = BTreeMap::new();
        for placed in &self.sectors {
            *out.entry(placed.sector_id.clone()).or_insert(0) += 1;
        }
        out
    }

    pub fn summary(&self) -> MapSummary {
        let mut part_counts = BTreeMap::new();
        for part in &self.parts {
            *part_counts.entry(part.kind).or_insert(0) += 1;
        }
        MapSummary {
            map_id: self.map_id.clone(),
            size: self.size,
            size_in_chunks: self.size_in_chunks,
            attempt: self.attempt,
            mission_type: self.mission_type,
            sector_counts: self.placement_counts(),
            part_counts,
            total_parts: self.parts.len(),
        }
    }
}
