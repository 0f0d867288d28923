use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::error::ContentError;
use crate::types::Vec3;

/// One prefabricated building block. Sizes are in chunks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorSpec {
    pub id: String,
    pub size: Vec3,
    #[serde(default)]
    pub occurrence_min: u32,
    #[serde(default = "default_occurrence_max")]
    pub occurrence_max: u32,
    /// Name of the sector tile content, resolved through a `ContentSource`.
    pub tiles: String,
}

fn default_occurrence_max() -> u32 {
    1
}

fn default_chunk_size() -> Vec3 {
    DEFAULT_CHUNK_SIZE
}

impl SectorSpec {
    pub fn is_mandatory(&self) -> bool {
        self.occurrence_min > 0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleMapDef {
    pub id: String,
    pub max_battle_size: Vec3,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: Vec3,
    #[serde(default)]
    pub tilesets: Vec<String>,
    #[serde(default)]
    pub destroyed_ground_tile: Option<String>,
    #[serde(default)]
    pub rubble_left_wall: Vec<String>,
    #[serde(default)]
    pub rubble_right_wall: Vec<String>,
    #[serde(default)]
    pub rubble_scenery: Vec<String>,
    pub sectors: Vec<SectorSpec>,
}

impl BattleMapDef {
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut def: BattleMapDef =
            serde_json::from_str(&text).map_err(|source| ContentError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        def.validate()?;
        def.normalize();
        Ok(def)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        let sizes = [
            (format!("map {}", self.id), self.max_battle_size),
            (format!("chunk size of map {}", self.id), self.chunk_size),
        ];
        let sector_sizes = self
            .sectors
            .iter()
            .map(|s| (format!("sector \"{}\" of map {}", s.id, self.id), s.size));
        for (owner, size) in sizes.into_iter().chain(sector_sizes) {
            if !size.is_positive() {
                return Err(ContentError::InvalidSize { owner, size });
            }
        }
        Ok(())
    }

    /// Repairs occurrence bounds that cannot be satisfied as written.
    pub fn normalize(&mut self) {
        for sector in &mut self.sectors {
            if sector.occurrence_max < sector.occurrence_min {
                warn!(
                    "Sector \"{}\" of map {} has occurrence_max {} below occurrence_min {}, raising max",
                    sector.id, self.id, sector.occurrence_max, sector.occurrence_min
                );
                sector.occurrence_max = sector.occurrence_min;
            }
        }
    }
}
