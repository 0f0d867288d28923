use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::catalog::SectorSpec;
use crate::error::ContentError;
use crate::types::{MapPartKind, Vec3};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    pub id: String,
    pub kind: MapPartKind,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tileset {
    pub tiles: Vec<TileType>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub position: Vec3,
    pub tile: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorTiles {
    #[serde(default)]
    pub grounds: Vec<TilePlacement>,
    #[serde(default)]
    pub left_walls: Vec<TilePlacement>,
    #[serde(default)]
    pub right_walls: Vec<TilePlacement>,
    #[serde(default)]
    pub scenery: Vec<TilePlacement>,
}

impl SectorTiles {
    pub fn of_kind(&self, kind: MapPartKind) -> &[TilePlacement] {
        match kind {
            MapPartKind::Ground => &self.grounds,
            MapPartKind::LeftWall => &self.left_walls,
            MapPartKind::RightWall => &self.right_walls,
            MapPartKind::Scenery => &self.scenery,
        }
    }

    pub fn len(&self) -> usize {
        MapPartKind::ALL.iter().map(|k| self.of_kind(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where tilesets and sector tiles come from. Implementations do the I/O;
/// caching lives in `TileLibrary`.
pub trait ContentSource {
    fn load_tileset(&mut self, name: &str) -> Result<Tileset, ContentError>;
    fn load_sector(&mut self, name: &str) -> Result<SectorTiles, ContentError>;
}

/// Reads `<root>/tilesets/<name>.json` and `<root>/sectors/<name>.json`.
#[derive(Clone, Debug)]
pub struct JsonContentSource {
    root: PathBuf,
}

impl JsonContentSource {
    pub const TILESET_DIR: &'static str = "tilesets";
    pub const SECTOR_DIR: &'static str = "sectors";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, dir: &str, name: &str) -> PathBuf {
        self.root.join(dir).join(format!("{name}.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl ContentSource for JsonContentSource {
    fn load_tileset(&mut self, name: &str) -> Result<Tileset, ContentError> {
        read_json(&self.path_of(Self::TILESET_DIR, name))
    }

    fn load_sector(&mut self, name: &str) -> Result<SectorTiles, ContentError> {
        read_json(&self.path_of(Self::SECTOR_DIR, name))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryContentSource {
    pub tilesets: HashMap<String, Tileset>,
    pub sectors: HashMap<String, SectorTiles>,
    pub tileset_loads: HashMap<String, usize>,
    pub sector_loads: HashMap<String, usize>,
}

impl MemoryContentSource {
    pub fn with_tileset(mut self, name: &str, tileset: Tileset) -> Self {
        self.tilesets.insert(name.to_string(), tileset);
        self
    }

    pub fn with_sector(mut self, name: &str, tiles: SectorTiles) -> Self {
        self.sectors.insert(name.to_string(), tiles);
        self
    }

    pub fn sector_load_count(&self, name: &str) -> usize {
        self.sector_loads.get(name).copied().unwrap_or(0)
    }
}

impl ContentSource for MemoryContentSource {
    fn load_tileset(&mut self, name: &str) -> Result<Tileset, ContentError> {
        *self.tileset_loads.entry(name.to_string()).or_insert(0) += 1;
        self.tilesets
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(name.to_string()))
    }

    fn load_sector(&mut self, name: &str) -> Result<SectorTiles, ContentError> {
        *self.sector_loads.entry(name.to_string()).or_insert(0) += 1;
        self.sectors
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(name.to_string()))
    }
}

pub struct TileLibrary<S> {
    source: S,
    loaded_tilesets: BTreeSet<String>,
    tiles: BTreeMap<String, TileType>,
    sector_tiles: HashMap<String, Arc<SectorTiles>>,
}

impl<S: ContentSource> TileLibrary<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            loaded_tilesets: BTreeSet::new(),
            tiles: BTreeMap::new(),
            sector_tiles: HashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tile(&self, id: &str) -> Option<&TileType> {
        self.tiles.get(id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_tileset_loaded(&self, name: &str) -> bool {
        self.loaded_tilesets.contains(name)
    }

    /// Loads every named tileset not loaded yet. Failures are logged and the
    /// tileset is still marked loaded so it is not retried.
    pub fn preload_tilesets(&mut self, names: &[String]) {
        for name in names {
            if self.loaded_tilesets.contains(name) {
                info!("Tileset \"{name}\" already loaded");
                continue;
            }
            info!("Loading tileset \"{name}\"");
            let tileset = match self.source.load_tileset(name) {
                Ok(tileset) => tileset,
                Err(err) => {
                    error!("Failed to load tileset \"{name}\": {err}");
                    Tileset::default()
                }
            };

            let mut count = 0usize;
            for tile in tileset.tiles {
                if self.tiles.contains_key(&tile.id) {
                    error!("Duplicate tile with ID \"{}\"", tile.id);
                }
                self.tiles.insert(tile.id.clone(), tile);
                count += 1;
            }
            info!("Loaded {count} tiles from tileset \"{name}\"");
            self.loaded_tilesets.insert(name.clone());
        }
    }

    /// Returns the sector's tiles, loading them on first use. A failed load is
    /// logged and cached as empty content.
    pub fn sector_tiles(&mut self, sector: &SectorSpec) -> Arc<SectorTiles> {
        if let Some(tiles) = self.sector_tiles.get(&sector.tiles) {
            info!("Using already-loaded sector tiles \"{}\"", sector.tiles);
            return Arc::clone(tiles);
        }

        info!("Loading sector tiles \"{}\"", sector.tiles);
        let tiles = match self.source.load_sector(&sector.tiles) {
            Ok(tiles) => tiles,
            Err(err) => {
                error!("Failed to load sector tiles \"{}\": {err}", sector.tiles);
                SectorTiles::default()
            }
        };
        let tiles = Arc::new(tiles);
        self.sector_tiles
            .insert(sector.tiles.clone(), Arc::clone(&tiles));
        tiles
    }
}
