use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::battle::GeneratedMap;
use crate::catalog::{BattleMapDef, SectorSpec};
use crate::content::{ContentSource, TileLibrary};
use crate::error::GenerationError;
use crate::rng::Rng;
use crate::types::{MissionType, Vec3};

mod filler;
pub mod geometry;
pub mod grid;
mod materializer;
pub mod negotiator;
pub mod placer;
pub mod scheduler;

pub use self::materializer::materialize;

use self::geometry::volume_fully_covered;
use self::grid::{Slot, VolumeGrid};
use self::negotiator::{Candidate, FillStrategy, SizeRoll};
use self::placer::Packing;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub allow_vertical_stacking: bool,
    /// Lets an enlarged map grow by two chunks instead of one.
    pub allow_larger_maps: bool,
    /// Seat only the most constraining mandatory sector before filling. Keeps
    /// stacked maps feasible at modest sizes; an upper level may end up
    /// without an access sector.
    pub require_only_largest_mandatory_sector: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            allow_vertical_stacking: true,
            allow_larger_maps: true,
            require_only_largest_mandatory_sector: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionRequest {
    pub mission_type: MissionType,
    pub location_id: String,
    pub craft: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedLayout {
    pub grid: VolumeGrid,
    pub placed: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackFailure {
    MandatorySeat,
    Incomplete,
}

pub(crate) struct Attempt<'a> {
    sectors: &'a [SectorSpec],
    grid: VolumeGrid,
    placed: Vec<u32>,
    packing: Packing,
}

impl<'a> Attempt<'a> {
    fn new(sectors: &'a [SectorSpec], size: Vec3, packing: Packing) -> Self {
        Self {
            sectors,
            grid: VolumeGrid::new(size),
            placed: vec![0; sectors.len()],
            packing,
        }
    }

    fn slot(&self, idx: usize) -> Slot {
        Slot {
            sector: idx,
            size: self.sectors[idx].size,
        }
    }

    fn fits(&self, idx: usize) -> bool {
        let size = self.sectors[idx].size;
        size.is_positive() && size.fits_within(self.grid.size())
    }

    fn can_take_more(&self, idx: usize) -> bool {
        self.placed[idx] < self.sectors[idx].occurrence_max
    }

    /// Sectors that fit the volume and are below their maximum, catalog order.
    fn eligible(&self) -> Vec<usize> {
        (0..self.sectors.len())
            .filter(|&i| self.fits(i) && self.can_take_more(i))
            .collect()
    }

    fn is_complete(&self) -> bool {
        volume_fully_covered(&self.grid)
    }

    fn place(&mut self, idx: usize, force: bool, rng: &mut Rng) -> bool {
        let slot = self.slot(idx);
        if !placer::place(&mut self.grid, slot, force, self.packing, rng) {
            return false;
        }
        self.placed[idx] += 1;
        true
    }

    fn into_layout(self) -> PackedLayout {
        PackedLayout {
            grid: self.grid,
            placed: self.placed,
        }
    }
}

/// Packs one candidate volume: rolls packing directions, seats mandatory
/// sectors, then fills with the candidate's strategy.
pub fn pack_candidate(
    sectors: &[SectorSpec],
    candidate: &Candidate,
    options: &GenerationOptions,
    rng: &mut Rng,
) -> Result<PackedLayout, PackFailure> {
    let packing = Packing::roll(rng);
    let mut attempt = Attempt::new(sectors, candidate.size, packing);

    let remaining = attempt
        .seat_mandatory(options.require_only_largest_mandatory_sector, rng)
        .ok_or(PackFailure::MandatorySeat)?;

    let complete = match candidate.strategy {
        FillStrategy::Randomized => attempt.fill_randomized(remaining, rng),
        FillStrategy::Deterministic => attempt.fill_deterministic(remaining),
    };
    if !complete {
        return Err(PackFailure::Incomplete);
    }
    Ok(attempt.into_layout())
}

pub fn generate_battle_map<S: ContentSource>(
    def: &BattleMapDef,
    library: &mut TileLibrary<S>,
    mission: &MissionRequest,
    options: &GenerationOptions,
    rng: &mut Rng,
) -> Result<GeneratedMap, GenerationError> {
    if def.sectors.is_empty() {
        error!("Failed to create map {}: no sectors", def.id);
        return Err(GenerationError::EmptyCatalog(def.id.clone()));
    }
    if !def.max_battle_size.is_positive() {
        error!("Failed to create map {}: size {:?}", def.id, def.max_battle_size);
        return Err(GenerationError::InvalidMapSize {
            map_id: def.id.clone(),
            size: def.max_battle_size,
        });
    }

    let roll = SizeRoll::roll(def.max_battle_size, options, rng);
    debug!(
        "Map {} rolled size mod {} stacking {} (normal {:?}, modded {:?})",
        def.id, roll.size_mod, roll.stacking, roll.normal_size, roll.modded_size
    );

    library.preload_tilesets(&def.tilesets);

    let mut attempts = 0;
    let mut last_size = None;
    for candidate in roll.candidates() {
        if candidate.skipped {
            info!(
                "Skipping attempt {} for map {}: vertical stacking was not rolled",
                candidate.attempt, def.id
            );
            continue;
        }
        attempts += 1;
        last_size = Some(candidate.size);
        let size = candidate.size;

        match pack_candidate(&def.sectors, &candidate, options, rng) {
            Ok(layout) => {
                info!(
                    "Successfully completed map {} with size {}, {}, {} at attempt {}",
                    def.id, size.x, size.y, size.z, candidate.attempt
                );
                return Ok(materialize(def, &layout.grid, candidate.attempt, mission, library));
            }
            Err(PackFailure::MandatorySeat) => warn!(
                "Failed to place all mandatory sectors for map {} with size {}, {}, {} at attempt {}",
                def.id, size.x, size.y, size.z, candidate.attempt
            ),
            Err(PackFailure::Incomplete) => warn!(
                "Failed to complete map {} with size {}, {}, {} at attempt {}",
                def.id, size.x, size.y, size.z, candidate.attempt
            ),
        }
    }

    error!("Failed to create map {}", def.id);
    Err(GenerationError::Exhausted {
        map_id: def.id.clone(),
        attempts,
        last_size,
    })
}
