use log::debug;

use super::geometry::box_is_free;
use super::grid::{Slot, VolumeGrid};
use crate::rng::Rng;
use crate::types::Vec3;

/// Which end of the x and y axes compaction packs toward. z always packs down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Packing {
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Packing {
    pub fn roll(rng: &mut Rng) -> Self {
        let invert_x = rng.coin();
        let invert_y = rng.coin();
        Self { invert_x, invert_y }
    }

    fn step_x(self) -> i32 {
        if self.invert_x {
            1
        } else {
            -1
        }
    }

    fn step_y(self) -> i32 {
        if self.invert_y {
            1
        } else {
            -1
        }
    }

    fn order(len: i32, invert: bool) -> Vec<i32> {
        if invert {
            (0..len).rev().collect()
        } else {
            (0..len).collect()
        }
    }
}

pub fn valid_locations(grid: &VolumeGrid, size: Vec3) -> Vec<Vec3> {
    let bounds = grid.size();
    let mut out = Vec::new();
    for x in 0..=(bounds.x - size.x) {
        for y in 0..=(bounds.y - size.y) {
            for z in 0..=(bounds.z - size.z) {
                let origin = Vec3::new(x, y, z);
                if box_is_free(grid, origin, size, None) {
                    out.push(origin);
                }
            }
        }
    }
    out
}

/// Seats `slot` at a uniformly random valid origin. With `force`, a failed
/// direct attempt is followed by compaction passes until either the sector
/// fits or nothing can move any further.
pub fn place(grid: &mut VolumeGrid, slot: Slot, force: bool, packing: Packing, rng: &mut Rng) -> bool {
    if !placeable(grid, slot) {
        return false;
    }
    if place_random(grid, slot, rng) {
        return true;
    }
    if !force {
        return false;
    }

    let mut pass = 0;
    loop {
        pass += 1;
        if !compact_pass(grid, packing) {
            debug!("Compaction exhausted after {pass} passes for sector {}", slot.sector);
            return false;
        }
        if place_random(grid, slot, rng) {
            debug!("Compaction freed room for sector {} after {pass} passes", slot.sector);
            return true;
        }
    }
}

/// Seats `slot` at the first valid origin in raster order. Consumes no randomness.
pub fn place_first_fit(grid: &mut VolumeGrid, slot: Slot) -> bool {
    if !placeable(grid, slot) {
        return false;
    }
    let bounds = grid.size();
    for x in 0..=(bounds.x - slot.size.x) {
        for y in 0..=(bounds.y - slot.size.y) {
            for z in 0..=(bounds.z - slot.size.z) {
                let origin = Vec3::new(x, y, z);
                if box_is_free(grid, origin, slot.size, None) {
                    return grid.set(origin, slot);
                }
            }
        }
    }
    false
}

fn place_random(grid: &mut VolumeGrid, slot: Slot, rng: &mut Rng) -> bool {
    let locations = valid_locations(grid, slot.size);
    if locations.is_empty() {
        return false;
    }
    let origin = locations[rng.pick_index(locations.len())];
    grid.set(origin, slot)
}

fn placeable(grid: &VolumeGrid, slot: Slot) -> bool {
    slot.size.is_positive() && slot.size.fits_within(grid.size())
}

/// One sweep over the grid sliding each sector a single chunk toward the
/// packing corner, trying x, then y, then z. Returns whether anything moved.
pub(super) fn compact_pass(grid: &mut VolumeGrid, packing: Packing) -> bool {
    let bounds = grid.size();
    let steps = [
        Vec3::new(packing.step_x(), 0, 0),
        Vec3::new(0, packing.step_y(), 0),
        Vec3::new(0, 0, -1),
    ];
    let mut moved = false;

    for x in Packing::order(bounds.x, packing.invert_x) {
        for y in Packing::order(bounds.y, packing.invert_y) {
            for z in 0..bounds.z {
                let pos = Vec3::new(x, y, z);
                let Some(slot) = grid.get(pos) else {
                    continue;
                };
                let target = steps
                    .iter()
                    .map(|step| pos + *step)
                    .find(|dest| box_is_free(grid, *dest, slot.size, Some(pos)));
                if let Some(dest) = target {
                    grid.take(pos);
                    moved |= grid.set(dest, slot);
                }
            }
        }
    }
    moved
}
