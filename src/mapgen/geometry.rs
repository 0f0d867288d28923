use super::grid::VolumeGrid;
use crate::types::Vec3;

/// Half-open axis-aligned boxes overlap strictly on all three axes.
pub fn boxes_intersect(origin1: Vec3, size1: Vec3, origin2: Vec3, size2: Vec3) -> bool {
    origin1.x + size1.x > origin2.x
        && origin2.x + size2.x > origin1.x
        && origin1.y + size1.y > origin2.y
        && origin2.y + size2.y > origin1.y
        && origin1.z + size1.z > origin2.z
        && origin2.z + size2.z > origin1.z
}

pub fn cell_intersects_any(grid: &VolumeGrid, cell: Vec3) -> bool {
    grid.occupied()
        .any(|(origin, slot)| boxes_intersect(cell, Vec3::ONE, origin, slot.size))
}

pub fn volume_fully_covered(grid: &VolumeGrid) -> bool {
    grid.positions().all(|cell| cell_intersects_any(grid, cell))
}

/// A box at `origin` stays inside the grid and touches no placed sector,
/// except the one seated at `ignore`.
pub(super) fn box_is_free(grid: &VolumeGrid, origin: Vec3, size: Vec3, ignore: Option<Vec3>) -> bool {
    let bounds = grid.size();
    if origin.x < 0 || origin.y < 0 || origin.z < 0 {
        return false;
    }
    if !(origin + size).fits_within(bounds) {
        return false;
    }
    grid.occupied()
        .filter(|(pos, _)| Some(*pos) != ignore)
        .all(|(pos, slot)| !boxes_intersect(origin, size, pos, slot.size))
}

/// Any two placed footprints overlap. Used to assert the packing invariant.
pub fn any_overlap(grid: &VolumeGrid) -> bool {
    let placed: Vec<_> = grid.occupied().collect();
    placed.iter().enumerate().any(|(i, (a_pos, a))| {
        placed[i + 1..]
            .iter()
            .any(|(b_pos, b)| boxes_intersect(*a_pos, a.size, *b_pos, b.size))
    })
}
