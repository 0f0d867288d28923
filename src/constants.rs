use crate::types::Vec3;

pub const MAP_ATTEMPTS: usize = 5;

/// Randomized filler passes: direct placement, then forced placement.
pub const FILL_PASSES: usize = 2;

pub const DEFAULT_CHUNK_SIZE: Vec3 = Vec3 { x: 20, y: 20, z: 4 };

/// Extra enlargement on top of +1 is only rolled when larger maps are allowed.
pub fn enlarge_bonus_allowed(allow_larger_maps: bool, size_mod: i32) -> bool {
    allow_larger_maps && size_mod == 1
}
