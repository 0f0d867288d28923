use super::GenerationOptions;
use crate::constants::{enlarge_bonus_allowed, MAP_ATTEMPTS};
use crate::rng::Rng;
use crate::types::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStrategy {
    Randomized,
    Deterministic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// 1-based, matching the order in which candidates are tried.
    pub attempt: usize,
    pub size: Vec3,
    pub strategy: FillStrategy,
    /// Stacking-off fallbacks are skipped when stacking was never rolled.
    pub skipped: bool,
}

/// Random decisions taken once per generation, before any candidate is tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeRoll {
    pub size_mod: i32,
    pub stacking: bool,
    pub normal_size: Vec3,
    pub modded_size: Vec3,
}

impl SizeRoll {
    /// Draws, in order: the size delta (-1, 0 or +1), the +2 bonus when
    /// enlarging is allowed, the stacking toggle when the map is tall enough,
    /// and the enlargement axis. Shrinking always takes the larger horizontal axis.
    pub fn roll(max_size: Vec3, options: &GenerationOptions, rng: &mut Rng) -> Self {
        let mut size_mod = rng.int(-1, 1);
        if enlarge_bonus_allowed(options.allow_larger_maps, size_mod) {
            size_mod += rng.int(0, 1);
        }
        let stacking = options.allow_vertical_stacking && max_size.z > 1 && rng.coin();

        let mut normal_size = max_size;
        if !stacking {
            normal_size.z = 1;
        }

        let mut modded_size = normal_size;
        if size_mod < 0 {
            if modded_size.x >= modded_size.y {
                modded_size.x += size_mod;
            } else {
                modded_size.y += size_mod;
            }
        } else if size_mod > 0 {
            if rng.coin() {
                modded_size.x += size_mod;
            } else {
                modded_size.y += size_mod;
            }
        }
        modded_size.x = modded_size.x.max(1);
        modded_size.y = modded_size.y.max(1);

        Self {
            size_mod,
            stacking,
            normal_size,
            modded_size,
        }
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        let flat = |mut size: Vec3| {
            size.z = 1;
            size
        };
        let plan = [
            (self.modded_size, FillStrategy::Randomized, false),
            (self.normal_size, FillStrategy::Randomized, false),
            (flat(self.modded_size), FillStrategy::Randomized, !self.stacking),
            (flat(self.normal_size), FillStrategy::Randomized, !self.stacking),
            (flat(self.normal_size), FillStrategy::Deterministic, false),
        ];
        debug_assert_eq!(plan.len(), MAP_ATTEMPTS);
        plan.iter()
            .enumerate()
            .map(|(i, (size, strategy, skipped))| Candidate {
                attempt: i + 1,
                size: *size,
                strategy: *strategy,
                skipped: *skipped,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_five_candidates_in_priority_order() {
        for seed in 0..100u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(3, 2, 2), &GenerationOptions::default(), &mut rng);
            let candidates = roll.candidates();
            assert_eq!(candidates.len(), MAP_ATTEMPTS);
            assert_eq!(candidates[0].size, roll.modded_size);
            assert_eq!(candidates[1].size, roll.normal_size);
            assert_eq!(candidates[2].size.z, 1);
            assert_eq!(candidates[3].size.z, 1);
            assert_eq!(candidates[4].strategy, FillStrategy::Deterministic);
            assert_eq!(candidates[4].size, Vec3::new(3, 2, 1));
            assert_eq!(candidates[2].skipped, !roll.stacking);
            assert_eq!(candidates[3].skipped, !roll.stacking);
            assert!(candidates.iter().take(4).all(|c| c.strategy == FillStrategy::Randomized));
        }
    }

    #[test]
    fn size_delta_stays_in_range_and_respects_larger_flag() {
        let tight = GenerationOptions {
            allow_larger_maps: false,
            ..GenerationOptions::default()
        };
        for seed in 0..200u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(3, 3, 1), &GenerationOptions::default(), &mut rng);
            assert!((-1..=2).contains(&roll.size_mod));

            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(3, 3, 1), &tight, &mut rng);
            assert!((-1..=1).contains(&roll.size_mod));
        }
    }

    #[test]
    fn shrink_takes_the_larger_axis_and_never_goes_below_one() {
        for seed in 0..200u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(3, 1, 1), &GenerationOptions::default(), &mut rng);
            if roll.size_mod < 0 {
                assert_eq!(roll.modded_size, Vec3::new(2, 1, 1));
            }

            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(1, 1, 1), &GenerationOptions::default(), &mut rng);
            assert!(roll.modded_size.x >= 1 && roll.modded_size.y >= 1);
        }
    }

    #[test]
    fn flat_maps_never_stack() {
        for seed in 0..50u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(2, 2, 1), &GenerationOptions::default(), &mut rng);
            assert!(!roll.stacking);
        }
        let no_stacking = GenerationOptions {
            allow_vertical_stacking: false,
            ..GenerationOptions::default()
        };
        for seed in 0..50u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(2, 2, 3), &no_stacking, &mut rng);
            assert!(!roll.stacking);
            assert_eq!(roll.normal_size.z, 1);
        }
    }

    #[test]
    fn stacking_keeps_full_height_on_first_candidates() {
        let mut saw_stacking = false;
        for seed in 0..100u64 {
            let mut rng = Rng::new(seed);
            let roll = SizeRoll::roll(Vec3::new(2, 2, 3), &GenerationOptions::default(), &mut rng);
            if roll.stacking {
                saw_stacking = true;
                assert_eq!(roll.normal_size.z, 3);
                assert_eq!(roll.candidates()[0].size.z, 3);
            }
        }
        assert!(saw_stacking);
    }
}
