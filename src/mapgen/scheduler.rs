use log::debug;

use super::Attempt;
use crate::catalog::SectorSpec;
use crate::rng::Rng;

/// Catalog indices, tallest first, then largest volume, ties in catalog order.
pub fn priority_order(sectors: &[SectorSpec]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sectors.len()).collect();
    order.sort_by(|&a, &b| {
        let (sa, sb) = (sectors[a].size, sectors[b].size);
        sb.z.cmp(&sa.z).then(sb.volume().cmp(&sa.volume()))
    });
    order
}

impl Attempt<'_> {
    /// Seats the minimum occurrences of mandatory sectors with forced
    /// placement. Sectors too big for the volume are left out of this
    /// candidate. Returns the sectors still open for filling, in priority
    /// order, or `None` when a fitting required sector cannot be seated.
    pub(super) fn seat_mandatory(&mut self, only_largest: bool, rng: &mut Rng) -> Option<Vec<usize>> {
        let order = priority_order(self.sectors);
        for &i in &order {
            if self.sectors[i].is_mandatory() && !self.fits(i) {
                debug!(
                    "Mandatory sector \"{}\" does not fit {:?}, excluded",
                    self.sectors[i].id,
                    self.grid.size()
                );
            }
        }

        let mut remaining: Vec<usize> = order.into_iter().filter(|&i| self.fits(i)).collect();
        let mandatory: Vec<usize> = remaining
            .iter()
            .copied()
            .filter(|&i| self.sectors[i].is_mandatory())
            .collect();

        for idx in mandatory {
            for _ in 0..self.sectors[idx].occurrence_min {
                if !self.place(idx, true, rng) {
                    debug!("Could not seat mandatory sector \"{}\"", self.sectors[idx].id);
                    return None;
                }
            }
            if only_largest {
                break;
            }
        }

        remaining.retain(|&i| self.can_take_more(i));
        Some(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::super::geometry::any_overlap;
    use super::super::placer::Packing;
    use super::*;
    use crate::types::Vec3;

    fn sector(id: &str, size: Vec3, min: u32, max: u32) -> SectorSpec {
        SectorSpec {
            id: id.to_string(),
            size,
            occurrence_min: min,
            occurrence_max: max,
            tiles: id.to_string(),
        }
    }

    #[test]
    fn priority_is_height_then_volume_then_catalog_order() {
        let sectors = vec![
            sector("small", Vec3::new(1, 1, 1), 0, 1),
            sector("wide", Vec3::new(2, 2, 1), 0, 1),
            sector("tall", Vec3::new(1, 1, 2), 0, 1),
            sector("small2", Vec3::new(1, 1, 1), 0, 1),
            sector("tall_wide", Vec3::new(2, 1, 2), 0, 1),
        ];
        assert_eq!(priority_order(&sectors), vec![4, 2, 1, 0, 3]);
    }

    #[test]
    fn all_mandatory_minima_are_seated() {
        let sectors = vec![
            sector("a", Vec3::new(1, 1, 1), 2, 3),
            sector("b", Vec3::new(2, 1, 1), 1, 1),
            sector("c", Vec3::new(1, 1, 1), 0, 4),
        ];
        for seed in 0..50u64 {
            let mut rng = Rng::new(seed);
            let mut attempt = Attempt::new(&sectors, Vec3::new(3, 2, 1), Packing::default());
            let remaining = attempt
                .seat_mandatory(false, &mut rng)
                .expect("mandatory sectors should fit");
            assert_eq!(attempt.placed, vec![2, 1, 0]);
            assert_eq!(remaining, vec![0, 2]);
            assert!(!any_overlap(&attempt.grid));
        }
    }

    #[test]
    fn only_largest_mode_seats_a_single_mandatory_sector() {
        let sectors = vec![
            sector("a", Vec3::new(1, 1, 1), 1, 1),
            sector("big", Vec3::new(2, 2, 1), 1, 2),
        ];
        let mut rng = Rng::new(9);
        let mut attempt = Attempt::new(&sectors, Vec3::new(3, 3, 1), Packing::default());
        let remaining = attempt.seat_mandatory(true, &mut rng).expect("should seat");
        assert_eq!(attempt.placed, vec![0, 1]);
        assert_eq!(remaining, vec![1, 0]);
    }

    #[test]
    fn mandatory_sector_too_big_for_volume_is_excluded() {
        let sectors = vec![
            sector("lift", Vec3::new(1, 1, 2), 1, 1),
            sector("huge", Vec3::new(3, 1, 1), 1, 1),
            sector("cell", Vec3::ONE, 0, 4),
        ];
        for only_largest in [false, true] {
            let mut rng = Rng::new(1);
            let mut attempt = Attempt::new(&sectors, Vec3::new(2, 2, 1), Packing::default());
            assert_eq!(attempt.seat_mandatory(only_largest, &mut rng), Some(vec![2]));
            assert_eq!(attempt.placed, vec![0, 0, 0]);
            assert_eq!(attempt.grid.occupied_count(), 0);
        }
    }

    #[test]
    fn too_many_mandatory_copies_rejects_candidate() {
        let sectors = vec![sector("a", Vec3::new(1, 1, 1), 5, 5)];
        let mut rng = Rng::new(1);
        let mut attempt = Attempt::new(&sectors, Vec3::new(2, 2, 1), Packing::default());
        assert!(attempt.seat_mandatory(false, &mut rng).is_none());
    }

    #[test]
    fn disabled_and_oversized_sectors_are_not_remaining() {
        let sectors = vec![
            sector("off", Vec3::new(1, 1, 1), 0, 0),
            sector("huge", Vec3::new(1, 1, 3), 0, 2),
            sector("ok", Vec3::new(1, 1, 1), 0, 2),
        ];
        let mut rng = Rng::new(1);
        let mut attempt = Attempt::new(&sectors, Vec3::new(2, 2, 1), Packing::default());
        assert_eq!(attempt.seat_mandatory(false, &mut rng), Some(vec![2]));
    }
}
