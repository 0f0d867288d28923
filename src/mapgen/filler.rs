use super::placer::place_first_fit;
use super::Attempt;
use crate::constants::FILL_PASSES;
use crate::rng::Rng;

impl Attempt<'_> {
    /// Random filling. The first pass only places directly; if the volume is
    /// still open, a second pass re-admits every sector below its maximum and
    /// places with compaction.
    pub(super) fn fill_randomized(&mut self, mut eligible: Vec<usize>, rng: &mut Rng) -> bool {
        for pass in 1..=FILL_PASSES {
            if self.is_complete() {
                break;
            }
            let force = pass == FILL_PASSES;
            if force {
                eligible = self.eligible();
            }

            while !self.is_complete() && !eligible.is_empty() {
                let i = rng.pick_index(eligible.len());
                let idx = eligible[i];
                if self.place(idx, force, rng) {
                    if !self.can_take_more(idx) {
                        eligible.remove(i);
                    }
                } else {
                    eligible.remove(i);
                }
            }
        }
        self.is_complete()
    }

    /// Largest-first filling: each sector in priority order takes the first
    /// free origin in raster order until it hits its maximum or stops fitting.
    pub(super) fn fill_deterministic(&mut self, remaining: Vec<usize>) -> bool {
        for idx in remaining {
            if self.is_complete() {
                break;
            }
            while self.can_take_more(idx) {
                let slot = self.slot(idx);
                if !place_first_fit(&mut self.grid, slot) {
                    break;
                }
                self.placed[idx] += 1;
            }
        }
        self.is_complete()
    }
}
