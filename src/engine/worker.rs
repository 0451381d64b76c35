//! `CutListWorker` — tries one permutation of one material's demand against
//! one stock bundle, maintaining a local beam (spec.md §4.4).

use crate::comparator::{MultiCriteriaComparator, SolutionUtils};
use crate::models::configuration::Configuration;
use crate::models::enums::{CutOrientationPreference, FirstCutOrientation};
use crate::models::grouped_tile::GroupedTileDimensions;
use crate::models::solution::Solution;
use crate::models::tile::TileDimensions;

/// Outcome of running one worker to completion: its local beam plus
/// whether any placement was blocked purely by the min-trim constraint.
pub struct WorkerResult {
    pub beam: Vec<Solution>,
    pub min_trim_influenced: bool,
}

pub struct CutListWorker {
    policy: FirstCutOrientation,
    kerf: i32,
    min_trim: i32,
    consider_grain: bool,
}

impl CutListWorker {
    pub fn new(config: &Configuration) -> Self {
        let policy = match config.cut_orientation_preference {
            CutOrientationPreference::Horizontal => FirstCutOrientation::Horizontal,
            CutOrientationPreference::Vertical => FirstCutOrientation::Vertical,
            CutOrientationPreference::Both => FirstCutOrientation::Both,
        };
        Self {
            policy,
            kerf: config.cut_thickness,
            min_trim: config.min_trim_dimension,
            consider_grain: config.consider_orientation,
        }
    }

    /// Place every panel of `permutation`, in order, into a beam that starts
    /// as a single solution seeded from `stock_bundle`. Each step re-ranks
    /// and truncates the beam to `beam_width` before moving to the next
    /// panel (spec.md §4.4 steps 1-3).
    pub fn run(
        &self,
        permutation: &[GroupedTileDimensions],
        stock_bundle: &[TileDimensions],
        thread_group: &str,
        comparator: &MultiCriteriaComparator,
        beam_width: usize,
    ) -> WorkerResult {
        let mut beam = vec![Solution::from_bundle(stock_bundle, thread_group)];
        let mut min_trim_influenced = false;

        for grouped in permutation {
            let t = &grouped.tile_dimensions;
            let mut next_beam = Vec::new();

            for solution in &beam {
                let mut placed_any = false;

                for mosaic in &solution.mosaics {
                    if mosaic.material != t.material {
                        continue;
                    }
                    let outcome =
                        mosaic.add(t, self.policy, self.kerf, self.min_trim, self.consider_grain);
                    min_trim_influenced |= outcome.min_trim_influenced;
                    if !outcome.mosaics.is_empty() {
                        placed_any = true;
                        for placed in outcome.mosaics {
                            next_beam.push(solution.replace_mosaic(mosaic.root.id, placed));
                        }
                        // Only the first mosaic that accepts t gets it; later
                        // mosaics in this solution are left untouched.
                        break;
                    }
                }

                if !placed_any {
                    if let Some((base, new_mosaic)) = solution.instantiate_from_unused_stock(t) {
                        let outcome = new_mosaic.add(
                            t,
                            self.policy,
                            self.kerf,
                            self.min_trim,
                            self.consider_grain,
                        );
                        min_trim_influenced |= outcome.min_trim_influenced;
                        for placed in outcome.mosaics {
                            placed_any = true;
                            let mut candidate = base.clone();
                            candidate.insert_mosaic(placed);
                            next_beam.push(candidate);
                        }
                    }
                }

                if !placed_any {
                    let mut candidate = solution.clone();
                    candidate.no_fit_panels.push(t.clone());
                    next_beam.push(candidate);
                }
            }

            SolutionUtils::process_solutions(&mut next_beam, comparator, beam_width);
            beam = next_beam;
        }

        for solution in &mut beam {
            solution.drop_empty_mosaics();
        }

        WorkerResult {
            beam,
            min_trim_influenced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::priority_list_factory::PriorityListFactory;
    use crate::models::enums::OptimizationPriority;
    use crate::models::grouped_tile::GroupedTileDimensions;

    fn worker() -> CutListWorker {
        CutListWorker::new(&Configuration::default())
    }

    fn comparator() -> MultiCriteriaComparator {
        MultiCriteriaComparator::new(PriorityListFactory::build(OptimizationPriority::LeastWastedArea))
    }

    #[test]
    fn places_every_panel_when_stock_is_ample() {
        let stock = vec![TileDimensions::new(100, 1000, 1000)];
        let permutation = vec![
            GroupedTileDimensions::new(TileDimensions::new(1, 300, 200), 0),
            GroupedTileDimensions::new(TileDimensions::new(2, 300, 200), 0),
        ];
        let result = worker().run(&permutation, &stock, "AREA", &comparator(), 10);
        let best = result.beam.first().expect("a solution exists");
        assert_eq!(best.nbr_final_tiles(), 2);
        assert!(best.no_fit_panels.is_empty());
    }

    #[test]
    fn panel_too_big_for_any_stock_lands_in_no_fit() {
        let stock = vec![TileDimensions::new(100, 50, 50)];
        let permutation = vec![GroupedTileDimensions::new(TileDimensions::new(1, 300, 200), 0)];
        let result = worker().run(&permutation, &stock, "AREA", &comparator(), 10);
        let best = result.beam.first().expect("a solution exists");
        assert_eq!(best.no_fit_panels.len(), 1);
    }

    #[test]
    fn beam_width_bounds_the_local_beam() {
        let stock = vec![TileDimensions::new(100, 1000, 1000)];
        let permutation: Vec<_> = (0..5)
            .map(|i| GroupedTileDimensions::new(TileDimensions::new(i, 90 + i, 90 + i), 0))
            .collect();
        let result = worker().run(&permutation, &stock, "AREA", &comparator(), 2);
        assert!(result.beam.len() <= 2);
    }
}
