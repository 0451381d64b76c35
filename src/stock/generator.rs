//! `StockBundleGenerator` — lazy enumeration of stock-tile combinations
//! big enough to plausibly contain the whole demand (spec.md §4.5).

use crate::stock::bundle::StockBundle;
use std::collections::HashSet;

/// Replaces the `thread.isAlive()` exhaustion proxy with an explicit
/// sentinel (spec.md §9 "stock-picker exhaustion detection").
pub enum GeneratorOutcome {
    Bundle(StockBundle),
    Exhausted,
}

pub struct StockBundleGenerator {
    stock: Vec<crate::models::tile::TileDimensions>,
    required_area: i64,
    required_max_dimension: i32,
    max_bundle_size: usize,
    emitted_all_panel: bool,
    same_id: bool,
    combo: Vec<usize>,
    exhausted: bool,
    exclusion: HashSet<Vec<usize>>,
}

impl StockBundleGenerator {
    pub fn new(
        demand: &[crate::models::tile::TileDimensions],
        stock: &[crate::models::tile::TileDimensions],
        size_hint: Option<usize>,
    ) -> Self {
        let mut sorted_stock = stock.to_vec();
        sorted_stock.sort_by(|a, b| a.area().cmp(&b.area()));

        let required_area: i64 = demand.iter().map(|t| t.area()).sum();
        let required_max_dimension = demand.iter().map(|t| t.max_dimension()).max().unwrap_or(0);
        let smallest_demand_area = demand.iter().map(|t| t.area()).min().unwrap_or(0);

        let same_id = !sorted_stock.is_empty() && sorted_stock.windows(2).all(|w| w[0].id == w[1].id);
        let biggest_area = sorted_stock.last().map(|t| t.area()).unwrap_or(0);

        let no_tile_can_ever_help = biggest_area > 0 && biggest_area < smallest_demand_area;

        let start_k = if biggest_area > 0 {
            ((required_area as f64) / (biggest_area as f64)).ceil().max(1.0) as usize
        } else {
            1
        };
        let max_bundle_size = size_hint.unwrap_or(1_000).min(1_000).max(start_k);

        Self {
            stock: sorted_stock,
            required_area,
            required_max_dimension,
            max_bundle_size,
            emitted_all_panel: false,
            same_id,
            combo: (0..start_k.min(stock.len())).collect(),
            exhausted: stock.is_empty() || no_tile_can_ever_help,
            exclusion: HashSet::new(),
        }
    }

    fn all_panel_bundle(&self) -> StockBundle {
        StockBundle::new(self.stock.clone())
    }

    fn combo_is_valid(&self) -> bool {
        if self.combo.len() > self.stock.len() {
            return false;
        }
        let area: i64 = self.combo.iter().map(|&i| self.stock[i].area()).sum();
        if area < self.required_area {
            return false;
        }
        self.combo
            .iter()
            .any(|&i| self.stock[i].max_dimension() >= self.required_max_dimension)
    }

    /// Advance `combo` (strictly increasing indices into `stock`) to the
    /// next k-subset; bumps `k` and resets when the current size is
    /// exhausted. Returns false once every size up to `max_bundle_size`
    /// has been visited.
    fn advance(&mut self) -> bool {
        let n = self.stock.len();
        loop {
            let k = self.combo.len();
            if k == 0 || k > n {
                return self.bump_size();
            }

            let mut i = k;
            let mut advanced = false;
            while i > 0 {
                i -= 1;
                if self.combo[i] < n - (k - i) {
                    self.combo[i] += 1;
                    for j in (i + 1)..k {
                        self.combo[j] = self.combo[j - 1] + 1;
                    }
                    advanced = true;
                    break;
                }
            }
            if advanced {
                return true;
            }
            if !self.bump_size() {
                return false;
            }
        }
    }

    fn bump_size(&mut self) -> bool {
        let next_k = self.combo.len() + 1;
        if next_k > self.max_bundle_size || next_k > self.stock.len() {
            return false;
        }
        self.combo = (0..next_k).collect();
        true
    }

    /// Produce the next bundle, or `Exhausted` once no more combinations
    /// remain. The very first call always returns the all-panel bundle, a
    /// safety net for reachability of a feasible solution.
    pub fn next(&mut self) -> GeneratorOutcome {
        if !self.emitted_all_panel {
            self.emitted_all_panel = true;
            if self.same_id {
                self.exhausted = true;
            }
            return GeneratorOutcome::Bundle(self.all_panel_bundle());
        }

        if self.exhausted {
            return GeneratorOutcome::Exhausted;
        }

        loop {
            if self.combo_is_valid() && self.exclusion.insert(self.combo.clone()) {
                let tiles = self.combo.iter().map(|&i| self.stock[i].clone()).collect();
                if !self.advance() {
                    self.exhausted = true;
                }
                return GeneratorOutcome::Bundle(StockBundle::new(tiles));
            }
            if !self.advance() {
                self.exhausted = true;
                return GeneratorOutcome::Exhausted;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile::TileDimensions;

    fn tile(id: i32, w: i32, h: i32) -> TileDimensions {
        TileDimensions::new(id, w, h)
    }

    #[test]
    fn first_bundle_is_the_all_panel_safety_net() {
        let demand = vec![tile(1, 50, 50)];
        let stock = vec![tile(10, 100, 100), tile(11, 200, 200)];
        let mut gen = StockBundleGenerator::new(&demand, &stock, None);
        match gen.next() {
            GeneratorOutcome::Bundle(b) => assert_eq!(b.tiles.len(), 2),
            GeneratorOutcome::Exhausted => panic!("expected a bundle"),
        }
    }

    #[test]
    fn same_id_stock_yields_only_the_all_panel_bundle() {
        let demand = vec![tile(1, 50, 50)];
        let stock = vec![tile(10, 100, 100), tile(10, 100, 100)];
        let mut gen = StockBundleGenerator::new(&demand, &stock, None);
        assert!(matches!(gen.next(), GeneratorOutcome::Bundle(_)));
        assert!(matches!(gen.next(), GeneratorOutcome::Exhausted));
    }

    #[test]
    fn eventually_exhausts() {
        let demand = vec![tile(1, 500, 500)];
        let stock = vec![tile(10, 10, 10), tile(11, 20, 20)];
        let mut gen = StockBundleGenerator::new(&demand, &stock, None);
        let mut n = 0;
        loop {
            match gen.next() {
                GeneratorOutcome::Bundle(_) => {
                    n += 1;
                    assert!(n < 1000, "generator should terminate");
                }
                GeneratorOutcome::Exhausted => break,
            }
        }
    }
}
