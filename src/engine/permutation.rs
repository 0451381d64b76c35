//! Permutation generation, step 2 of the per-material driver (spec.md
//! §4.3). Only the head of the grouped demand list is fully permuted; the
//! rest rides along in its original order, which bounds the factorial
//! blow-up while still exploring every ordering of the biggest panels.

use crate::models::grouped_tile::GroupedTileDimensions;
use rayon::prelude::*;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Cap on the number of distinct sizes that get a full permutation; 7! =
/// 5040 permutations, which is the engine's practical ceiling per
/// material.
const MAX_PERMUTED_GROUPS: usize = 7;

type GroupKey = (i32, i32, i32);

fn group_key(g: &GroupedTileDimensions) -> GroupKey {
    (g.width(), g.height(), g.group)
}

/// The distinct (size, group) combinations appearing in `grouped`, each
/// kept once, in order of first appearance.
fn distinct_groups(grouped: &[GroupedTileDimensions]) -> Vec<GroupedTileDimensions> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for g in grouped {
        if seen.insert(group_key(g)) {
            out.push(g.clone());
        }
    }
    out
}

/// All orderings of `items`, via a recursive Heap's-algorithm-style swap.
fn permute(items: Vec<GroupedTileDimensions>) -> Vec<Vec<GroupedTileDimensions>> {
    let n = items.len();
    if n <= 1 {
        return vec![items];
    }
    let mut out = Vec::new();
    let mut items = items;
    permute_into(&mut items, n, &mut out);
    out
}

fn permute_into(items: &mut Vec<GroupedTileDimensions>, k: usize, out: &mut Vec<Vec<GroupedTileDimensions>>) {
    if k == 1 {
        out.push(items.clone());
        return;
    }
    for i in 0..k {
        permute_into(items, k - 1, out);
        if k % 2 == 0 {
            items.swap(i, k - 1);
        } else {
            items.swap(0, k - 1);
        }
    }
}

fn sequence_hash(full: &[GroupedTileDimensions]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for g in full {
        g.width().hash(&mut hasher);
        g.height().hash(&mut hasher);
    }
    hasher.finish()
}

/// Build every permutation of the demand to try for this material. Each
/// permutation preserves the full per-panel list (every individual panel,
/// not just the distinct sizes); members of the same group stay in their
/// original relative order, keyed to their group's position in the head
/// permutation (spec.md §4.3 step 2).
pub fn generate_permutations(grouped: &[GroupedTileDimensions]) -> Vec<Vec<GroupedTileDimensions>> {
    if grouped.is_empty() {
        return vec![Vec::new()];
    }

    let mut distinct = distinct_groups(grouped);
    distinct.sort_by(|a, b| b.area().cmp(&a.area()));

    let head_len = distinct.len().min(MAX_PERMUTED_GROUPS);
    let head: Vec<_> = distinct[..head_len].to_vec();
    let tail: Vec<_> = distinct[head_len..].to_vec();

    // Expanding each head ordering into the full per-panel permutation is
    // independent work (no shared state besides the read-only `grouped`
    // slice), so it fans out across the CPU rather than running serially
    // before the per-permutation workers even start.
    let expanded: Vec<(u64, Vec<GroupedTileDimensions>)> = permute(head)
        .into_par_iter()
        .map(|head_perm| {
            let order: Vec<GroupKey> = head_perm
                .iter()
                .chain(tail.iter())
                .map(group_key)
                .collect();
            let index_of: std::collections::HashMap<GroupKey, usize> =
                order.iter().enumerate().map(|(i, k)| (*k, i)).collect();

            let mut full = grouped.to_vec();
            full.sort_by_key(|g| index_of[&group_key(g)]);
            let hash = sequence_hash(&full);
            (hash, full)
        })
        .collect();

    let mut full_permutations = Vec::new();
    let mut seen_hashes = HashSet::new();
    for (hash, full) in expanded {
        if seen_hashes.insert(hash) {
            full_permutations.push(full);
        }
    }

    full_permutations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile::TileDimensions;

    fn grouped(id: i32, w: i32, h: i32, group: i32) -> GroupedTileDimensions {
        GroupedTileDimensions::new(TileDimensions::new(id, w, h), group)
    }

    #[test]
    fn permutes_distinct_sizes_and_preserves_member_order() {
        let demand = vec![
            grouped(1, 100, 100, 0),
            grouped(2, 50, 50, 1),
            grouped(3, 50, 50, 1),
        ];
        let perms = generate_permutations(&demand);
        assert!(!perms.is_empty());
        for perm in &perms {
            assert_eq!(perm.len(), 3);
            let pos2 = perm.iter().position(|g| g.id() == 2).unwrap();
            let pos3 = perm.iter().position(|g| g.id() == 3).unwrap();
            assert!(pos2 < pos3, "members of the same group keep their relative order");
        }
    }

    #[test]
    fn bounds_factorial_explosion_at_seven_groups() {
        let demand: Vec<_> = (0..10).map(|i| grouped(i, 10 + i, 20 + i, i)).collect();
        let perms = generate_permutations(&demand);
        assert!(perms.len() <= 5040);
    }

    #[test]
    fn single_group_yields_one_permutation() {
        let demand = vec![grouped(1, 10, 10, 0), grouped(2, 10, 10, 0)];
        let perms = generate_permutations(&demand);
        assert_eq!(perms.len(), 1);
    }
}
