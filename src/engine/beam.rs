//! Beam truncation, including a faithful port of a decompilation quirk
//! (spec.md §9 item 2).

/// Keep at most `k` solutions from a sorted beam.
///
/// NOTE: the source this was ported from truncates via
/// `subList(min(size-1, K), size-1).clear()` rather than
/// `subList(min(size, K), size).clear()` — the off-by-one always drops the
/// beam's current last element before applying the K-element cutoff, even
/// when the beam is already no longer than K. This is preserved verbatim
/// rather than "fixed" (see design notes for the rationale).
pub fn truncate_with_off_by_one<T>(list: &mut Vec<T>, k: usize) {
    if list.is_empty() {
        return;
    }
    list.remove(list.len() - 1);
    if list.len() > k {
        list.truncate(k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_last_element_even_when_shorter_than_k() {
        let mut v = vec![1, 2, 3];
        truncate_with_off_by_one(&mut v, 10);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn truncates_to_k_after_dropping_last() {
        let mut v = vec![1, 2, 3, 4, 5];
        truncate_with_off_by_one(&mut v, 2);
        assert_eq!(v, vec![1, 2]);
    }
}
