//! Order-preserving edits for the committed reference sequence.
//!
//! The sequence itself (stored URLs, position 0 = primary) is owned by the
//! caller; every helper here returns a single new complete `Vec`, so a
//! mutation is atomic from the caller's point of view. "Primary" is purely
//! a consequence of ordering; nothing here special-cases position 0.

/// Swap the reference at `index` with its left neighbour.
///
/// No-op at index 0, for out-of-range indices, or when the sequence has
/// fewer than 2 elements.
pub fn move_left(refs: &[String], index: usize) -> Vec<String> {
    let mut next = refs.to_vec();
    if index > 0 && index < next.len() {
        next.swap(index - 1, index);
    }
    next
}

/// Swap the reference at `index` with its right neighbour.
///
/// No-op at the last index or beyond, or when the sequence has fewer than
/// 2 elements.
pub fn move_right(refs: &[String], index: usize) -> Vec<String> {
    let mut next = refs.to_vec();
    if next.len() >= 2 && index < next.len() - 1 {
        next.swap(index, index + 1);
    }
    next
}

/// Remove the reference at `from` and reinsert it at `to`.
///
/// No-op when `from == to` or `from` is out of range; `to` past the end
/// places the reference last.
pub fn drag_reposition(refs: &[String], from: usize, to: usize) -> Vec<String> {
    let mut next = refs.to_vec();
    if from == to || from >= next.len() {
        return next;
    }
    let moved = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, moved);
    next
}

/// Filter out every occurrence of `reference`. An absent reference leaves
/// the sequence unchanged.
pub fn remove_by_value(refs: &[String], reference: &str) -> Vec<String> {
    refs.iter().filter(|r| *r != reference).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // -- move_left / move_right --

    #[test]
    fn move_left_swaps_with_left_neighbour() {
        assert_eq!(move_left(&seq(&["a", "b", "c"]), 2), seq(&["a", "c", "b"]));
    }

    #[test]
    fn move_left_at_zero_is_noop() {
        let refs = seq(&["a", "b"]);
        assert_eq!(move_left(&refs, 0), refs);
    }

    #[test]
    fn move_right_swaps_with_right_neighbour() {
        assert_eq!(move_right(&seq(&["a", "b", "c"]), 0), seq(&["b", "a", "c"]));
    }

    #[test]
    fn move_right_at_last_index_is_noop() {
        let refs = seq(&["a", "b", "c"]);
        assert_eq!(move_right(&refs, 2), refs);
    }

    #[test]
    fn moves_on_short_sequences_are_noops() {
        let one = seq(&["a"]);
        assert_eq!(move_left(&one, 0), one);
        assert_eq!(move_right(&one, 0), one);
        let empty: Vec<String> = Vec::new();
        assert_eq!(move_left(&empty, 0), empty);
        assert_eq!(move_right(&empty, 0), empty);
    }

    #[test]
    fn move_promotes_new_primary() {
        // Position 0 is primary by ordering alone.
        let refs = seq(&["a", "b"]);
        assert_eq!(move_left(&refs, 1)[0], "b");
    }

    // -- drag_reposition --

    #[test]
    fn drag_reposition_moves_forward() {
        assert_eq!(
            drag_reposition(&seq(&["a", "b", "c", "d"]), 0, 2),
            seq(&["b", "c", "a", "d"])
        );
    }

    #[test]
    fn drag_reposition_moves_backward() {
        assert_eq!(
            drag_reposition(&seq(&["a", "b", "c", "d"]), 3, 1),
            seq(&["a", "d", "b", "c"])
        );
    }

    #[test]
    fn drag_reposition_same_index_is_noop() {
        let refs = seq(&["a", "b", "c"]);
        assert_eq!(drag_reposition(&refs, 1, 1), refs);
    }

    #[test]
    fn drag_there_and_back_is_identity() {
        let refs = seq(&["a", "b", "c", "d"]);
        let moved = drag_reposition(&refs, 1, 3);
        assert_eq!(drag_reposition(&moved, 3, 1), refs);
    }

    #[test]
    fn drag_from_out_of_range_is_noop() {
        let refs = seq(&["a", "b"]);
        assert_eq!(drag_reposition(&refs, 5, 0), refs);
    }

    // -- remove_by_value --

    #[test]
    fn remove_by_value_filters_all_occurrences() {
        assert_eq!(
            remove_by_value(&seq(&["a", "b", "a", "c"]), "a"),
            seq(&["b", "c"])
        );
    }

    #[test]
    fn remove_absent_value_is_identity() {
        let refs = seq(&["a", "b"]);
        assert_eq!(remove_by_value(&refs, "z"), refs);
    }
}
