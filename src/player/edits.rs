//! Index reconciliation for playlist edits.
//!
//! Every playlist mutation must re-derive any held index so it never
//! dangles. The math lives here, on plain values, so it can be tested
//! exhaustively without a controller.

/// Move the element at `from` so it ends up at index `to` in the result.
///
/// Remove-then-insert: the insertion happens at `to` in the post-removal
/// list, so `move_item(&mut [A,B,C,D], 0, 3)` yields `[B,C,D,A]`.
pub(super) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

/// Where an index points after the element at `removed` is deleted.
///
/// The removed slot itself maps to `None`; anything above it shifts down.
pub(super) fn index_after_remove(index: Option<usize>, removed: usize) -> Option<usize> {
    match index {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}

/// Where an index points after `move_item(items, from, to)`.
///
/// The moved element lands at `to`; elements between the vacated slot and
/// the insertion slot shift by one toward the vacancy.
pub(super) fn index_after_move(index: Option<usize>, from: usize, to: usize) -> Option<usize> {
    let i = index?;
    Some(if i == from {
        to
    } else if from < i && i <= to {
        i - 1
    } else if to <= i && i < from {
        i + 1
    } else {
        i
    })
}
