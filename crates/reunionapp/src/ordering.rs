//! # Ordering Model
//!
//! Every ordered collection keeps an integer `order` key per document. The
//! displayed sequence is the documents sorted ascending by that key.
//!
//! A drag-style move names two items: the one being moved and the one it was
//! dropped on. The move is resolved to indices in the displayed sequence and
//! applied as a standard single-element array move:
//!
//! ```text
//! [A, B, C, D]   move A onto C   (from 0, to 2)
//! remove A    -> [B, C, D]
//! insert at 2 -> [B, C, A, D]
//! renumber    ->  1  2  3  4
//! ```
//!
//! After the move every item is renumbered `1..=n`, so the resulting keys are
//! contiguous even when the loaded ones were not. The full assignment is
//! written back with one atomic batch (see [`order_updates`]).
//!
//! Moving an item onto itself, or naming an id that is not in the sequence,
//! is a no-op: [`plan_move`] returns `None` and nothing is written.

use crate::model::{patch, Fields, Record, Stored, ORDER_FIELD};

/// Move the element at `from` so that it ends up at index `to`.
///
/// Both indices must be in bounds.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// Assign `order = position + 1` to every item.
pub fn renumber<T: Record>(items: &mut [Stored<T>]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.record.set_order(i as i64 + 1);
    }
}

/// The sequence after moving `moved_id` onto `target_id`, renumbered.
///
/// Returns `None` when the move would change nothing.
pub fn plan_move<T: Record>(
    items: &[Stored<T>],
    moved_id: &str,
    target_id: &str,
) -> Option<Vec<Stored<T>>> {
    if moved_id == target_id {
        return None;
    }
    let from = items.iter().position(|i| i.id == moved_id)?;
    let to = items.iter().position(|i| i.id == target_id)?;

    let mut next = items.to_vec();
    array_move(&mut next, from, to);
    renumber(&mut next);
    Some(next)
}

/// `(id, {order})` pairs for every item, ready for a batch update.
pub fn order_updates<T: Record>(items: &[Stored<T>]) -> Vec<(String, Fields)> {
    items
        .iter()
        .filter_map(|i| {
            i.record
                .order()
                .map(|order| (i.id.clone(), patch(ORDER_FIELD, order)))
        })
        .collect()
}

/// Order key for an item appended after `items`.
pub fn next_order<T: Record>(items: &[Stored<T>]) -> i64 {
    items
        .iter()
        .filter_map(|i| i.record.order())
        .max()
        .map_or(1, |max| max + 1)
}
