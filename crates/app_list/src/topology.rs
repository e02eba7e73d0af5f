//! Queries about where folders start and end in an [`ItemStore`].
//!
//! A *boundary* is a position at the edge of a folder's child run, relative to the
//! drag direction. Dragging up, a drop lands above the hovered row, so the interesting
//! edge is between the hovered row and the row above it. Dragging down, a drop lands
//! below the hovered row, so the edge is between the hovered row and the row below.

use std::ops::RangeInclusive;

use crate::item::{Item, ItemStore};

/// The folder a position relates to: a folder is its own owner, a child is owned by
/// its `path`, a top-level app has none.
pub fn folder_owner_of(item: &Item) -> Option<&str> {
    if item.is_folder() {
        Some(item.id.as_str())
    } else {
        item.path.as_deref()
    }
}

pub fn is_folder_boundary(store: &ItemStore, index: usize, dragging_up: bool) -> bool {
    let Some(item) = store.get(index) else {
        return false;
    };

    if dragging_up {
        // Just below a folder's run: the row above belongs to a folder that `item`
        // is not part of.
        let Some(prev) = index.checked_sub(1).and_then(|ix| store.get(ix)) else {
            return false;
        };
        return match folder_owner_of(prev) {
            Some(folder_id) => !item.is_child_of(folder_id),
            None => false,
        };
    }

    let next = store.get(index + 1);
    if item.is_folder() {
        // Empty folder, or the folder row itself with nothing of its own below.
        return !next.is_some_and(|next| next.is_child_of(&item.id));
    }
    match item.path.as_deref() {
        Some(folder_id) => !next.is_some_and(|next| next.is_child_of(folder_id)),
        None => false,
    }
}

/// The folder in question at a boundary: the one above when dragging up, the one
/// owning (or being) `index` otherwise.
pub fn folder_id_at_boundary(store: &ItemStore, index: usize, dragging_up: bool) -> Option<&str> {
    let ix = if dragging_up {
        index.checked_sub(1)?
    } else {
        index
    };
    store.get(ix).and_then(folder_owner_of)
}

/// The inclusive index range covering the folder at `folder_index` and every child
/// in its contiguous run. Panics if `folder_index` is out of range.
pub fn folder_block(store: &ItemStore, folder_index: usize) -> RangeInclusive<usize> {
    debug_assert!(store[folder_index].is_folder());
    let folder_id = store[folder_index].id.as_str();
    let mut last = folder_index;
    while store
        .get(last + 1)
        .is_some_and(|item| item.is_child_of(folder_id))
    {
        last += 1;
    }
    folder_index..=last
}

/// Whether the folder has no enabled children. Disabled children are invisible.
pub fn is_empty_folder(store: &ItemStore, folder_index: usize) -> bool {
    let Some(folder) = store.get(folder_index) else {
        return false;
    };
    if !folder.is_folder() {
        return false;
    }
    let block = folder_block(store, folder_index);
    store.items()[block.start() + 1..=*block.end()]
        .iter()
        .all(|child| child.disabled)
}
