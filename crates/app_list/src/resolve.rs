//! Decide which folder, if any, a drop would file the dragged item under.
//!
//! Both resolvers are pure: the same inputs always give the same answer.

use crate::item::ItemStore;
use crate::topology::{folder_block, folder_id_at_boundary, is_folder_boundary};

/// Destination folder for dropping `store[active_index]` onto the row at `over_index`.
///
/// `None` means top-level. Rows right above or below a folder's children are
/// ambiguous; there the indent gesture decides between joining and leaving.
pub fn resolve_destination(
    store: &ItemStore,
    active_index: usize,
    over_index: usize,
    dragging_up: bool,
    indented: bool,
) -> Option<String> {
    let (Some(active), Some(over)) = (store.get(active_index), store.get(over_index)) else {
        return None;
    };

    if !dragging_up && over.is_folder() {
        return Some(over.id.clone());
    }

    let boundary = is_folder_boundary(store, over_index, dragging_up);
    if let Some(path) = over.path.as_ref()
        && !boundary
    {
        return Some(path.clone());
    }

    if active.is_folder() {
        return None;
    }

    if boundary && indented {
        return folder_id_at_boundary(store, over_index, dragging_up).map(str::to_owned);
    }

    None
}

/// Where a drop on an empty folder's drop zone lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFolderDrop {
    pub folder_id: Option<String>,
    /// Destination index for a remove-then-insert move of the active item.
    pub index: usize,
}

/// Resolve a drop on the zone shown inside the empty folder at `folder_index`.
///
/// An item coming from below (dragging up) or an indented one joins the folder and
/// lands directly under it. Anything else stays top-level and lands after the
/// folder's block. `folder_index` must index a folder.
pub fn resolve_empty_folder_destination(
    store: &ItemStore,
    active_index: usize,
    folder_index: usize,
    dragging_up: bool,
    indented: bool,
) -> EmptyFolderDrop {
    let folder = &store[folder_index];
    debug_assert!(folder.is_folder());
    let joins = dragging_up || indented;
    let folder_id = joins.then(|| folder.id.clone());

    // Slot in the current sequence, counted before the active item is removed.
    let slot = if joins {
        folder_index + 1
    } else {
        folder_block(store, folder_index).end() + 1
    };
    let index = if active_index < slot { slot - 1 } else { slot };

    EmptyFolderDrop { folder_id, index }
}
