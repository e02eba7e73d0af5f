//! Store transforms. Every function takes the current [`ItemStore`] by reference and
//! returns the next one; nothing is edited in place and nothing is half-applied.

use tracing::debug;

use crate::error::{OpError, Rejection};
use crate::item::{Item, ItemStore};
use crate::resolve::EmptyFolderDrop;
use crate::topology::folder_block;

/// Move one non-folder item from `from` to `to` (remove, then reinsert) and file it
/// under `destination`, or at the top level when that is `None`.
///
/// `from` must be in range.
pub fn move_item(
    store: &ItemStore,
    from: usize,
    to: usize,
    destination: Option<&str>,
) -> ItemStore {
    let mut items = store.items().to_vec();
    let to = to.min(items.len().saturating_sub(1));
    let mut item = items.remove(from);
    item.path = destination.map(str::to_owned);
    items.insert(to, item);
    ItemStore::from_vec(items)
}

/// Move the folder at `from` together with its children as one block.
///
/// `to` is the index of the hovered row in the current store: moving up, the block
/// lands before it; moving down, right after it. Folders never get a parent, so a
/// non-`None` `destination` is refused. `from` must index a folder.
pub fn move_folder(
    store: &ItemStore,
    from: usize,
    to: usize,
    destination: Option<&str>,
) -> Result<ItemStore, Rejection> {
    if let Some(destination) = destination {
        debug!(folder = %store[from].id, destination, "refusing to nest folder");
        return Err(Rejection::FolderIntoFolder);
    }

    debug_assert!(store[from].is_folder(), "`{}` is not a folder", store[from].id);
    let block = folder_block(store, from);
    let last = *block.end();
    if block.contains(&to) {
        return Ok(store.clone());
    }

    let mut items = store.items().to_vec();
    let unit: Vec<Item> = items.drain(block).collect();
    let len = unit.len();
    let at = if to > last { to + 1 - len } else { to };
    let at = at.min(items.len());
    items.splice(at..at, unit);
    Ok(ItemStore::from_vec(items))
}

/// Remove the folder at `folder_index`; its children become top-level in place.
///
/// `folder_index` must index a folder. Use [`delete_folder_with_id`] for input that
/// has not been checked.
pub fn delete_folder(store: &ItemStore, folder_index: usize) -> ItemStore {
    debug_assert!(
        store[folder_index].is_folder(),
        "`{}` is not a folder",
        store[folder_index].id
    );
    let block = folder_block(store, folder_index);
    let mut items = store.items().to_vec();
    for child in &mut items[block.start() + 1..=*block.end()] {
        child.path = None;
    }
    items.remove(folder_index);
    ItemStore::from_vec(items)
}

/// Relocate the active item as resolved for a drop on an empty folder's zone.
pub fn insert_into_empty_folder(
    store: &ItemStore,
    active_index: usize,
    drop: &EmptyFolderDrop,
) -> ItemStore {
    move_item(store, active_index, drop.index, drop.folder_id.as_deref())
}

/// Template for a new app added through [`add_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTemplate {
    pub label: String,
    /// Prefix for the generated id, e.g. `"app"` gives `app-1`, `app-2`, ...
    pub id_prefix: String,
}

impl ItemTemplate {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id_prefix: "app".to_string(),
        }
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

fn fresh_id(store: &ItemStore, prefix: &str) -> String {
    (1..)
        .map(|n| format!("{prefix}-{n}"))
        .find(|id| !store.contains(id))
        .unwrap_or_else(|| prefix.to_string())
}

/// Append an empty top-level folder.
pub fn add_folder(store: &ItemStore) -> ItemStore {
    let id = fresh_id(store, "folder");
    let mut items = store.items().to_vec();
    items.push(Item::folder(id, "New folder"));
    ItemStore::from_vec(items)
}

/// Append a top-level app built from `template`.
pub fn add_item(store: &ItemStore, template: &ItemTemplate) -> ItemStore {
    let id = fresh_id(store, &template.id_prefix);
    let mut items = store.items().to_vec();
    items.push(Item::app(id, template.label.clone()));
    ItemStore::from_vec(items)
}

fn update_item(
    store: &ItemStore,
    id: &str,
    f: impl FnOnce(&mut Item),
) -> Result<ItemStore, OpError> {
    let ix = store.position(id).ok_or_else(|| OpError::item_not_found(id))?;
    let mut items = store.items().to_vec();
    f(&mut items[ix]);
    Ok(ItemStore::from_vec(items))
}

pub fn rename_item(
    store: &ItemStore,
    id: &str,
    label: impl Into<String>,
) -> Result<ItemStore, OpError> {
    let label = label.into();
    update_item(store, id, |item| item.label = label)
}

pub fn toggle_sidebar_hidden(store: &ItemStore, id: &str) -> Result<ItemStore, OpError> {
    update_item(store, id, |item| item.sidebar_hidden = !item.sidebar_hidden)
}

/// [`delete_folder`] by id.
pub fn delete_folder_with_id(store: &ItemStore, folder_id: &str) -> Result<ItemStore, OpError> {
    match store.position(folder_id) {
        Some(ix) if store[ix].is_folder() => Ok(delete_folder(store, ix)),
        Some(_) => Err(OpError::new(format!("`{folder_id}` is not a folder"))),
        None => Err(OpError::item_not_found(folder_id)),
    }
}

/// Delete an app, or flatten a folder.
pub fn delete_item(store: &ItemStore, id: &str) -> Result<ItemStore, OpError> {
    let ix = store.position(id).ok_or_else(|| OpError::item_not_found(id))?;
    if store[ix].is_folder() {
        return Ok(delete_folder(store, ix));
    }
    let mut items = store.items().to_vec();
    items.remove(ix);
    Ok(ItemStore::from_vec(items))
}
