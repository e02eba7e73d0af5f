use std::collections::{HashMap, HashSet};
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::geometry::IndentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Folder,
    App,
}

/// One row of the app list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub disabled: bool,
    /// Id of the enclosing folder. `None` means top-level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub sidebar_hidden: bool,
}

impl Item {
    pub fn app(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ItemKind::App,
            disabled: false,
            path: None,
            sidebar_hidden: false,
        }
    }

    pub fn folder(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Folder,
            ..Self::app(id, label)
        }
    }

    pub fn in_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.path = Some(folder_id.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn sidebar_hidden(mut self, hidden: bool) -> Self {
        self.sidebar_hidden = hidden;
        self
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }

    #[inline]
    pub fn is_child_of(&self, folder_id: &str) -> bool {
        self.path.as_deref() == Some(folder_id)
    }
}

/// The ordered sequence of items.
///
/// Order is both the display order and the shape of folder membership: the children
/// of a folder always form one contiguous run directly below it. A store is never
/// edited in place; every operation in [`crate::ops`] returns a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Build a store from an initial snapshot, checking every structural invariant.
    pub fn new(items: impl Into<Vec<Item>>) -> Result<Self, SnapshotError> {
        let store = Self {
            items: items.into(),
        };
        store.validate()?;
        Ok(store)
    }

    pub(crate) fn from_vec(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.items)
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// The children of `folder_id`, in order.
    pub fn children_of<'a>(&'a self, folder_id: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |item| item.is_child_of(folder_id))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }

    /// Check the structural invariants: unique ids, no nested folders, and every
    /// child inside the contiguous run directly below its folder.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        let mut kinds = HashMap::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(SnapshotError::DuplicateId {
                    id: item.id.clone(),
                });
            }
            if item.is_folder() && item.path.is_some() {
                return Err(SnapshotError::NestedFolder {
                    id: item.id.clone(),
                });
            }
            kinds.insert(item.id.as_str(), item.kind);
        }

        // The folder whose run we are currently inside, if any.
        let mut open_folder: Option<&str> = None;
        for item in &self.items {
            match (&item.path, item.kind) {
                (None, ItemKind::Folder) => open_folder = Some(item.id.as_str()),
                (None, ItemKind::App) => open_folder = None,
                (Some(path), _) => {
                    match kinds.get(path.as_str()) {
                        None => {
                            return Err(SnapshotError::UnknownFolder {
                                id: item.id.clone(),
                                path: path.clone(),
                            });
                        }
                        Some(ItemKind::App) => {
                            return Err(SnapshotError::PathNotFolder {
                                id: item.id.clone(),
                                path: path.clone(),
                            });
                        }
                        Some(ItemKind::Folder) => {}
                    }
                    if open_folder != Some(path.as_str()) {
                        return Err(SnapshotError::DetachedChild {
                            id: item.id.clone(),
                            path: path.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl Index<usize> for ItemStore {
    type Output = Item;

    fn index(&self, index: usize) -> &Item {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl TryFrom<Vec<Item>> for ItemStore {
    type Error = SnapshotError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<ItemStore> for Vec<Item> {
    fn from(store: ItemStore) -> Self {
        store.items
    }
}

/// The on-disk shape of an app list: indentation settings plus the initial items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppListSnapshot {
    #[serde(default)]
    pub config: IndentConfig,
    pub items: ItemStore,
}

impl AppListSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
