//! The drag session state machine: `idle -> dragging -> idle`.
//!
//! [`DragController`] is the only stateful piece of the engine. It never holds the
//! [`ItemStore`]; the caller owns the store and passes it in, and a finished gesture
//! hands back the next store through [`DropOutcome::Committed`].

use tracing::{debug, warn};

use crate::error::Rejection;
use crate::geometry::{IndentConfig, PointerSample, is_dragging_up, is_indented};
use crate::item::ItemStore;
use crate::ops::{insert_into_empty_folder, move_folder, move_item};
use crate::resolve::{EmptyFolderDrop, resolve_destination, resolve_empty_folder_destination};
use crate::topology::{folder_block, is_empty_folder};

/// The item being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveItem {
    pub id: String,
    /// Index at drag start.
    pub index: usize,
    pub is_folder: bool,
}

/// What the pointer is over, as reported by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget<'a> {
    Item(&'a str),
    /// The drop zone rendered inside an empty folder.
    EmptyFolder(&'a str),
}

/// A validated hover target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverTarget {
    Item { id: String, index: usize },
    EmptyFolder { folder_id: String, folder_index: usize },
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The next store. Replace the old one with it.
    Committed(ItemStore),
    /// Nothing to drop on; keep the old store.
    Cancelled,
    /// The drop was structurally invalid; keep the old store and tell the user.
    Rejected(Rejection),
}

impl DropOutcome {
    pub fn committed(self) -> Option<ItemStore> {
        match self {
            DropOutcome::Committed(store) => Some(store),
            DropOutcome::Cancelled | DropOutcome::Rejected(_) => None,
        }
    }
}

/// Where a drop would land right now. Recomputed from the session on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPreview {
    /// `None` for top-level.
    pub folder_id: Option<String>,
    /// The active item is a folder and the drop would nest it.
    pub cannot_nest: bool,
}

#[derive(Debug, Clone)]
struct DragSession {
    active: ActiveItem,
    over: Option<OverTarget>,
    dragging_up: bool,
    indented: bool,
}

enum Plan {
    OverItem {
        active_index: usize,
        over_index: usize,
        folder_id: Option<String>,
    },
    OverEmptyFolder {
        active_index: usize,
        folder_index: usize,
        drop: EmptyFolderDrop,
    },
}

impl Plan {
    fn folder_id(&self) -> Option<&str> {
        match self {
            Plan::OverItem { folder_id, .. } => folder_id.as_deref(),
            Plan::OverEmptyFolder { drop, .. } => drop.folder_id.as_deref(),
        }
    }
}

/// Owns the state of one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: IndentConfig,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(config: IndentConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IndentConfig) {
        self.config = config;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn active(&self) -> Option<&ActiveItem> {
        self.session.as_ref().map(|session| &session.active)
    }

    pub fn over(&self) -> Option<&OverTarget> {
        self.session.as_ref().and_then(|session| session.over.as_ref())
    }

    pub fn dragging_up(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.dragging_up)
    }

    pub fn indented(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.indented)
    }

    /// Begin dragging the item with `id`. Returns `false` (and stays idle) for
    /// unknown or disabled items.
    pub fn drag_start(&mut self, store: &ItemStore, id: &str) -> bool {
        let Some(index) = store.position(id) else {
            return false;
        };
        let item = &store[index];
        if item.disabled {
            return false;
        }

        debug!(id, index, "drag start");
        self.session = Some(DragSession {
            active: ActiveItem {
                id: item.id.clone(),
                index,
                is_folder: item.is_folder(),
            },
            over: None,
            dragging_up: false,
            // A child starts out inside its folder.
            indented: item.path.is_some(),
        });
        true
    }

    pub fn drag_move(&mut self, sample: &PointerSample) {
        let config = self.config;
        if let Some(session) = self.session.as_mut() {
            session.dragging_up = is_dragging_up(sample.delta_y);
            session.indented = is_indented(sample, &config);
        }
    }

    /// Update the hover target. Unknown, disabled, or non-empty-folder zone targets
    /// clear it.
    pub fn drag_over(&mut self, store: &ItemStore, target: Option<HoverTarget<'_>>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.over = target.and_then(|target| match target {
            HoverTarget::Item(id) => {
                let index = store.position(id)?;
                if store[index].disabled {
                    return None;
                }
                Some(OverTarget::Item {
                    id: id.to_owned(),
                    index,
                })
            }
            HoverTarget::EmptyFolder(folder_id) => {
                let folder_index = store.position(folder_id)?;
                is_empty_folder(store, folder_index).then(|| OverTarget::EmptyFolder {
                    folder_id: folder_id.to_owned(),
                    folder_index,
                })
            }
        });
    }

    fn plan(&self, store: &ItemStore) -> Option<Plan> {
        let session = self.session.as_ref()?;
        let active_index = store.position(&session.active.id)?;
        match session.over.as_ref()? {
            OverTarget::Item { id, .. } => {
                let over_index = store.position(id)?;
                let folder_id = resolve_destination(
                    store,
                    active_index,
                    over_index,
                    session.dragging_up,
                    session.indented,
                );
                Some(Plan::OverItem {
                    active_index,
                    over_index,
                    folder_id,
                })
            }
            OverTarget::EmptyFolder { folder_id, .. } => {
                let folder_index = store.position(folder_id)?;
                let drop = resolve_empty_folder_destination(
                    store,
                    active_index,
                    folder_index,
                    session.dragging_up,
                    session.indented,
                );
                Some(Plan::OverEmptyFolder {
                    active_index,
                    folder_index,
                    drop,
                })
            }
        }
    }

    /// Where the drop would land, or `None` without a hover target.
    pub fn preview(&self, store: &ItemStore) -> Option<DropPreview> {
        let is_folder = self.active()?.is_folder;
        let plan = self.plan(store)?;
        let folder_id = plan.folder_id().map(str::to_owned);
        Some(DropPreview {
            cannot_nest: is_folder && folder_id.is_some(),
            folder_id,
        })
    }

    /// Destination folder for the current hover; `None` means top-level or no target.
    pub fn destination_folder_id(&self, store: &ItemStore) -> Option<String> {
        self.preview(store).and_then(|preview| preview.folder_id)
    }

    pub fn cannot_nest(&self, store: &ItemStore) -> bool {
        self.preview(store).is_some_and(|preview| preview.cannot_nest)
    }

    /// Drop. Clears the session whatever the outcome.
    pub fn drag_end(&mut self, store: &ItemStore) -> DropOutcome {
        let plan = self.plan(store);
        let Some(session) = self.session.take() else {
            return DropOutcome::Cancelled;
        };
        let Some(plan) = plan else {
            debug!(id = %session.active.id, "drop without target");
            return DropOutcome::Cancelled;
        };

        let next = if session.active.is_folder {
            match plan {
                Plan::OverItem {
                    active_index,
                    over_index,
                    folder_id,
                } => move_folder(store, active_index, over_index, folder_id.as_deref()),
                Plan::OverEmptyFolder {
                    active_index,
                    folder_index,
                    drop,
                } => {
                    // Land next to the target folder's block, never inside it.
                    let end = *folder_block(store, folder_index).end();
                    let to = if active_index < folder_index { end } else { end + 1 };
                    move_folder(store, active_index, to, drop.folder_id.as_deref())
                }
            }
        } else {
            Ok(match plan {
                Plan::OverItem {
                    active_index,
                    over_index,
                    folder_id,
                } => move_item(store, active_index, over_index, folder_id.as_deref()),
                Plan::OverEmptyFolder {
                    active_index, drop, ..
                } => insert_into_empty_folder(store, active_index, &drop),
            })
        };

        match next {
            Ok(next) => match next.validate() {
                Ok(()) => {
                    debug!(id = %session.active.id, "drop committed");
                    DropOutcome::Committed(next)
                }
                Err(err) => {
                    warn!(id = %session.active.id, %err, "discarding drop that breaks the list");
                    DropOutcome::Cancelled
                }
            },
            Err(rejection) => {
                debug!(id = %session.active.id, %rejection, "drop rejected");
                DropOutcome::Rejected(rejection)
            }
        }
    }

    /// Abandon the gesture. Same as dropping with no target.
    pub fn drag_cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(id = %session.active.id, "drag cancelled");
        }
    }
}
