mod common;
mod list;

pub use list::{
    AppList, AppListDropTarget, AppListRow, AppListRowState, AppListState, CancelDrag, app_list,
};

use gpui::App;

/// Register the list's key bindings. Call once at startup.
pub fn init(cx: &mut App) {
    list::init(cx);
}
