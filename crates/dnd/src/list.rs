use std::{ops::Range, rc::Rc};

use gpui::{
    App, AppContext as _, Context, CursorStyle, ElementId, Entity, EntityId, FocusHandle,
    InteractiveElement as _, IntoElement, KeyBinding, ListSizingBehavior, ParentElement as _,
    Pixels, Point, Render, RenderOnce, SharedString, StatefulInteractiveElement as _,
    StyleRefinement, Styled, UniformListScrollHandle, Window, actions, div,
    prelude::FluentBuilder as _, px, uniform_list,
};
use gpui_app_list::{
    DragController, DropOutcome, HoverTarget, IndentConfig, Item, ItemStore, ItemTemplate,
    OpError, OverTarget, PointerSample, Rejection, is_empty_folder,
};
use gpui_component::list::ListItem;
use gpui_component::scroll::{Scrollbar, ScrollbarState};
use gpui_component::{ActiveTheme as _, StyledExt as _};
use tracing::debug;

use crate::common::{DragGhost, to_f32};

const CONTEXT: &str = "AppList";

actions!(app_list, [CancelDrag]);

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([KeyBinding::new("escape", CancelDrag, Some(CONTEXT))]);
}

type RenderRow = Rc<dyn Fn(usize, &AppListRow, AppListRowState, &mut Window, &mut App) -> ListItem>;

/// Create an [`AppList`].
pub fn app_list<R>(state: &Entity<AppListState>, render_row: R) -> AppList
where
    R: Fn(usize, &AppListRow, AppListRowState, &mut Window, &mut App) -> ListItem + 'static,
{
    AppList::new(state, render_row)
}

/// One rendered row: an item, or the drop zone shown under an empty folder.
#[derive(Clone, Debug)]
pub enum AppListRow {
    Item { index: usize, item: Item },
    EmptyFolder { folder_id: SharedString },
}

impl AppListRow {
    fn hover_target(&self) -> HoverTarget<'_> {
        match self {
            AppListRow::Item { item, .. } => HoverTarget::Item(&item.id),
            AppListRow::EmptyFolder { folder_id } => HoverTarget::EmptyFolder(folder_id),
        }
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            AppListRow::Item { item, .. } => Some(item),
            AppListRow::EmptyFolder { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppListDropTarget {
    Before,
    After,
    /// Dropping here files the dragged item into a folder.
    Inside,
    /// Dropping here would put a folder in a folder.
    Blocked,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AppListRowState {
    pub selected: bool,
    pub dragging: bool,
    pub drop_target: Option<AppListDropTarget>,
    /// Render at folder-child indentation. Follows the drop destination while dragging.
    pub nested: bool,
}

#[derive(Clone)]
struct AppListDrag {
    list_id: EntityId,
    item_id: SharedString,
    label: SharedString,
    folder: bool,
}

#[derive(Default)]
struct AppListStateCallbacks {
    on_change: Option<Rc<dyn Fn(&ItemStore)>>,
    on_reject: Option<Rc<dyn Fn(Rejection)>>,
}

/// State for a reorderable app/folder list.
pub struct AppListState {
    focus_handle: FocusHandle,
    store: ItemStore,
    rows: Vec<AppListRow>,
    controller: DragController,
    drag_origin: Option<Point<Pixels>>,
    container_left: Option<Pixels>,
    scrollbar_state: ScrollbarState,
    scroll_handle: UniformListScrollHandle,
    selected_id: Option<SharedString>,
    rejection: Option<Rejection>,
    callbacks: AppListStateCallbacks,
    render_row: RenderRow,
}

impl AppListState {
    pub fn new(cx: &mut App) -> Self {
        Self {
            focus_handle: cx.focus_handle(),
            store: ItemStore::default(),
            rows: Vec::new(),
            controller: DragController::default(),
            drag_origin: None,
            container_left: None,
            scrollbar_state: ScrollbarState::default(),
            scroll_handle: UniformListScrollHandle::default(),
            selected_id: None,
            rejection: None,
            callbacks: AppListStateCallbacks::default(),
            render_row: Rc::new(|_, _, _, _, _| ListItem::new("app-list-empty")),
        }
    }

    pub fn items(mut self, store: ItemStore) -> Self {
        self.store = store;
        self.rebuild_rows();
        self
    }

    /// Set how far right a row must be dragged to join a folder.
    pub fn indent_config(mut self, config: IndentConfig) -> Self {
        self.controller.set_config(config);
        self
    }

    /// Called with the new store after every committed change.
    pub fn on_change(mut self, on_change: impl Fn(&ItemStore) + 'static) -> Self {
        self.callbacks.on_change = Some(Rc::new(on_change));
        self
    }

    /// Called when a drop is refused, e.g. a folder dropped into a folder.
    pub fn on_reject(mut self, on_reject: impl Fn(Rejection) + 'static) -> Self {
        self.callbacks.on_reject = Some(Rc::new(on_reject));
        self
    }

    pub fn set_items(&mut self, store: ItemStore, cx: &mut Context<Self>) {
        self.store = store;
        self.controller.drag_cancel();
        self.clear_pointer();
        self.rejection = None;
        self.rebuild_rows();
        cx.notify();
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn rows(&self) -> &[AppListRow] {
        &self.rows
    }

    pub fn selected_id(&self) -> Option<&SharedString> {
        self.selected_id.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_id.as_ref().and_then(|id| self.store.find(id))
    }

    pub fn set_selected_id(&mut self, id: Option<SharedString>, cx: &mut Context<Self>) {
        self.selected_id = id;
        cx.notify();
    }

    /// The rejection from the last drop, shown as a hint until the next drag starts.
    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    /// True while the current drag would put a folder into a folder.
    pub fn cannot_nest(&self) -> bool {
        self.controller.cannot_nest(&self.store)
    }

    pub fn add_folder(&mut self, cx: &mut Context<Self>) {
        let next = gpui_app_list::add_folder(&self.store);
        self.commit(next, cx);
    }

    pub fn add_item(&mut self, template: &ItemTemplate, cx: &mut Context<Self>) {
        let next = gpui_app_list::add_item(&self.store, template);
        self.commit(next, cx);
    }

    pub fn rename_item(
        &mut self,
        id: &str,
        label: impl Into<String>,
        cx: &mut Context<Self>,
    ) -> Result<(), OpError> {
        let next = gpui_app_list::rename_item(&self.store, id, label)?;
        self.commit(next, cx);
        Ok(())
    }

    pub fn toggle_sidebar_hidden(&mut self, id: &str, cx: &mut Context<Self>) -> Result<(), OpError> {
        let next = gpui_app_list::toggle_sidebar_hidden(&self.store, id)?;
        self.commit(next, cx);
        Ok(())
    }

    pub fn delete_folder(&mut self, folder_id: &str, cx: &mut Context<Self>) -> Result<(), OpError> {
        let next = gpui_app_list::delete_folder_with_id(&self.store, folder_id)?;
        self.commit(next, cx);
        Ok(())
    }

    pub fn delete_item(&mut self, id: &str, cx: &mut Context<Self>) -> Result<(), OpError> {
        let next = gpui_app_list::delete_item(&self.store, id)?;
        if self.selected_id.as_ref().map(|s| s.as_ref()) == Some(id) {
            self.selected_id = None;
        }
        self.commit(next, cx);
        Ok(())
    }

    fn commit(&mut self, next: ItemStore, cx: &mut Context<Self>) {
        self.store = next;
        self.rejection = None;
        self.rebuild_rows();
        cx.notify();

        if let Some(on_change) = self.callbacks.on_change.as_ref() {
            on_change(&self.store);
        }
    }

    fn rebuild_rows(&mut self) {
        self.rows = build_rows(&self.store);
    }

    fn row_state(&self, row: &AppListRow) -> AppListRowState {
        let active_id = self.controller.active().map(|active| active.id.as_str());
        match row {
            AppListRow::Item { item, .. } => {
                let dragging = active_id == Some(item.id.as_str());
                let selected = self.selected_id.as_ref().map(|s| s.as_ref()) == Some(item.id.as_str());
                let nested = if dragging {
                    self.controller.destination_folder_id(&self.store).is_some()
                        || (self.controller.over().is_none() && item.path.is_some())
                } else {
                    item.path.is_some()
                };
                let drop_target = match self.controller.over() {
                    Some(OverTarget::Item { id, .. }) if *id == item.id => {
                        Some(self.drop_target_for_item(item))
                    }
                    _ => None,
                };
                AppListRowState {
                    selected,
                    dragging,
                    drop_target,
                    nested,
                }
            }
            AppListRow::EmptyFolder { folder_id } => {
                let drop_target = match self.controller.over() {
                    Some(OverTarget::EmptyFolder { folder_id: over, .. })
                        if over.as_str() == folder_id.as_str() =>
                    {
                        Some(if self.cannot_nest() {
                            AppListDropTarget::Blocked
                        } else if self.controller.destination_folder_id(&self.store).is_some() {
                            AppListDropTarget::Inside
                        } else {
                            AppListDropTarget::After
                        })
                    }
                    _ => None,
                };
                AppListRowState {
                    selected: false,
                    dragging: false,
                    drop_target,
                    nested: true,
                }
            }
        }
    }

    fn drop_target_for_item(&self, item: &Item) -> AppListDropTarget {
        if self.cannot_nest() {
            return AppListDropTarget::Blocked;
        }
        let destination = self.controller.destination_folder_id(&self.store);
        if item.is_folder() && destination.as_deref() == Some(item.id.as_str()) {
            AppListDropTarget::Inside
        } else if self.controller.dragging_up() {
            AppListDropTarget::Before
        } else {
            AppListDropTarget::After
        }
    }

    fn on_entry_click(
        &mut self,
        row_ix: usize,
        _event: &gpui::ClickEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let Some(item) = self.rows.get(row_ix).and_then(AppListRow::item) {
            self.selected_id = Some(item.id.clone().into());
            cx.notify();
        }
    }

    fn on_drag_start(&mut self, drag: &AppListDrag, window: &mut Window, cx: &mut Context<Self>) {
        if !self.controller.drag_start(&self.store, &drag.item_id) {
            return;
        }
        self.drag_origin = Some(window.mouse_position());
        self.rejection = None;
        self.selected_id = Some(drag.item_id.clone());
        cx.notify();
    }

    fn clear_pointer(&mut self) {
        self.drag_origin = None;
        self.container_left = None;
    }

    fn on_row_drag_move(
        &mut self,
        row_ix: usize,
        event: &gpui::DragMoveEvent<AppListDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let drag = event.drag(cx);
        if drag.list_id != cx.entity_id() {
            return;
        }

        let mouse_position = event.event.position;
        if !event.bounds.contains(&mouse_position) {
            return;
        }

        self.container_left = Some(event.bounds.origin.x);
        let sample = pointer_sample(self.drag_origin, mouse_position, event.bounds.origin.x);
        self.controller.drag_move(&sample);
        if let Some(row) = self.rows.get(row_ix) {
            self.controller
                .drag_over(&self.store, Some(row.hover_target()));
        }
        cx.notify();
    }

    fn finish_drop(&mut self, cx: &mut Context<Self>) {
        let outcome = self.controller.drag_end(&self.store);
        self.clear_pointer();
        match outcome {
            DropOutcome::Committed(next) => self.commit(next, cx),
            DropOutcome::Cancelled => cx.notify(),
            DropOutcome::Rejected(rejection) => {
                debug!(%rejection, "drop refused");
                self.rejection = Some(rejection);
                cx.notify();
                if let Some(on_reject) = self.callbacks.on_reject.as_ref() {
                    on_reject(rejection);
                }
            }
        }
    }

    fn on_drop_on_row(
        &mut self,
        drag: &AppListDrag,
        row_ix: usize,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if drag.list_id != cx.entity_id() {
            self.controller.drag_cancel();
            self.clear_pointer();
            cx.notify();
            return;
        }

        // The last move event may have landed on a neighbour; the drop row wins.
        if let Some(sample) =
            drop_sample(self.drag_origin, self.container_left, window.mouse_position())
        {
            self.controller.drag_move(&sample);
        }
        if let Some(row) = self.rows.get(row_ix) {
            self.controller
                .drag_over(&self.store, Some(row.hover_target()));
        }
        self.finish_drop(cx);
    }

    /// Abandon the current drag, leaving the store untouched.
    pub fn cancel_drag(&mut self, cx: &mut Context<Self>) {
        if !self.controller.is_dragging() {
            return;
        }
        self.controller.drag_cancel();
        self.clear_pointer();
        cx.notify();
    }

    fn on_drop_outside_rows(
        &mut self,
        _drag: &AppListDrag,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.controller.drag_over(&self.store, None);
        self.finish_drop(cx);
    }
}

impl Render for AppListState {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !cx.has_active_drag() && self.controller.is_dragging() {
            self.controller.drag_cancel();
            self.clear_pointer();
        }

        let render_row = Rc::clone(&self.render_row);
        let state_entity = cx.entity();
        let list_id = cx.entity_id();

        div()
            .id("app-list-state")
            .size_full()
            .relative()
            .child(
                uniform_list("rows", self.rows.len(), {
                    cx.processor(move |state, visible_range: Range<usize>, window, cx| {
                        let drop_target_bg = cx.theme().drop_target;
                        let drag_border = cx.theme().drag_border;
                        let danger = cx.theme().danger;
                        let mut rows = Vec::with_capacity(visible_range.len());
                        for ix in visible_range {
                            let row = state.rows[ix].clone();
                            let row_state = state.row_state(&row);
                            let list_item = (render_row)(ix, &row, row_state, window, cx);

                            let draggable = row.item().filter(|item| !item.disabled).map(|item| {
                                AppListDrag {
                                    list_id,
                                    item_id: item.id.clone().into(),
                                    label: item.label.clone().into(),
                                    folder: item.is_folder(),
                                }
                            });
                            let is_disabled = row.item().is_some_and(|item| item.disabled);

                            let row_el = div()
                                .id(ix)
                                .relative()
                                .child(
                                    list_item
                                        .disabled(is_disabled)
                                        .selected(row_state.selected),
                                )
                                .when_some(row_state.drop_target, |this, target| match target {
                                    AppListDropTarget::Before => {
                                        this.border_t_2().border_color(drag_border)
                                    }
                                    AppListDropTarget::After => {
                                        this.border_b_2().border_color(drag_border)
                                    }
                                    AppListDropTarget::Inside => this
                                        .bg(drop_target_bg.alpha(drop_target_bg.a.max(0.2))),
                                    AppListDropTarget::Blocked => this.bg(danger.alpha(0.15)),
                                })
                                .on_drag_move::<AppListDrag>(cx.listener(
                                    move |this, ev, window, cx| {
                                        this.on_row_drag_move(ix, ev, window, cx);
                                    },
                                ))
                                .on_drop::<AppListDrag>(cx.listener(
                                    move |this, drag, window, cx| {
                                        this.on_drop_on_row(drag, ix, window, cx);
                                    },
                                ))
                                .when(!is_disabled, |this| {
                                    this.on_click(cx.listener(
                                        move |this, click_event, window, cx| {
                                            this.on_entry_click(ix, click_event, window, cx);
                                        },
                                    ))
                                })
                                .when_some(draggable, |this, drag_value| {
                                    let state_entity = state_entity.clone();
                                    this.cursor(CursorStyle::OpenHand).on_drag(
                                        drag_value,
                                        move |drag, _offset, window, cx| {
                                            state_entity.update(cx, |state, cx| {
                                                state.on_drag_start(drag, window, cx);
                                            });
                                            let label = drag.label.clone();
                                            let folder = drag.folder;
                                            cx.new(|_| DragGhost::new(label, folder))
                                        },
                                    )
                                });

                            rows.push(row_el);
                        }
                        rows
                    })
                })
                .on_drop::<AppListDrag>(cx.listener(Self::on_drop_outside_rows))
                .flex_grow()
                .size_full()
                .track_scroll(self.scroll_handle.clone())
                .with_sizing_behavior(ListSizingBehavior::Auto)
                .into_any_element(),
            )
            .child(
                div()
                    .absolute()
                    .top_0()
                    .right_0()
                    .bottom_0()
                    .w(px(12.))
                    .child(Scrollbar::uniform_scroll(
                        &self.scrollbar_state,
                        &self.scroll_handle,
                    )),
            )
    }
}

fn pointer_sample(
    origin: Option<Point<Pixels>>,
    position: Point<Pixels>,
    container_left: Pixels,
) -> PointerSample {
    let origin = origin.unwrap_or(position);
    PointerSample {
        delta_x: to_f32(position.x - origin.x),
        delta_y: to_f32(position.y - origin.y),
        start_x: to_f32(origin.x),
        container_left: to_f32(container_left),
    }
}

/// Re-sample at drop time. Without a container edge from a move event on this list
/// there is nothing to measure the indent against, so the last sample stands.
fn drop_sample(
    origin: Option<Point<Pixels>>,
    container_left: Option<Pixels>,
    position: Point<Pixels>,
) -> Option<PointerSample> {
    container_left.map(|left| pointer_sample(origin, position, left))
}

fn build_rows(store: &ItemStore) -> Vec<AppListRow> {
    let mut rows = Vec::with_capacity(store.len());
    for (index, item) in store.iter().enumerate() {
        rows.push(AppListRow::Item {
            index,
            item: item.clone(),
        });
        if is_empty_folder(store, index) {
            rows.push(AppListRow::EmptyFolder {
                folder_id: item.id.clone().into(),
            });
        }
    }
    rows
}

/// A draggable list of apps and folders.
#[derive(IntoElement)]
pub struct AppList {
    id: ElementId,
    state: Entity<AppListState>,
    style: StyleRefinement,
    render_row: RenderRow,
}

impl AppList {
    pub fn new<R>(state: &Entity<AppListState>, render_row: R) -> Self
    where
        R: Fn(usize, &AppListRow, AppListRowState, &mut Window, &mut App) -> ListItem + 'static,
    {
        Self {
            id: ElementId::Name(format!("app-list-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_row: Rc::new(move |ix, row, row_state, window, cx| {
                render_row(ix, row, row_state, window, cx)
            }),
        }
    }
}

impl Styled for AppList {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for AppList {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state
            .update(cx, |state, _| state.render_row = self.render_row);

        let state = self.state.clone();
        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .on_action(move |_: &CancelDrag, _window, cx| {
                state.update(cx, |state, cx| state.cancel_drag(cx));
            })
            .size_full()
            .child(self.state)
            .refine_style(&self.style)
    }
}

#[cfg(test)]
mod tests {
    use gpui::point;

    use super::*;

    fn labels(rows: &[AppListRow]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                AppListRow::Item { item, .. } => item.id.clone(),
                AppListRow::EmptyFolder { folder_id } => format!("[{folder_id}]"),
            })
            .collect()
    }

    #[test]
    fn empty_folders_get_a_drop_zone_row() {
        let store = ItemStore::new(vec![
            Item::app("home", "Home"),
            Item::folder("empty", "Empty"),
            Item::folder("reports", "Reports"),
            Item::app("q4", "Q4").in_folder("reports"),
            Item::folder("archive", "Archive"),
            Item::app("old", "Old").in_folder("archive").disabled(true),
        ])
        .unwrap();

        assert_eq!(
            labels(&build_rows(&store)),
            vec!["home", "empty", "[empty]", "reports", "q4", "archive", "[archive]", "old"]
        );
    }

    #[test]
    fn item_rows_keep_store_indices() {
        let store = ItemStore::new(vec![
            Item::folder("empty", "Empty"),
            Item::app("home", "Home"),
        ])
        .unwrap();
        let rows = build_rows(&store);
        assert!(matches!(&rows[2], AppListRow::Item { index: 1, item } if item.id == "home"));
        assert_eq!(rows[2].hover_target(), HoverTarget::Item("home"));
        assert_eq!(rows[1].hover_target(), HoverTarget::EmptyFolder("empty"));
    }

    #[test]
    fn drop_without_container_edge_keeps_last_sample() {
        let origin = Some(point(px(200.), px(100.)));
        assert_eq!(drop_sample(origin, None, point(px(400.), px(140.))), None);

        let sample = drop_sample(origin, Some(px(150.)), point(px(260.), px(80.))).unwrap();
        assert_eq!(sample.delta_x, 60.);
        assert_eq!(sample.delta_y, -20.);
        assert_eq!(sample.start_x, 200.);
        assert_eq!(sample.container_left, 150.);
    }
}
