use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_app_list::{AppListSnapshot, FOLDER_INDENT_PX, ItemStore, ItemTemplate};
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::list::ListItem;
use gpui_component::{ActiveTheme as _, Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_dnd_app_list::{AppListRow, AppListRowState, AppListState, app_list};
use tracing::{info, warn};

pub struct AppListExample {
    list: Entity<AppListState>,
    _subscriptions: Vec<Subscription>,
}

impl AppListExample {
    pub fn view(snapshot: AppListSnapshot, _window: &mut Window, cx: &mut App) -> Entity<Self> {
        let list = cx.new(|cx| {
            AppListState::new(cx)
                .indent_config(snapshot.config)
                .items(snapshot.items)
                .on_change(|store| info!(items = store.len(), "app list changed"))
                .on_reject(|rejection| info!(%rejection, "drop rejected"))
        });
        cx.new(|cx| {
            let _subscriptions = vec![cx.observe(&list, |_, _, cx| cx.notify())];
            Self {
                list,
                _subscriptions,
            }
        })
    }

    fn selected(&self, cx: &App) -> Option<String> {
        self.list
            .read(cx)
            .selected_id()
            .map(|id| id.to_string())
    }
}

impl Render for AppListExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let list = self.list.read(cx);
        let selected = list
            .selected_item()
            .map(|item| format!("{} ({})", item.label, item.id))
            .unwrap_or_else(|| "<none>".to_string());
        let status = if list.cannot_nest() || list.rejection().is_some() {
            Some("Cannot put a folder inside a folder")
        } else {
            None
        };
        let dump = render_dump(dump_store(list.store()));

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("App List"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Tip: drag apps to reorder. Dropping onto a folder row files the app inside it. At the edge of a folder, drag to the right to join it or keep left to step out. Folders move with their children and never nest.",
                    ))
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(format!("Selected: {selected}")),
                    )
                    .when_some(status, |this, status| {
                        this.child(div().text_sm().text_color(theme.danger).child(status))
                    }),
            )
            .child(
                h_flex()
                    .gap_x_2()
                    .child(
                        Button::new("app-list-add-folder")
                            .label("Add folder")
                            .ghost()
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.list.update(cx, |list, cx| list.add_folder(cx));
                            })),
                    )
                    .child(
                        Button::new("app-list-add-app")
                            .label("Add app")
                            .ghost()
                            .on_click(cx.listener(|this, _, _window, cx| {
                                this.list.update(cx, |list, cx| {
                                    list.add_item(&ItemTemplate::new("New app"), cx)
                                });
                            })),
                    )
                    .child(
                        Button::new("app-list-rename")
                            .label("Rename selected")
                            .ghost()
                            .on_click(cx.listener(|this, _, _window, cx| {
                                let Some(id) = this.selected(cx) else {
                                    return;
                                };
                                this.list.update(cx, |list, cx| {
                                    let Some(label) = list
                                        .selected_item()
                                        .map(|item| format!("{} (renamed)", item.label))
                                    else {
                                        return;
                                    };
                                    if let Err(err) = list.rename_item(&id, label, cx) {
                                        warn!(%err, "rename failed");
                                    }
                                });
                            })),
                    )
                    .child(
                        Button::new("app-list-toggle-hidden")
                            .label("Toggle sidebar")
                            .ghost()
                            .on_click(cx.listener(|this, _, _window, cx| {
                                let Some(id) = this.selected(cx) else {
                                    return;
                                };
                                this.list.update(cx, |list, cx| {
                                    if let Err(err) = list.toggle_sidebar_hidden(&id, cx) {
                                        warn!(%err, "toggle failed");
                                    }
                                });
                            })),
                    )
                    .child(
                        Button::new("app-list-delete")
                            .label("Delete selected")
                            .ghost()
                            .on_click(cx.listener(|this, _, _window, cx| {
                                let Some(id) = this.selected(cx) else {
                                    return;
                                };
                                this.list.update(cx, |list, cx| {
                                    if let Err(err) = list.delete_item(&id, cx) {
                                        warn!(%err, "delete failed");
                                    }
                                });
                            })),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_x_3()
                    .child(
                        v_flex()
                            .w(px(420.))
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("List"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .child(app_list(
                                        &self.list,
                                        move |ix, row, row_state, _window, cx| {
                                            render_app_row(ix, row, row_state, cx)
                                        },
                                    )),
                            ),
                    )
                    .child(
                        v_flex()
                            .flex_1()
                            .min_w(px(0.))
                            .h_full()
                            .gap_y_2()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .child("Debug (current order)"),
                            )
                            .child(
                                div()
                                    .flex_1()
                                    .min_h(px(0.))
                                    .rounded(px(12.))
                                    .border_1()
                                    .border_color(theme.border)
                                    .bg(theme.background)
                                    .p(px(12.))
                                    .child(dump),
                            ),
                    ),
            )
    }
}

fn render_app_row(ix: usize, row: &AppListRow, row_state: AppListRowState, cx: &mut App) -> ListItem {
    let theme = cx.theme();
    let indent = if row_state.nested {
        px(FOLDER_INDENT_PX)
    } else {
        px(0.)
    };

    let content = match row {
        AppListRow::Item { item, .. } => {
            let icon = if item.is_folder() {
                IconName::Folder
            } else {
                IconName::File
            };
            h_flex()
                .gap_x_2()
                .items_center()
                .child(Icon::from(icon).small().text_color(theme.muted_foreground))
                .child(
                    div()
                        .when(item.is_folder(), |this| this.font_weight(FontWeight::MEDIUM))
                        .child(item.label.clone()),
                )
                .when(item.sidebar_hidden, |this| {
                    this.child(
                        Icon::from(IconName::EyeOff)
                            .small()
                            .text_color(theme.muted_foreground),
                    )
                })
        }
        AppListRow::EmptyFolder { .. } => h_flex().child(
            div()
                .text_sm()
                .text_color(theme.muted_foreground)
                .child("Drop apps here"),
        ),
    };

    ListItem::new(ix)
        .pl(px(10.) + indent)
        .when(row_state.dragging, |this| this.opacity(0.4))
        .child(content)
}

fn dump_store(store: &ItemStore) -> String {
    store
        .iter()
        .enumerate()
        .map(|(ix, item)| {
            let indent = if item.path.is_some() { "  " } else { "" };
            let mut flags = String::new();
            if item.disabled {
                flags.push_str(" [disabled]");
            }
            if item.sidebar_hidden {
                flags.push_str(" [hidden]");
            }
            format!("{ix:02}  {indent}{}{flags}", item.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_sm().child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}
