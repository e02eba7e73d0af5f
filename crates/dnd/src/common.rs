use gpui::{
    Context, FontWeight, IntoElement, ParentElement as _, Pixels, Render, SharedString,
    Styled as _, Window, div, prelude::FluentBuilder as _, px,
};
use gpui_component::ActiveTheme as _;

pub(crate) struct DragGhost {
    label: SharedString,
    folder: bool,
}

impl DragGhost {
    pub(crate) fn new(label: SharedString, folder: bool) -> Self {
        Self { label, folder }
    }
}

impl Render for DragGhost {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .px(px(10.))
            .py(px(6.))
            .rounded(px(8.))
            .bg(theme.popover)
            .border_1()
            .border_color(theme.border)
            .shadow_md()
            .text_color(theme.popover_foreground)
            .text_sm()
            .when(self.folder, |this| this.font_weight(FontWeight::MEDIUM))
            .child(self.label.clone())
    }
}

/// Convert a pixel distance into the engine's plain `f32` units.
pub(crate) fn to_f32(pixels: Pixels) -> f32 {
    pixels.into()
}
