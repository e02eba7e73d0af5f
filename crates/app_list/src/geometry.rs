use serde::{Deserialize, Serialize};

/// Horizontal indentation used for folder children, in pixels.
pub const FOLDER_INDENT_PX: f32 = 24.0;

/// Extra distance past the folder indent before a drag counts as indented.
pub const INDENT_GRACE_PX: f32 = 100.0;

/// How far right a dragged row has to travel before it asks to join a folder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndentConfig {
    pub folder_indent: f32,
    pub indent_grace: f32,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            folder_indent: FOLDER_INDENT_PX,
            indent_grace: INDENT_GRACE_PX,
        }
    }
}

impl IndentConfig {
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.folder_indent + self.indent_grace
    }
}

/// One pointer sample of a drag gesture, independent of any UI toolkit.
///
/// Deltas are cumulative since the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub delta_x: f32,
    pub delta_y: f32,
    /// Absolute pointer x at the moment the drag started.
    pub start_x: f32,
    /// Absolute x of the list container's left edge.
    pub container_left: f32,
}

impl PointerSample {
    /// Pointer x relative to the container's left edge.
    #[inline]
    pub fn x_in_container(&self) -> f32 {
        self.start_x + self.delta_x - self.container_left
    }
}

/// Read fresh on every sample; there is no hysteresis.
#[inline]
pub fn is_dragging_up(delta_y: f32) -> bool {
    delta_y < 0.0
}

pub fn is_indented(sample: &PointerSample, config: &IndentConfig) -> bool {
    sample.x_in_container() > config.threshold()
}
