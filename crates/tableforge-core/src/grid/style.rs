use egui::Color32;
use serde::{Deserialize, Serialize};

/// How the grid lines are drawn on top of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub visible: bool,
    /// RGBA, unmultiplied
    pub color: [u8; 4],
    /// Line width in world units
    pub line_width: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            visible: true,
            color: [255, 255, 255, 77], // white at ~30% alpha
            line_width: 0.05,
        }
    }
}

impl GridStyle {
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        log::info!(
            target: crate::constants::LOG_TARGET_GRID,
            "Grid display {}",
            if self.visible { "enabled" } else { "disabled" }
        );
        self.visible
    }

    pub fn color32(&self) -> Color32 {
        let [r, g, b, a] = self.color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.visible { "Hide Grid" } else { "Show Grid" }
    }
}
