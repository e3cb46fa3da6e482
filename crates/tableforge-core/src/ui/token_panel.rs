use egui::{Button, Color32, Stroke};

use crate::app::TableforgeApp;
use crate::ecs::TokenSize;
use crate::palette::{self, PRESET_COLORS, SELECTED_RING_COLOR};

const SWATCH_SIZE: f32 = 24.0;

/// Palette, size picker and the list of live tokens
pub fn show_token_panel(ui: &mut egui::Ui, app: &mut TableforgeApp) {
    ui.heading("Tokens");

    let selected = app.registry.selected_snapshot();
    let defaults = app.registry.defaults();
    let (current_color, current_size) = match &selected {
        Some(token) => (token.color, token.size),
        None => (defaults.color, defaults.size),
    };

    ui.label(match &selected {
        Some(token) => format!("Editing {} ({})", token.name, token.id),
        None => "Defaults for new tokens".to_string(),
    });

    ui.horizontal_wrapped(|ui| {
        for (name, color) in PRESET_COLORS {
            let stroke = if color == current_color {
                Stroke::new(2.0, SELECTED_RING_COLOR)
            } else {
                Stroke::new(1.0, Color32::DARK_GRAY)
            };
            let swatch = Button::new("")
                .fill(color)
                .stroke(stroke)
                .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
            if ui.add(swatch).on_hover_text(name).clicked() {
                palette::apply_color(&mut app.registry, color);
            }
        }
    });

    let mut size = current_size;
    egui::ComboBox::from_label("Size")
        .selected_text(size.display_name())
        .show_ui(ui, |ui| {
            for option in TokenSize::ALL {
                ui.selectable_value(&mut size, option, option.display_name());
            }
        });
    if size != current_size {
        palette::apply_size(&mut app.registry, size);
    }

    if let Some(token) = &selected {
        let mut name = token.name.clone();
        ui.horizontal(|ui| {
            ui.label("Name:");
            if ui.text_edit_singleline(&mut name).changed() {
                if let Some(mut token) = app.registry.selected_token_mut() {
                    token.set_name(name);
                }
            }
        });
    }

    ui.separator();
    let tokens = app.registry.all_tokens();
    if tokens.is_empty() {
        ui.label(egui::RichText::new("No tokens. Turn on spawn mode and click the grid.").small());
    }
    for token in tokens {
        let label = format!(
            "{} {} ({:.1}, {:.1})",
            token.id, token.name, token.position.x, token.position.y
        );
        let response = ui.selectable_label(token.selected, label);
        if response.clicked() {
            if token.selected {
                app.registry.deselect_all();
            } else {
                app.registry.select_token(token.id);
            }
        }
    }
}
