use crate::app::TableforgeApp;
use crate::constants::LOG_TARGET_MAP;
use crate::input::InputEvent;
use crate::platform::parameters::gui;

const MAP_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn show_toolbar(ui: &mut egui::Ui, app: &mut TableforgeApp) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 10.0;
        ui.label(egui::RichText::new(gui::APPLICATION_NAME).strong());
        ui.separator();

        let spawn_label = if app.router.spawn_mode() { "Spawn Mode: ON" } else { "Spawn Mode: OFF" };
        if ui.selectable_label(app.router.spawn_mode(), spawn_label).clicked() {
            app.router.toggle_spawn_mode();
        }

        if ui.button(app.grid_style.toggle_label()).clicked() {
            app.grid_style.toggle_visible();
        }

        let has_selection = app.registry.selected_token().is_some();
        if ui.add_enabled(has_selection, egui::Button::new("Delete Selected")).clicked() {
            app.handle_input(InputEvent::DeletePressed);
        }

        ui.separator();
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Map:");
                let map_name = app.map.as_ref().map_or("None", |map| map.name.as_str());
                ui.label(egui::RichText::new(map_name).strong());
                if ui.button("Browse...").clicked() {
                    let picked = rfd::FileDialog::new()
                        .add_filter("Map images", &MAP_EXTENSIONS)
                        .pick_file();
                    match picked {
                        Some(path) => app.load_map(&path),
                        None => log::debug!(target: LOG_TARGET_MAP, "Map selection cancelled"),
                    }
                }
                if ui.add_enabled(app.map.is_some(), egui::Button::new("Clear")).clicked() {
                    app.clear_map();
                }
                ui.checkbox(&mut app.config.map.scale_to_grid, "Fit to Grid");
            });
        });

        if ui.button("Reset View").clicked() {
            app.reset_view();
        }

        ui.menu_button("Hotkeys", |ui| {
            ui.heading("Keyboard Shortcuts");
            ui.separator();
            for (key, action) in [
                ("Delete", "Delete selected token"),
                ("W A S D / Arrows", "Pan camera"),
                ("Middle drag", "Pan camera"),
                ("Scroll", "Zoom"),
            ] {
                ui.horizontal(|ui| {
                    ui.label(key);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(action);
                    });
                });
            }
        });
    });
}
