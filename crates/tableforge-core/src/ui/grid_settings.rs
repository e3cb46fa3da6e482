use crate::app::TableforgeApp;
use crate::constants::LOG_TARGET_GRID;

pub fn show_grid_panel(ui: &mut egui::Ui, app: &mut TableforgeApp) {
    ui.heading("Grid");
    ui.add_space(4.0);

    let mut visible = app.grid_style.visible;
    if ui.checkbox(&mut visible, "Show Grid").changed() {
        app.grid_style.toggle_visible();
    }

    egui::Grid::new("grid_geometry").num_columns(2).show(ui, |ui| {
        ui.label("Width (cells):");
        ui.add(egui::DragValue::new(&mut app.grid_edit.width).range(1..=500));
        ui.end_row();

        ui.label("Height (cells):");
        ui.add(egui::DragValue::new(&mut app.grid_edit.height).range(1..=500));
        ui.end_row();

        ui.label("Cell Size:");
        ui.add(
            egui::DragValue::new(&mut app.grid_edit.cell_size)
                .speed(0.05)
                .range(0.1..=10.0),
        );
        ui.end_row();

        ui.label("Offset:");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut app.grid_edit.offset[0]).speed(0.1).prefix("x "));
            ui.add(egui::DragValue::new(&mut app.grid_edit.offset[1]).speed(0.1).prefix("y "));
        });
        ui.end_row();
    });

    let current = app.registry.grid().map(|grid| grid.to_config());
    let dirty = current.as_ref() != Some(&app.grid_edit);
    ui.horizontal(|ui| {
        if ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() {
            log::info!(
                target: LOG_TARGET_GRID,
                "Grid changed to {}x{} cells of {:.2}",
                app.grid_edit.width,
                app.grid_edit.height,
                app.grid_edit.cell_size
            );
            app.apply_grid();
        }
        if ui.add_enabled(dirty, egui::Button::new("Revert")).clicked() {
            if let Some(current) = current {
                app.grid_edit = current;
            }
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Line Width:");
        let prev_width = app.grid_style.line_width;
        if ui.add(egui::Slider::new(&mut app.grid_style.line_width, 0.01..=0.25)).changed() {
            log::debug!(
                target: LOG_TARGET_GRID,
                "Grid line width changed from {:.2} to {:.2}",
                prev_width,
                app.grid_style.line_width
            );
        }
    });
    ui.horizontal(|ui| {
        ui.label("Line Color:");
        ui.color_edit_button_srgba_unmultiplied(&mut app.grid_style.color);
    });

    if let Some(grid) = app.registry.grid() {
        let extent = grid.extent();
        let size = extent.size();
        ui.label(
            egui::RichText::new(format!(
                "Covers ({:.1}, {:.1}) to ({:.1}, {:.1}), {:.1} x {:.1} units",
                extent.min.x, extent.min.y, extent.max.x, extent.max.y, size.x, size.y
            ))
            .small(),
        );
    }
}
