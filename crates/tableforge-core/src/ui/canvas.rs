use egui::{Color32, PointerButton, Pos2, Rect, Sense, Stroke};
use nalgebra::Vector2;

use crate::app::TableforgeApp;
use crate::constants::SCROLL_POINTS_PER_ZOOM_STEP;
use crate::input::{ClickTarget, InputEvent};
use crate::palette::{HOVER_COLOR, SELECTED_RING_COLOR};
use crate::tokens::TokenSnapshot;

const SELECTED_RING_WIDTH: f32 = 3.0;
const BACKGROUND: Color32 = Color32::from_rgb(24, 26, 30);

/// The scene view: map, grid and tokens, plus the pointer and camera input
/// that happens over it.
pub fn show_canvas(ui: &mut egui::Ui, app: &mut TableforgeApp) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let viewport = response.rect;

    handle_camera(ui, app, viewport, &response);
    handle_pointer(ui, app, viewport, &response);

    painter.rect_filled(viewport, 0.0, BACKGROUND);
    paint_map(ui.ctx(), &painter, app, viewport);
    paint_grid(&painter, app, viewport);
    paint_tokens(&painter, app, viewport);
}

fn text_input_active(ctx: &egui::Context) -> bool {
    ctx.memory(|mem| mem.focused().is_some())
}

fn handle_camera(ui: &egui::Ui, app: &mut TableforgeApp, viewport: Rect, response: &egui::Response) {
    let ctx = ui.ctx();
    let keyboard = !text_input_active(ctx);

    let (mut direction, dt, scroll) = ctx.input(|i| {
        let mut direction = Vector2::<f32>::zeros();
        if keyboard {
            if i.key_down(egui::Key::W) || i.key_down(egui::Key::ArrowUp) {
                direction.y += 1.0;
            }
            if i.key_down(egui::Key::S) || i.key_down(egui::Key::ArrowDown) {
                direction.y -= 1.0;
            }
            if i.key_down(egui::Key::D) || i.key_down(egui::Key::ArrowRight) {
                direction.x += 1.0;
            }
            if i.key_down(egui::Key::A) || i.key_down(egui::Key::ArrowLeft) {
                direction.x -= 1.0;
            }
        }
        (direction, i.stable_dt, i.smooth_scroll_delta.y)
    });

    if let Some(pointer) = response.hover_pos() {
        direction += app.camera.edge_direction(viewport, pointer);
    }

    if direction != Vector2::zeros() {
        app.camera.pan_direction(direction, dt);
        ctx.request_repaint();
    }

    if response.dragged_by(PointerButton::Middle) {
        app.camera.drag_by_screen(viewport, response.drag_delta());
    }

    if response.hovered() && scroll != 0.0 {
        app.camera.zoom(scroll / SCROLL_POINTS_PER_ZOOM_STEP);
    }
}

fn handle_pointer(ui: &egui::Ui, app: &mut TableforgeApp, viewport: Rect, response: &egui::Response) {
    let ctx = ui.ctx();
    let (pressed, released, latest, delete) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
            i.key_pressed(egui::Key::Delete),
        )
    });

    // Hover tracking, paused while a token is being dragged
    if app.router.dragging().is_none() {
        let under_pointer = response
            .hover_pos()
            .and_then(|pos| app.registry.token_at(app.camera.screen_to_world(viewport, pos)));
        if under_pointer != app.router.hovered() {
            match under_pointer {
                Some(id) => {
                    app.handle_input(InputEvent::PointerEnter(id));
                }
                None => {
                    if let Some(previous) = app.router.hovered() {
                        app.handle_input(InputEvent::PointerExit(previous));
                    }
                }
            }
        }
    }

    if pressed {
        if let Some(pos) = response.hover_pos() {
            let pointer = app.camera.screen_to_world(viewport, pos);
            let target = match app.registry.token_at(pointer) {
                Some(id) => ClickTarget::Token(id),
                None => ClickTarget::Empty,
            };
            app.handle_input(InputEvent::PrimaryPress { pointer, target });
        }
    }

    if app.router.dragging().is_some() {
        if let Some(pos) = latest {
            let pointer = app.camera.screen_to_world(viewport, pos);
            app.handle_input(InputEvent::PointerMove { pointer });
        }
    }

    if released {
        app.handle_input(InputEvent::PrimaryRelease);
    }

    if delete && !text_input_active(ctx) {
        app.handle_input(InputEvent::DeletePressed);
    }
}

fn paint_map(ctx: &egui::Context, painter: &egui::Painter, app: &mut TableforgeApp, viewport: Rect) {
    let Some(map) = &app.map else {
        return;
    };
    let Some(transform) = app
        .registry
        .grid()
        .and_then(|grid| app.config.map.fit(grid, map.size()))
    else {
        return;
    };

    let (min, max) = transform.world_bounds();
    let rect = Rect::from_two_pos(
        app.camera.world_to_screen(viewport, min),
        app.camera.world_to_screen(viewport, max),
    );
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    let Some(texture) = app.map_texture(ctx).map(|texture| texture.id()) else {
        return;
    };
    painter.image(texture, rect, uv, Color32::WHITE);
}

fn paint_grid(painter: &egui::Painter, app: &TableforgeApp, viewport: Rect) {
    if !app.grid_style.visible {
        return;
    }
    let Some(grid) = app.registry.grid() else {
        return;
    };

    let width = (app.grid_style.line_width * app.camera.pixels_per_unit(viewport)).max(1.0);
    let stroke = Stroke::new(width, app.grid_style.color32());
    for line in grid.lines() {
        painter.line_segment(
            [
                app.camera.world_to_screen(viewport, line.start),
                app.camera.world_to_screen(viewport, line.end),
            ],
            stroke,
        );
    }
}

fn paint_tokens(painter: &egui::Painter, app: &TableforgeApp, viewport: Rect) {
    let cell_size = app.registry.grid().map(|grid| grid.cell_size()).unwrap_or(1.0);
    let ppu = app.camera.pixels_per_unit(viewport);

    // Registration order is draw order: later tokens sit on top
    for token in app.registry.all_tokens() {
        paint_token(painter, &token, app.camera.world_to_screen(viewport, token.position), token.draw_radius(cell_size) * ppu);
    }
}

fn paint_token(painter: &egui::Painter, token: &TokenSnapshot, center: Pos2, radius: f32) {
    let fill = if token.highlighted() { HOVER_COLOR } else { token.color };
    painter.circle_filled(center, radius, fill);

    if token.selected {
        painter.circle_stroke(center, radius + SELECTED_RING_WIDTH, Stroke::new(SELECTED_RING_WIDTH, SELECTED_RING_COLOR));
    }

    if token.selected || token.hovered {
        painter.text(
            center + egui::vec2(0.0, radius + 4.0),
            egui::Align2::CENTER_TOP,
            &token.name,
            egui::FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
}
