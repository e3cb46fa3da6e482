use egui::{Pos2, Rect, Vec2};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Pan and zoom behaviour of the scene camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World units per second for keyboard and edge panning
    pub pan_speed: f32,
    pub pan_border_thickness: f32,
    pub use_edge_panning: bool,
    pub use_middle_mouse_drag: bool,

    pub zoom_speed: f32,
    /// Limits of the half-height of the view, in world units
    pub min_zoom: f32,
    pub max_zoom: f32,

    pub use_boundaries: bool,
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 20.0,
            pan_border_thickness: 10.0,
            use_edge_panning: true,
            use_middle_mouse_drag: true,
            zoom_speed: 4.0,
            min_zoom: 5.0,
            max_zoom: 20.0,
            use_boundaries: false,
            min: [-50.0, -50.0],
            max: [50.0, 50.0],
        }
    }
}

/// Orthographic 2D camera. World y points up, screen y points down.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub center: Point2<f32>,
    /// Half of the visible world height
    pub ortho_size: f32,
    pub config: CameraConfig,
}

impl Camera {
    pub fn new(center: Point2<f32>, config: CameraConfig) -> Self {
        let ortho_size = ((config.min_zoom + config.max_zoom) / 2.0).max(f32::EPSILON);
        Self { center, ortho_size, config }
    }

    pub fn pixels_per_unit(&self, viewport: Rect) -> f32 {
        viewport.height() / (2.0 * self.ortho_size)
    }

    pub fn world_to_screen(&self, viewport: Rect, world: Point2<f32>) -> Pos2 {
        let ppu = self.pixels_per_unit(viewport);
        viewport.center() + Vec2::new((world.x - self.center.x) * ppu, -(world.y - self.center.y) * ppu)
    }

    pub fn screen_to_world(&self, viewport: Rect, screen: Pos2) -> Point2<f32> {
        let ppu = self.pixels_per_unit(viewport);
        let delta = screen - viewport.center();
        Point2::new(self.center.x + delta.x / ppu, self.center.y - delta.y / ppu)
    }

    pub fn pan(&mut self, world_delta: Vector2<f32>) {
        self.center += world_delta;
        if self.config.use_boundaries {
            self.center.x = self.center.x.clamp(self.config.min[0], self.config.max[0]);
            self.center.y = self.center.y.clamp(self.config.min[1], self.config.max[1]);
        }
    }

    /// Keyboard or edge panning: `direction` components in -1..=1
    pub fn pan_direction(&mut self, direction: Vector2<f32>, dt: f32) {
        self.pan(direction * self.config.pan_speed * dt);
    }

    /// Middle-mouse drag: the world follows the pointer
    pub fn drag_by_screen(&mut self, viewport: Rect, screen_delta: Vec2) {
        if !self.config.use_middle_mouse_drag {
            return;
        }
        let ppu = self.pixels_per_unit(viewport);
        self.pan(Vector2::new(-screen_delta.x / ppu, screen_delta.y / ppu));
    }

    /// Direction to pan when the pointer rests near a viewport edge
    pub fn edge_direction(&self, viewport: Rect, pointer: Pos2) -> Vector2<f32> {
        if !self.config.use_edge_panning || !viewport.contains(pointer) {
            return Vector2::zeros();
        }
        let border = self.config.pan_border_thickness;
        let mut direction = Vector2::zeros();
        if pointer.x >= viewport.max.x - border {
            direction.x += 1.0;
        }
        if pointer.x <= viewport.min.x + border {
            direction.x -= 1.0;
        }
        if pointer.y <= viewport.min.y + border {
            direction.y += 1.0;
        }
        if pointer.y >= viewport.max.y - border {
            direction.y -= 1.0;
        }
        direction
    }

    /// Positive `scroll` zooms in
    pub fn zoom(&mut self, scroll: f32) {
        self.ortho_size = (self.ortho_size - scroll * self.config.zoom_speed)
            .clamp(self.config.min_zoom, self.config.max_zoom);
    }
}
