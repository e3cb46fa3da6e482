use std::path::{Path, PathBuf};

use egui::{ColorImage, TextureHandle, TextureOptions};
use nalgebra::Point2;

use crate::constants::{LOG_TARGET_CONFIG, LOG_TARGET_GRID, LOG_TARGET_MAP};
use crate::grid::{GridConfig, GridStyle};
use crate::input::{InputEffect, InputEvent, InputRouter};
use crate::map::{self, MapImage};
use crate::navigation::Camera;
use crate::platform::banner::Banner;
use crate::project::SceneConfig;
use crate::tokens::{DropOutcome, TokenRegistry};
use crate::ui;

/// The main application struct
pub struct TableforgeApp {
    pub registry: TokenRegistry,
    pub router: InputRouter,
    pub camera: Camera,
    pub grid_style: GridStyle,

    // Grid geometry being edited in the side panel, applied on request
    pub grid_edit: GridConfig,

    // No map configured leaves the background empty
    pub map: Option<MapImage>,
    map_texture: Option<TextureHandle>,

    pub config: SceneConfig,
    pub config_path: Option<PathBuf>,

    // Last user-facing message for the status bar
    pub status: Option<String>,
}

impl Drop for TableforgeApp {
    fn drop(&mut self) {
        self.save_settings();
    }
}

impl TableforgeApp {
    pub fn new(mut config: SceneConfig, config_path: Option<PathBuf>) -> Self {
        let mut banner = Banner::new();
        banner.format();
        banner.log();

        let registry = match config.build_registry() {
            Ok(registry) => registry,
            Err(e) => {
                log::error!(target: LOG_TARGET_GRID, "Saved grid is unusable ({}), using the default grid", e);
                config.grid = GridConfig::default();
                let mut registry = TokenRegistry::default();
                registry.set_default_color(config.spawn_defaults().color);
                registry.set_default_size(config.spawn_defaults().size);
                registry
            }
        };

        let mut router = InputRouter::new();
        if config.session.quick_start {
            router.toggle_spawn_mode();
        }

        let center = registry
            .grid()
            .map(|grid| grid.extent().center())
            .unwrap_or_else(Point2::origin);
        let camera = Camera::new(center, config.camera.clone());

        let map = config
            .session
            .selected_map_path
            .as_deref()
            .map(map::load_or_default);

        if !config.session.player_name.is_empty() {
            log::info!(target: LOG_TARGET_CONFIG, "Welcome back, {}", config.session.player_name);
        }

        Self {
            registry,
            router,
            camera,
            grid_style: config.grid_style.clone(),
            grid_edit: config.grid.clone(),
            map,
            map_texture: None,
            config,
            config_path,
            status: None,
        }
    }

    /// Route an input event to the tokens and report what happened
    pub fn handle_input(&mut self, event: InputEvent) -> InputEffect {
        let effect = self.router.dispatch(&mut self.registry, event);
        match effect {
            InputEffect::Spawned(id) => self.status = Some(format!("Spawned token {}", id)),
            InputEffect::SpawnRejected => self.status = Some("Cannot spawn a token outside the grid".to_string()),
            InputEffect::Dropped(id, DropOutcome::Reverted(_)) => {
                self.status = Some(format!("Token {} returned to its cell", id))
            }
            InputEffect::Deleted(id) => self.status = Some(format!("Deleted token {}", id)),
            _ => {}
        }
        effect
    }

    /// Apply the edited grid geometry and re-snap the tokens onto it
    pub fn apply_grid(&mut self) {
        match self.registry.reconfigure_grid(&self.grid_edit) {
            Ok(()) => {
                let outside = self.registry.resnap_all();
                self.status = Some(if outside > 0 {
                    format!("Grid updated, {} token(s) now outside the grid", outside)
                } else {
                    "Grid updated".to_string()
                });
            }
            Err(e) => {
                log::error!(target: LOG_TARGET_GRID, "{}", e);
                self.status = Some(e.to_string());
                self.grid_edit = self.registry.grid().map(|grid| grid.to_config()).unwrap_or_default();
            }
        }
    }

    /// Replace the background map. A failed load shows the placeholder.
    pub fn load_map(&mut self, path: &Path) {
        match map::load_map(path) {
            Ok(map) => {
                self.status = Some(format!("Loaded map {}", map.name));
                self.map = Some(map);
                self.config.session.selected_map_path = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!(target: LOG_TARGET_MAP, "{}", e);
                log::info!(target: LOG_TARGET_MAP, "Loading default map...");
                self.status = Some(e.to_string());
                self.map = Some(MapImage::checkerboard());
            }
        }
        self.map_texture = None;
    }

    /// Remove the background map
    pub fn clear_map(&mut self) {
        self.map = None;
        self.map_texture = None;
        self.config.session.selected_map_path = None;
        log::info!(target: LOG_TARGET_MAP, "Map cleared");
    }

    pub fn map_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let map = self.map.as_ref()?;
        Some(self.map_texture.get_or_insert_with(|| {
            let [width, height] = map.size();
            let image = ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                map.image.as_raw(),
            );
            ctx.load_texture("map", image, TextureOptions::LINEAR)
        }))
    }

    /// Re-center the camera on the grid
    pub fn reset_view(&mut self) {
        if let Some(grid) = self.registry.grid() {
            self.camera.center = grid.extent().center();
        }
    }

    fn save_settings(&mut self) {
        self.config.capture(&self.registry);
        self.config.grid_style = self.grid_style.clone();
        self.config.camera = self.camera.config.clone();

        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to_file(path) {
            log::error!(target: LOG_TARGET_CONFIG, "Failed to save settings: {}", e);
        }
    }
}

impl eframe::App for TableforgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("scene_toolbar").show(ctx, |ui| {
            ui::show_toolbar(ui, self);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Tokens: {}", self.registry.len()));
                ui.separator();
                ui.label(self.status.as_deref().unwrap_or("Ready"));
            });
        });

        egui::SidePanel::right("scene_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::show_token_panel(ui, self);
                    ui.separator();
                    ui::show_grid_panel(ui, self);
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                ui::show_canvas(ui, self);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_configured_map_leaves_background_empty() {
        let app = TableforgeApp::new(SceneConfig::default(), None);
        assert!(app.map.is_none());
    }

    #[test]
    fn test_failed_map_load_shows_placeholder() {
        let mut app = TableforgeApp::new(SceneConfig::default(), None);
        app.load_map(Path::new("/definitely/not/here/map.png"));

        let map = app.map.as_ref().unwrap();
        assert_eq!(map.size(), [512, 512]);
        assert_eq!(app.config.session.selected_map_path, None);

        app.clear_map();
        assert!(app.map.is_none());
    }

    #[test]
    fn test_configured_but_missing_map_falls_back() {
        let mut config = SceneConfig::default();
        config.session.selected_map_path = Some(PathBuf::from("/definitely/not/here/crypt.png"));

        let app = TableforgeApp::new(config, None);
        assert_eq!(app.map.as_ref().unwrap().name, "Default Map");
    }
}
