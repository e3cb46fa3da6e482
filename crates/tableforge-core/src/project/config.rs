use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::LOG_TARGET_CONFIG;
use crate::ecs::{SpawnDefaults, TokenSize};
use crate::grid::{GridConfig, GridError, GridModel, GridStyle};
use crate::map::MapBinding;
use crate::navigation::CameraConfig;
use crate::tokens::TokenRegistry;

pub const CONFIG_FILE_NAME: &str = "scene_config.json";
const CONFIG_DIR_NAME: &str = "tableforge";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Defaults applied to newly spawned tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenDefaultsConfig {
    /// RGBA, unmultiplied
    pub color: [u8; 4],
    pub size: TokenSize,
}

impl Default for TokenDefaultsConfig {
    fn default() -> Self {
        Self::from(SpawnDefaults::default())
    }
}

impl From<SpawnDefaults> for TokenDefaultsConfig {
    fn from(defaults: SpawnDefaults) -> Self {
        Self {
            color: defaults.color.to_srgba_unmultiplied(),
            size: defaults.size,
        }
    }
}

impl From<&TokenDefaultsConfig> for SpawnDefaults {
    fn from(config: &TokenDefaultsConfig) -> Self {
        let [r, g, b, a] = config.color;
        SpawnDefaults {
            color: Color32::from_rgba_unmultiplied(r, g, b, a),
            size: config.size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub player_name: String,
    /// Map shown on startup; `None` leaves the background empty
    pub selected_map_path: Option<PathBuf>,
    /// Start in spawn mode
    pub quick_start: bool,
}

/// Everything persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub grid_style: GridStyle,
    pub tokens: TokenDefaultsConfig,
    pub map: MapBinding,
    pub camera: CameraConfig,
    pub session: SessionConfig,
}

impl SceneConfig {
    pub fn save_to_file(&self, dir: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(CONFIG_FILE_NAME), json)?;
        log::info!(target: LOG_TARGET_CONFIG, "Saved scene config to {}", dir.display());
        Ok(())
    }

    /// Missing file yields the defaults
    pub fn load_from_file(dir: &Path) -> Result<Self, ConfigError> {
        let json_path = dir.join(CONFIG_FILE_NAME);
        if json_path.exists() {
            let json = std::fs::read_to_string(&json_path)?;
            let config: SceneConfig = serde_json::from_str(&json)?;
            log::info!(target: LOG_TARGET_CONFIG, "Loaded scene config from {}", json_path.display());
            Ok(config)
        } else {
            log::info!(target: LOG_TARGET_CONFIG, "No scene config at {}, using defaults", json_path.display());
            Ok(SceneConfig::default())
        }
    }

    /// Load from the user config dir, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        let Some(dir) = default_config_dir() else {
            return SceneConfig::default();
        };
        Self::load_from_file(&dir).unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET_CONFIG, "{}; using defaults", e);
            SceneConfig::default()
        })
    }

    pub fn spawn_defaults(&self) -> SpawnDefaults {
        SpawnDefaults::from(&self.tokens)
    }

    /// Build a registry with this config's grid and token defaults
    pub fn build_registry(&self) -> Result<TokenRegistry, GridError> {
        let grid = GridModel::new(&self.grid)?;
        Ok(TokenRegistry::new(Some(grid), self.spawn_defaults()))
    }

    /// Copy the live grid and spawn defaults back before saving
    pub fn capture(&mut self, registry: &TokenRegistry) {
        if let Some(grid) = registry.grid() {
            self.grid = grid.to_config();
        }
        self.tokens = TokenDefaultsConfig::from(registry.defaults());
    }
}

pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tableforge-config-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        let config = SceneConfig::load_from_file(&dir).unwrap();

        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.grid.width, 50);
        assert_eq!(config.tokens.size, TokenSize::Medium);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = scratch_dir("save");
        let mut config = SceneConfig::default();
        config.grid.width = 12;
        config.grid_style.visible = false;
        config.session.player_name = "Mira".to_string();
        config.session.selected_map_path = Some(PathBuf::from("/maps/crypt.png"));

        config.save_to_file(&dir).unwrap();
        let loaded = SceneConfig::load_from_file(&dir).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "grid": { "width": 8, "height": 6, "cell_size": 2.0, "offset": [1.0, 1.0] } }"#,
        )
        .unwrap();

        let config = SceneConfig::load_from_file(&dir).unwrap();
        assert_eq!(config.grid.height, 6);
        assert_eq!(config.camera, CameraConfig::default());
        assert!(config.grid_style.visible);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_partial_sections_keep_their_other_fields() {
        let dir = scratch_dir("partial-sections");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "grid": { "width": 20 }, "camera": { "zoom_speed": 2.0 }, "tokens": { "size": "Large" } }"#,
        )
        .unwrap();

        let config = SceneConfig::load_from_file(&dir).unwrap();
        assert_eq!(config.grid.width, 20);
        assert_eq!(config.grid.height, 50);
        assert_eq!(config.grid.cell_size, 1.0);
        assert_eq!(config.camera.zoom_speed, 2.0);
        assert_eq!(config.camera.max_zoom, 20.0);
        assert_eq!(config.tokens.size, TokenSize::Large);
        assert_eq!(config.tokens.color, TokenDefaultsConfig::default().color);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = scratch_dir("garbage");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "{ not json").unwrap();

        assert!(matches!(SceneConfig::load_from_file(&dir), Err(ConfigError::Json(_))));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_build_registry_and_capture() {
        let mut config = SceneConfig::default();
        config.tokens = TokenDefaultsConfig { color: [255, 0, 0, 255], size: TokenSize::Large };

        let mut registry = config.build_registry().unwrap();
        let id = registry.spawn_token_at_pointer(Point2::new(3.2, 4.9)).unwrap();
        let token = registry.token(id).unwrap();
        assert_eq!(token.color, Color32::RED);
        assert_eq!(token.size, TokenSize::Large);

        registry.set_default_size(TokenSize::Small);
        registry
            .reconfigure_grid(&GridConfig { width: 10, height: 10, cell_size: 1.0, offset: [0.0, 0.0] })
            .unwrap();
        config.capture(&registry);
        assert_eq!(config.tokens.size, TokenSize::Small);
        assert_eq!(config.grid.width, 10);
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let mut config = SceneConfig::default();
        config.grid.cell_size = 0.0;
        assert!(matches!(config.build_registry(), Err(GridError::InvalidCellSize(_))));
    }
}
