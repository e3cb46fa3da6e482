use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::constants::LOG_TARGET_MAP;

pub type Result<T> = std::result::Result<T, MapError>;

#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Map file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load image data: {0}")]
    Decode(#[from] image::ImageError),
}

const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

const DEFAULT_MAP_SIZE: u32 = 512;
const DEFAULT_CHECK_SIZE: u32 = 64;
const DEFAULT_DARK: Rgba<u8> = Rgba([64, 89, 115, 255]); // dark blue-gray
const DEFAULT_LIGHT: Rgba<u8> = Rgba([77, 102, 128, 255]);

/// A decoded background image
#[derive(Debug, Clone)]
pub struct MapImage {
    pub name: String,
    pub image: RgbaImage,
}

impl MapImage {
    pub fn size(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }

    /// Checkered placeholder used when a map cannot be loaded
    pub fn checkerboard() -> Self {
        let image = RgbaImage::from_fn(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE, |x, y| {
            if ((x / DEFAULT_CHECK_SIZE) + (y / DEFAULT_CHECK_SIZE)) % 2 == 0 {
                DEFAULT_DARK
            } else {
                DEFAULT_LIGHT
            }
        });
        Self {
            name: "Default Map".to_string(),
            image,
        }
    }
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

pub fn load_map(path: &Path) -> Result<MapImage> {
    log::info!(target: LOG_TARGET_MAP, "Attempting to load map from: {}", path.display());

    if !path.exists() {
        return Err(MapError::NotFound(path.to_path_buf()));
    }
    if !is_supported(path) {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        return Err(MapError::UnsupportedFormat(format!(".{}", ext)));
    }

    let image = image::open(path)?.to_rgba8();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::info!(target: LOG_TARGET_MAP, "Map loaded successfully! Size: {}x{}", image.width(), image.height());
    Ok(MapImage { name, image })
}

/// Load `path`, falling back to the checkerboard on any error
pub fn load_or_default(path: &Path) -> MapImage {
    match load_map(path) {
        Ok(map) => map,
        Err(e) => {
            log::error!(target: LOG_TARGET_MAP, "{}", e);
            log::info!(target: LOG_TARGET_MAP, "Loading default map...");
            MapImage::checkerboard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tableforge-map-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("dungeon.png")));
        assert!(is_supported(Path::new("cave.JPG")));
        assert!(is_supported(Path::new("/maps/tavern.jpeg")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_checkerboard_pattern() {
        let map = MapImage::checkerboard();
        assert_eq!(map.size(), [512, 512]);
        assert_eq!(*map.image.get_pixel(0, 0), DEFAULT_DARK);
        assert_eq!(*map.image.get_pixel(64, 0), DEFAULT_LIGHT);
        assert_eq!(*map.image.get_pixel(64, 64), DEFAULT_DARK);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/map.png");
        assert!(matches!(load_map(path), Err(MapError::NotFound(_))));
        assert_eq!(load_or_default(path).name, "Default Map");
    }

    #[test]
    fn test_unsupported_format() {
        let dir = scratch_dir("unsupported");
        let path = dir.join("map.bmp");
        std::fs::write(&path, b"not really a bitmap").unwrap();

        match load_map(&path) {
            Err(MapError::UnsupportedFormat(ext)) => assert_eq!(ext, ".bmp"),
            other => panic!("unexpected result: {:?}", other.map(|m| m.name)),
        }
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_png_round_trip() {
        let dir = scratch_dir("png");
        let path = dir.join("arena.png");
        RgbaImage::from_pixel(30, 20, Rgba([200, 10, 10, 255])).save(&path).unwrap();

        let map = load_map(&path).unwrap();
        assert_eq!(map.name, "arena.png");
        assert_eq!(map.size(), [30, 20]);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_png_is_a_decode_error() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("broken.png");
        std::fs::write(&path, b"garbage").unwrap();

        assert!(matches!(load_map(&path), Err(MapError::Decode(_))));
        assert_eq!(load_or_default(&path).size(), [512, 512]);
        std::fs::remove_dir_all(dir).ok();
    }
}
