/// Scene camera: pan, zoom and the mapping between world and screen space.
///
/// World space has y pointing up; egui screen space has y pointing down.
pub mod camera;

pub use camera::{Camera, CameraConfig};
