use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PIXELS_PER_CELL;
use crate::grid::GridModel;

/// How a background image is registered to the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapBinding {
    /// Image pixels covering one world unit before scaling
    pub pixels_per_cell: f32,
    /// Stretch the image over the whole grid
    pub scale_to_grid: bool,
}

impl Default for MapBinding {
    fn default() -> Self {
        Self {
            pixels_per_cell: DEFAULT_PIXELS_PER_CELL,
            scale_to_grid: true,
        }
    }
}

/// Placement of the map image in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTransform {
    pub center: Point2<f32>,
    pub scale: Vector2<f32>,
    /// Unscaled image size in world units
    pub image_world_size: Vector2<f32>,
}

impl MapTransform {
    pub fn world_size(&self) -> Vector2<f32> {
        self.image_world_size.component_mul(&self.scale)
    }

    /// Lower-left and upper-right corners in world space
    pub fn world_bounds(&self) -> (Point2<f32>, Point2<f32>) {
        let half = self.world_size() / 2.0;
        (self.center - half, self.center + half)
    }
}

impl MapBinding {
    /// Compute where an image of `pixel_size` goes for the given grid.
    /// `None` for empty images or a non-positive pixel density.
    pub fn fit(&self, grid: &GridModel, pixel_size: [u32; 2]) -> Option<MapTransform> {
        let [pw, ph] = pixel_size;
        if pw == 0 || ph == 0 || !(self.pixels_per_cell > 0.0) {
            return None;
        }

        let image_world_size = Vector2::new(
            pw as f32 / self.pixels_per_cell,
            ph as f32 / self.pixels_per_cell,
        );

        if !self.scale_to_grid {
            return Some(MapTransform {
                center: Point2::origin(),
                scale: Vector2::new(1.0, 1.0),
                image_world_size,
            });
        }

        let grid_world = Vector2::new(
            grid.width() as f32 * grid.cell_size(),
            grid.height() as f32 * grid.cell_size(),
        );
        let offset = grid.offset();

        Some(MapTransform {
            center: Point2::new(grid_world.x / 2.0 + offset.x, grid_world.y / 2.0 + offset.y),
            scale: grid_world.component_div(&image_world_size),
            image_world_size,
        })
    }
}
