use bevy_ecs::prelude::*;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Integer cell address on the grid. Not every pair is a valid cell,
/// use [`GridModel::is_valid`] to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Serializable grid geometry, as read from the scene config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    pub offset: [f32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            cell_size: 1.0,
            offset: [0.0, 0.0],
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("grid offset must be finite, got ({0}, {1})")]
    InvalidOffset(f32, f32),
}

/// A world-space line segment of the drawn grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: Point2<f32>,
    pub end: Point2<f32>,
}

/// World-space rectangle covered by the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridExtent {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl GridExtent {
    pub fn size(&self) -> Vector2<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point2<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// The grid coordinate system shared by every token in a scene.
///
/// Holds only configuration; all conversions are total functions. Lives in
/// the scene world as a resource so tokens and the registry read the same
/// geometry.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GridModel {
    width: i32,
    height: i32,
    cell_size: f32,
    offset: Vector2<f32>,
}

impl GridModel {
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        if config.width <= 0 || config.height <= 0 {
            return Err(GridError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        if !config.cell_size.is_finite() || config.cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(config.cell_size));
        }
        let [ox, oy] = config.offset;
        if !ox.is_finite() || !oy.is_finite() {
            return Err(GridError::InvalidOffset(ox, oy));
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            offset: Vector2::new(ox, oy),
        })
    }

    /// Replace the geometry. Previously computed coordinates become stale,
    /// callers have to re-snap whatever they placed.
    pub fn reconfigure(&mut self, config: &GridConfig) -> Result<(), GridError> {
        *self = Self::new(config)?;
        log::info!(
            target: crate::constants::LOG_TARGET_GRID,
            "Grid reconfigured to {}x{} cells of {:.2} at ({:.2}, {:.2})",
            self.width, self.height, self.cell_size, self.offset.x, self.offset.y
        );
        Ok(())
    }

    pub fn to_config(&self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            offset: [self.offset.x, self.offset.y],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn offset(&self) -> Vector2<f32> {
        self.offset
    }

    /// Cell containing `world`. No clamping: points outside the grid map to
    /// out-of-range coordinates.
    pub fn world_to_grid(&self, world: Point2<f32>) -> GridCoord {
        let col = ((world.x - self.offset.x) / self.cell_size).floor() as i32;
        let row = ((world.y - self.offset.y) / self.cell_size).floor() as i32;
        GridCoord { col, row }
    }

    /// Center of the cell, the canonical snap target.
    pub fn grid_to_world(&self, coord: GridCoord) -> Point2<f32> {
        let half = self.cell_size / 2.0;
        Point2::new(
            coord.col as f32 * self.cell_size + half + self.offset.x,
            coord.row as f32 * self.cell_size + half + self.offset.y,
        )
    }

    pub fn snap_to_grid(&self, world: Point2<f32>) -> Point2<f32> {
        self.grid_to_world(self.world_to_grid(world))
    }

    pub fn is_valid(&self, coord: GridCoord) -> bool {
        coord.col >= 0 && coord.col < self.width && coord.row >= 0 && coord.row < self.height
    }

    /// Snaps `world` and returns the snapped point only if it lands on a cell
    /// inside the grid.
    pub fn snap_if_valid(&self, world: Point2<f32>) -> Option<Point2<f32>> {
        let snapped = self.snap_to_grid(world);
        self.is_valid(self.world_to_grid(snapped)).then_some(snapped)
    }

    pub fn extent(&self) -> GridExtent {
        let min = Point2::from(self.offset);
        let max = min
            + Vector2::new(
                self.width as f32 * self.cell_size,
                self.height as f32 * self.cell_size,
            );
        GridExtent { min, max }
    }

    /// `width + 1` vertical lines followed by `height + 1` horizontal lines.
    pub fn lines(&self) -> Vec<GridLine> {
        let GridExtent { min, max } = self.extent();
        let mut lines = Vec::with_capacity((self.width + self.height + 2) as usize);

        for x in 0..=self.width {
            let wx = min.x + x as f32 * self.cell_size;
            lines.push(GridLine {
                start: Point2::new(wx, min.y),
                end: Point2::new(wx, max.y),
            });
        }

        for y in 0..=self.height {
            let wy = min.y + y as f32 * self.cell_size;
            lines.push(GridLine {
                start: Point2::new(min.x, wy),
                end: Point2::new(max.x, wy),
            });
        }

        lines
    }
}

impl Default for GridModel {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
            offset: Vector2::new(config.offset[0], config.offset[1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: i32, height: i32, cell_size: f32, offset: [f32; 2]) -> GridModel {
        GridModel::new(&GridConfig { width, height, cell_size, offset }).unwrap()
    }

    #[test]
    fn test_world_to_grid_and_back() {
        let grid = grid(50, 50, 1.0, [0.0, 0.0]);

        assert_eq!(grid.world_to_grid(Point2::new(3.2, 7.9)), GridCoord::new(3, 7));
        assert_eq!(grid.grid_to_world(GridCoord::new(3, 7)), Point2::new(3.5, 7.5));
    }

    #[test]
    fn test_world_to_grid_floors_negative_positions() {
        let grid = grid(10, 10, 2.0, [0.0, 0.0]);

        assert_eq!(grid.world_to_grid(Point2::new(-0.1, -3.9)), GridCoord::new(-1, -2));
        assert!(!grid.is_valid(GridCoord::new(-1, -2)));
    }

    #[test]
    fn test_offset_and_cell_size_are_applied() {
        let grid = grid(8, 4, 2.5, [10.0, -5.0]);

        assert_eq!(grid.world_to_grid(Point2::new(12.4, -5.0)), GridCoord::new(0, 0));
        assert_eq!(grid.world_to_grid(Point2::new(12.6, -2.4)), GridCoord::new(1, 1));
        assert_eq!(grid.grid_to_world(GridCoord::new(1, 1)), Point2::new(13.75, -1.25));
    }

    #[test]
    fn test_snap_is_idempotent() {
        let grids = [
            grid(50, 50, 1.0, [0.0, 0.0]),
            grid(7, 3, 0.75, [-2.0, 1.25]),
            grid(20, 20, 3.0, [100.0, 100.0]),
        ];
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(3.2, 7.9),
            Point2::new(-10.3, 4.4),
            Point2::new(99.99, 100.01),
            Point2::new(1.5, -0.75),
        ];

        for grid in &grids {
            for p in points {
                let once = grid.snap_to_grid(p);
                assert_eq!(grid.snap_to_grid(once), once);
                assert_eq!(grid.world_to_grid(once), grid.world_to_grid(p));
            }
        }
    }

    #[test]
    fn test_is_valid_bounds() {
        let grid = grid(5, 3, 1.0, [0.0, 0.0]);

        assert!(grid.is_valid(GridCoord::new(0, 0)));
        assert!(grid.is_valid(GridCoord::new(4, 2)));
        assert!(!grid.is_valid(GridCoord::new(5, 2)));
        assert!(!grid.is_valid(GridCoord::new(4, 3)));
        assert!(!grid.is_valid(GridCoord::new(-1, 0)));
    }

    #[test]
    fn test_snap_if_valid() {
        let grid = grid(5, 5, 1.0, [0.0, 0.0]);

        assert_eq!(grid.snap_if_valid(Point2::new(3.1, 3.9)), Some(Point2::new(3.5, 3.5)));
        assert_eq!(grid.snap_if_valid(Point2::new(-10.0, -10.0)), None);
        assert_eq!(grid.snap_if_valid(Point2::new(5.0, 0.5)), None);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad_size = GridConfig { width: 0, ..GridConfig::default() };
        assert_eq!(
            GridModel::new(&bad_size),
            Err(GridError::InvalidDimensions { width: 0, height: 50 })
        );

        let bad_cell = GridConfig { cell_size: -1.0, ..GridConfig::default() };
        assert_eq!(GridModel::new(&bad_cell), Err(GridError::InvalidCellSize(-1.0)));

        let bad_offset = GridConfig { offset: [f32::NAN, 0.0], ..GridConfig::default() };
        assert!(matches!(GridModel::new(&bad_offset), Err(GridError::InvalidOffset(_, _))));
    }

    #[test]
    fn test_reconfigure_keeps_old_geometry_on_error() {
        let mut grid = grid(5, 5, 1.0, [0.0, 0.0]);
        let bad = GridConfig { height: -2, ..grid.to_config() };

        assert!(grid.reconfigure(&bad).is_err());
        assert_eq!(grid.height(), 5);

        let good = GridConfig { width: 10, cell_size: 2.0, ..grid.to_config() };
        grid.reconfigure(&good).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.grid_to_world(GridCoord::new(0, 0)), Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_grid_lines_cover_extent() {
        let grid = grid(3, 2, 2.0, [1.0, 1.0]);
        let lines = grid.lines();

        assert_eq!(lines.len(), 4 + 3);
        assert_eq!(lines[0].start, Point2::new(1.0, 1.0));
        assert_eq!(lines[0].end, Point2::new(1.0, 5.0));
        assert_eq!(lines[3].start, Point2::new(7.0, 1.0));
        assert_eq!(lines[6].end, Point2::new(7.0, 5.0));

        let extent = grid.extent();
        assert_eq!(extent.center(), Point2::new(4.0, 3.0));
        assert_eq!(extent.size(), Vector2::new(6.0, 4.0));
    }
}
