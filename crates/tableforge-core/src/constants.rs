// Log targets for the different event categories
pub const LOG_TARGET_GRID: &str = "grid";
pub const LOG_TARGET_TOKENS: &str = "tokens";
pub const LOG_TARGET_MAP: &str = "map";
pub const LOG_TARGET_CONFIG: &str = "config";
pub const LOG_TARGET_INPUT: &str = "input";

// Hit radius of every token, in grid cells, independent of its visual size
pub const TOKEN_HIT_RADIUS_CELLS: f32 = 0.5;

// Default number of map image pixels covering one grid cell
pub const DEFAULT_PIXELS_PER_CELL: f32 = 100.0;

// Scroll distance, in points, that counts as one zoom step
pub const SCROLL_POINTS_PER_ZOOM_STEP: f32 = 500.0;
