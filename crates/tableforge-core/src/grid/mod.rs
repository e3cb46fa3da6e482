/// Grid coordinate system and its presentation settings
pub mod model;
pub mod style;

pub use model::{GridConfig, GridCoord, GridError, GridExtent, GridLine, GridModel};
pub use style::GridStyle;
