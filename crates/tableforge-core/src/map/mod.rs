/// Background map: image loading and registration to the grid
pub mod binding;
pub mod loader;

pub use binding::{MapBinding, MapTransform};
pub use loader::{is_supported, load_map, load_or_default, MapError, MapImage};
