pub mod canvas;
pub mod grid_settings;
pub mod token_panel;
pub mod toolbar;

pub use canvas::show_canvas;
pub use grid_settings::show_grid_panel;
pub use token_panel::show_token_panel;
pub use toolbar::show_toolbar;
