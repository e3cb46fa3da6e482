// Tableforge Core Library
// Re-export all modules for external use

pub mod constants;
pub mod ecs;
pub mod grid;
pub mod input;
pub mod map;
pub mod navigation;
pub mod palette;
pub mod platform;
pub mod project;
pub mod tokens;
pub mod ui;
pub mod app;

pub use app::TableforgeApp;
pub use grid::{GridConfig, GridModel};
pub use tokens::{TokenRegistry, TokenSnapshot};
