use egui::ViewportBuilder;

use tableforge_core::platform::parameters::gui;
use tableforge_core::project::{default_config_dir, SceneConfig};
use tableforge_core::TableforgeApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = default_config_dir();
    let config = SceneConfig::load_or_default();
    match &config_path {
        Some(path) => log::info!("Using config directory {}", path.display()),
        None => log::warn!("No config directory available, settings will not be saved"),
    }

    eframe::run_native(
        gui::APPLICATION_NAME,
        eframe::NativeOptions {
            viewport: ViewportBuilder::default().with_inner_size([gui::VIEWPORT_X, gui::VIEWPORT_Y]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(TableforgeApp::new(config, config_path)))),
    )
}
