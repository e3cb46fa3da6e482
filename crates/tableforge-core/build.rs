use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Dependency versions live in the workspace Cargo.toml
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_cargo_toml_path = Path::new(&manifest_dir).join("../../Cargo.toml");
    let workspace_cargo_toml = fs::read_to_string(&workspace_cargo_toml_path).unwrap_or_default();

    let mut egui_version = "unknown";
    let mut bevy_ecs_version = "unknown";
    let mut nalgebra_version = "unknown";

    for line in workspace_cargo_toml.lines() {
        if line.starts_with("egui = ") {
            egui_version = line.split('"').nth(1).unwrap_or("unknown");
        } else if line.starts_with("bevy_ecs = ") {
            bevy_ecs_version = line.split('"').nth(1).unwrap_or("unknown");
        } else if line.starts_with("nalgebra = ") {
            nalgebra_version = line.split('"').nth(1).unwrap_or("unknown");
        }
    }

    println!("cargo:rerun-if-changed={}", workspace_cargo_toml_path.display());
    // These will be available as env!() variables at compile time
    println!("cargo:rustc-env=EGUI_VERSION={}", egui_version);
    println!("cargo:rustc-env=BEVY_ECS_VERSION={}", bevy_ecs_version);
    println!("cargo:rustc-env=NALGEBRA_VERSION={}", nalgebra_version);
}
