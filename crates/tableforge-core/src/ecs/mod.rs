pub mod components;
pub mod resources;
pub mod factories;

pub use components::*;
pub use resources::*;
pub use factories::*;

use bevy_ecs::prelude::*;
use crate::grid::GridModel;

/// Build the scene world. The grid is optional: without it, operations that
/// need snapping or validation become no-ops.
pub fn setup_scene_world(grid: Option<GridModel>, defaults: SpawnDefaults) -> World {
    let mut world = World::new();

    // Initialize resources
    if let Some(grid) = grid {
        world.insert_resource(grid);
    }
    world.insert_resource(defaults);
    world.insert_resource(TokenIdAllocator::default());

    world
}

// Query helpers

pub fn get_token_entities(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<TokenId>>();
    query.iter(world).collect()
}

pub fn get_selected_entities(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, (With<TokenId>, With<Selected>)>();
    query.iter(world).collect()
}
