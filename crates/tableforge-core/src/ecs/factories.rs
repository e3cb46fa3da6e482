use bevy_ecs::prelude::*;
use egui::Color32;
use nalgebra::Point2;
use crate::ecs::components::*;
use crate::ecs::resources::*;
use crate::grid::GridModel;

/// Entity Factory Pattern for creating token entities
/// These functions encapsulate the "recipe" for a token and ensure it carries
/// every component the registry and the renderer query for.

/// Factory for creating a token entity.
///
/// The position is snapped to the grid when one is configured, without a
/// bounds check; callers that need validated placement check first. The
/// entity is not registered anywhere yet.
pub fn create_token_entity(
    world: &mut World,
    name: String,
    position: Point2<f32>,
    color: Color32,
    size: TokenSize,
) -> (TokenId, Entity) {
    let id = world.get_resource_or_insert_with(TokenIdAllocator::default).allocate();

    let position = match world.get_resource::<GridModel>() {
        Some(grid) => grid.snap_to_grid(position),
        None => position,
    };

    let entity = world
        .spawn(TokenBundle {
            id,
            name: TokenName(name),
            color: TokenColor(color),
            size,
            position: WorldPosition(position),
        })
        .id();

    (id, entity)
}

/// Factory for creating a token with the scene's spawn defaults
pub fn create_default_token_entity(
    world: &mut World,
    name: String,
    position: Point2<f32>,
) -> (TokenId, Entity) {
    let defaults = world
        .get_resource::<SpawnDefaults>()
        .copied()
        .unwrap_or_default();
    create_token_entity(world, name, position, defaults.color, defaults.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    #[test]
    fn test_factory_snaps_and_allocates_ids() {
        let mut world = World::new();
        world.insert_resource(GridModel::new(&GridConfig::default()).unwrap());

        let (first, entity) = create_token_entity(
            &mut world,
            "Goblin".to_string(),
            Point2::new(2.2, 4.9),
            Color32::RED,
            TokenSize::Small,
        );
        let (second, _) = create_default_token_entity(&mut world, "Orc".to_string(), Point2::new(0.0, 0.0));

        assert_ne!(first, second);
        assert!(second > first);
        assert_eq!(world.get::<WorldPosition>(entity).unwrap().0, Point2::new(2.5, 4.5));
        assert_eq!(world.get::<TokenSize>(entity), Some(&TokenSize::Small));
    }

    #[test]
    fn test_factory_without_grid_keeps_raw_position() {
        let mut world = World::new();
        let (_, entity) = create_default_token_entity(&mut world, "Loose".to_string(), Point2::new(0.3, 0.7));

        assert_eq!(world.get::<WorldPosition>(entity).unwrap().0, Point2::new(0.3, 0.7));
        assert_eq!(world.get::<TokenColor>(entity).unwrap().0, Color32::BLUE);
    }
}
