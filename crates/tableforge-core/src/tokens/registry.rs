use bevy_ecs::prelude::*;
use egui::Color32;
use nalgebra::Point2;
use std::collections::HashMap;

use crate::constants::LOG_TARGET_TOKENS;
use crate::ecs::{self, *};
use crate::grid::{GridConfig, GridError, GridModel};
use super::{TokenMut, TokenSnapshot};

/// Owns every live token of a scene and the single selection.
///
/// Tokens are entities in the registry's world; the grid model and spawn
/// defaults are resources of that same world. Only the registry adds to or
/// removes from the live collection.
pub struct TokenRegistry {
    pub(crate) world: World,
    /// Live tokens in creation order
    live: Vec<TokenId>,
    entities: HashMap<TokenId, Entity>,
    selected: Option<TokenId>,
}

impl TokenRegistry {
    pub fn new(grid: Option<GridModel>, defaults: SpawnDefaults) -> Self {
        Self {
            world: ecs::setup_scene_world(grid, defaults),
            live: Vec::new(),
            entities: HashMap::new(),
            selected: None,
        }
    }

    pub fn with_grid(grid: GridModel) -> Self {
        Self::new(Some(grid), SpawnDefaults::default())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access, for instantiating tokens outside the registry
    /// before handing them to [`register_token`](Self::register_token)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn grid(&self) -> Option<&GridModel> {
        self.world.get_resource::<GridModel>()
    }

    pub fn set_grid(&mut self, grid: GridModel) {
        self.world.insert_resource(grid);
    }

    /// Apply a new grid geometry. Token positions are left alone, see
    /// [`resnap_all`](Self::resnap_all).
    pub fn reconfigure_grid(&mut self, config: &GridConfig) -> Result<(), GridError> {
        match self.world.get_resource_mut::<GridModel>() {
            Some(mut grid) => grid.reconfigure(config),
            None => {
                self.world.insert_resource(GridModel::new(config)?);
                Ok(())
            }
        }
    }

    /// Snap every resting token to the current grid. Returns how many of
    /// them ended up on a cell outside the grid; those are kept.
    pub fn resnap_all(&mut self) -> usize {
        let Some(grid) = self.world.get_resource::<GridModel>().cloned() else {
            log::warn!(target: LOG_TARGET_TOKENS, "No grid configured, nothing to re-snap");
            return 0;
        };

        self.forget_despawned();
        let mut out_of_bounds = 0;
        let mut query = self
            .world
            .query_filtered::<(&TokenId, &mut WorldPosition), Without<Dragging>>();
        for (id, mut position) in query.iter_mut(&mut self.world) {
            // Detached entities keep their TokenId but are not live
            if !self.entities.contains_key(id) {
                continue;
            }
            position.0 = grid.snap_to_grid(position.0);
            if !grid.is_valid(grid.world_to_grid(position.0)) {
                log::warn!(target: LOG_TARGET_TOKENS, "Token {} is outside the reconfigured grid", id);
                out_of_bounds += 1;
            }
        }
        out_of_bounds
    }

    pub fn defaults(&self) -> SpawnDefaults {
        self.world.get_resource::<SpawnDefaults>().copied().unwrap_or_default()
    }

    pub fn set_default_color(&mut self, color: Color32) {
        self.world.get_resource_or_insert_with(SpawnDefaults::default).color = color;
    }

    pub fn set_default_size(&mut self, size: TokenSize) {
        self.world.get_resource_or_insert_with(SpawnDefaults::default).size = size;
    }

    /// Create a token on the cell under `position`.
    ///
    /// Placement outside the grid is rejected silently: no token is created
    /// and `None` is returned.
    pub fn spawn_token(&mut self, position: Point2<f32>, color: Color32, size: TokenSize) -> Option<TokenId> {
        let Some(grid) = self.grid() else {
            log::warn!(target: LOG_TARGET_TOKENS, "No grid configured, cannot spawn token");
            return None;
        };
        let Some(snapped) = grid.snap_if_valid(position) else {
            log::warn!(target: LOG_TARGET_TOKENS, "Cannot spawn token outside grid at ({:.2}, {:.2})", position.x, position.y);
            return None;
        };

        self.forget_despawned();
        let name = format!("Token_{}", self.live.len() + 1);
        let (_, entity) = ecs::create_token_entity(&mut self.world, name, snapped, color, size);
        let id = self.register_token(entity)?;

        log::info!(target: LOG_TARGET_TOKENS, "Spawned token {} at ({:.2}, {:.2})", id, snapped.x, snapped.y);
        Some(id)
    }

    /// Spawn under the pointer with the default color and size
    pub fn spawn_token_at_pointer(&mut self, pointer: Point2<f32>) -> Option<TokenId> {
        let defaults = self.defaults();
        self.spawn_token(pointer, defaults.color, defaults.size)
    }

    /// Add an existing token entity to the live collection. Registering the
    /// same token again changes nothing. `None` if the entity is not a token.
    pub fn register_token(&mut self, entity: Entity) -> Option<TokenId> {
        let Some(id) = self.world.get::<TokenId>(entity).copied() else {
            log::warn!(target: LOG_TARGET_TOKENS, "Entity {:?} is not a token, not registering", entity);
            return None;
        };

        if !self.entities.contains_key(&id) {
            self.entities.insert(id, entity);
            self.live.push(id);
            // A token arriving with a stale selection flag must not break exclusivity
            if self.world.get::<Selected>(entity).is_some() && self.selected != Some(id) {
                if let Some(mut token) = self.world.get_entity_mut(entity) {
                    token.remove::<Selected>();
                }
            }
        }
        Some(id)
    }

    /// Remove a token from the live collection, keeping its entity. Clears the
    /// selection if it pointed at this token. Returns the entity so it can be
    /// registered again; `None` if the token was not registered.
    pub fn unregister_token(&mut self, id: TokenId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.live.retain(|live| *live != id);

        if self.selected == Some(id) {
            self.selected = None;
            if let Some(mut token) = self.world.get_entity_mut(entity) {
                token.remove::<Selected>();
            }
        }
        Some(entity)
    }

    /// Make `id` the selected token. A different previously selected token
    /// loses its flag before the new one gains it.
    pub fn select_token(&mut self, id: TokenId) {
        self.forget_despawned();
        let Some(&entity) = self.entities.get(&id) else {
            log::warn!(target: LOG_TARGET_TOKENS, "Token {} is not registered, cannot select", id);
            return;
        };
        if self.selected == Some(id) {
            return;
        }

        if let Some(previous) = self.selected.take() {
            self.clear_selected_flag(previous);
        }
        // Selected tokens never show the hover state
        if let Some(mut token) = self.world.get_entity_mut(entity) {
            token.insert(Selected).remove::<Hovered>();
        }
        self.selected = Some(id);
        log::debug!(target: LOG_TARGET_TOKENS, "Selected token {}", id);
    }

    pub fn deselect_all(&mut self) {
        self.forget_despawned();
        if let Some(previous) = self.selected.take() {
            self.clear_selected_flag(previous);
            log::debug!(target: LOG_TARGET_TOKENS, "Deselected token {}", previous);
        }
    }

    /// Reaction to a primary click that hit neither a token nor the UI
    pub fn on_empty_space_click(&mut self) {
        self.deselect_all();
    }

    /// Destroy the selected token, if any, and return its id
    pub fn delete_selected_token(&mut self) -> Option<TokenId> {
        self.forget_despawned();
        let id = self.selected?;
        self.destroy_token(id);
        self.selected = None;
        Some(id)
    }

    /// Unregister, then despawn. Returns false for unknown tokens.
    pub fn destroy_token(&mut self, id: TokenId) -> bool {
        let Some(entity) = self.unregister_token(id) else {
            return false;
        };
        self.world.despawn(entity);
        log::info!(target: LOG_TARGET_TOKENS, "Deleted token {}", id);
        true
    }

    pub fn selected_token(&self) -> Option<TokenId> {
        self.selected
    }

    pub fn selected_snapshot(&self) -> Option<TokenSnapshot> {
        self.token(self.selected?)
    }

    pub fn token(&self, id: TokenId) -> Option<TokenSnapshot> {
        let entity = *self.entities.get(&id)?;
        TokenSnapshot::read(&self.world, entity)
    }

    pub fn token_mut(&mut self, id: TokenId) -> Option<TokenMut<'_>> {
        self.forget_despawned();
        let entity = *self.entities.get(&id)?;
        Some(TokenMut { registry: self, id, entity })
    }

    pub fn selected_token_mut(&mut self) -> Option<TokenMut<'_>> {
        let id = self.selected?;
        self.token_mut(id)
    }

    /// Copies of every live token in creation order
    pub fn all_tokens(&self) -> Vec<TokenSnapshot> {
        self.live
            .iter()
            .filter_map(|id| self.token(*id))
            .collect()
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.entities
            .get(&id)
            .is_some_and(|entity| self.world.get_entity(*entity).is_some())
    }

    pub fn len(&self) -> usize {
        self.live.iter().filter(|id| self.contains(**id)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topmost token whose hit circle contains `point`. Later tokens are
    /// drawn above earlier ones, so they win.
    pub fn token_at(&self, point: Point2<f32>) -> Option<TokenId> {
        let cell_size = self.grid().map(|grid| grid.cell_size()).unwrap_or(1.0);
        let radius = TokenSnapshot::hit_radius(cell_size);

        self.live.iter().rev().copied().find(|id| {
            self.entities
                .get(id)
                .and_then(|entity| self.world.get::<WorldPosition>(*entity))
                .is_some_and(|position| nalgebra::distance(&position.0, &point) <= radius)
        })
    }

    fn clear_selected_flag(&mut self, id: TokenId) {
        if let Some(&entity) = self.entities.get(&id) {
            if let Some(mut token) = self.world.get_entity_mut(entity) {
                token.remove::<Selected>();
            }
        }
    }

    /// Drop bookkeeping for tokens whose entity was despawned behind the
    /// registry's back through [`world_mut`](Self::world_mut)
    fn forget_despawned(&mut self) {
        let gone: Vec<TokenId> = self
            .entities
            .iter()
            .filter(|(_, entity)| self.world.get_entity(**entity).is_none())
            .map(|(id, _)| *id)
            .collect();
        for id in gone {
            log::warn!(target: LOG_TARGET_TOKENS, "Token {} was despawned without unregistering", id);
            self.entities.remove(&id);
            self.live.retain(|live| *live != id);
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::with_grid(GridModel::default())
    }
}
