use bevy_ecs::prelude::*;
use egui::Color32;
use nalgebra::Point2;

use crate::constants::{LOG_TARGET_TOKENS, TOKEN_HIT_RADIUS_CELLS};
use crate::ecs::*;
use crate::grid::GridModel;
use super::TokenRegistry;

/// Owned copy of a token's state. Changing the token afterwards does not
/// change a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSnapshot {
    pub id: TokenId,
    pub name: String,
    pub color: Color32,
    pub size: TokenSize,
    pub position: Point2<f32>,
    pub selected: bool,
    pub dragging: bool,
    pub hovered: bool,
}

impl TokenSnapshot {
    pub(crate) fn read(world: &World, entity: Entity) -> Option<Self> {
        Some(Self {
            id: *world.get::<TokenId>(entity)?,
            name: world.get::<TokenName>(entity)?.0.clone(),
            color: world.get::<TokenColor>(entity)?.0,
            size: *world.get::<TokenSize>(entity)?,
            position: world.get::<WorldPosition>(entity)?.0,
            selected: world.get::<Selected>(entity).is_some(),
            dragging: world.get::<Dragging>(entity).is_some(),
            hovered: world.get::<Hovered>(entity).is_some(),
        })
    }

    /// Drawn with the hover color while hovered or being dragged
    pub fn highlighted(&self) -> bool {
        self.hovered || self.dragging
    }

    /// Visual radius, scaled by size
    pub fn draw_radius(&self, cell_size: f32) -> f32 {
        TOKEN_HIT_RADIUS_CELLS * cell_size * self.size.scale()
    }

    /// Pointer hit radius, the same for every size
    pub fn hit_radius(cell_size: f32) -> f32 {
        TOKEN_HIT_RADIUS_CELLS * cell_size
    }
}

/// Result of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Landed on a valid cell, now sits at its center
    Committed(Point2<f32>),
    /// Dropped outside the grid, back at the pre-drag position
    Reverted(Point2<f32>),
    /// No grid to validate against, left where it was released
    Released(Point2<f32>),
}

/// Mutable view of one live token.
///
/// Obtained from [`TokenRegistry::token_mut`]. Everything that touches the
/// selection or the token collection goes back through the registry.
pub struct TokenMut<'a> {
    pub(crate) registry: &'a mut TokenRegistry,
    pub(crate) id: TokenId,
    pub(crate) entity: Entity,
}

impl<'a> TokenMut<'a> {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn snapshot(&self) -> Option<TokenSnapshot> {
        TokenSnapshot::read(&self.registry.world, self.entity)
    }

    pub fn position(&self) -> Option<Point2<f32>> {
        self.registry.world.get::<WorldPosition>(self.entity).map(|p| p.0)
    }

    pub fn is_selected(&self) -> bool {
        self.registry.world.get::<Selected>(self.entity).is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.registry.world.get::<Dragging>(self.entity).is_some()
    }

    pub fn set_color(&mut self, color: Color32) {
        if let Some(mut token_color) = self.registry.world.get_mut::<TokenColor>(self.entity) {
            token_color.0 = color;
        }
    }

    pub fn set_size(&mut self, size: TokenSize) {
        if let Some(mut token_size) = self.registry.world.get_mut::<TokenSize>(self.entity) {
            *token_size = size;
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(mut token_name) = self.registry.world.get_mut::<TokenName>(self.entity) {
            token_name.0 = name.into();
        }
    }

    /// The only way to flip the selection flag. Selecting goes through the
    /// registry's exclusivity rule; deselecting the selected token clears the
    /// registry's reference as well.
    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.registry.select_token(self.id);
        } else if self.registry.selected_token() == Some(self.id) {
            self.registry.deselect_all();
        }
    }

    /// Start a drag. Dragging always selects.
    pub fn pointer_down(&mut self, pointer: Point2<f32>) {
        let Some(position) = self.position() else { return };

        let Some(mut token) = self.registry.world.get_entity_mut(self.entity) else { return };
        token
            .insert(Dragging {
                offset: position - pointer,
                original: position,
            })
            .remove::<Hovered>();

        self.set_selected(true);
        log::debug!(target: LOG_TARGET_TOKENS, "Token {} picked up at ({:.2}, {:.2})", self.id, position.x, position.y);
    }

    /// Follow the pointer freely, no snapping while the gesture lasts
    pub fn pointer_move(&mut self, pointer: Point2<f32>) {
        let Some(drag) = self.registry.world.get::<Dragging>(self.entity).copied() else {
            return;
        };
        if let Some(mut position) = self.registry.world.get_mut::<WorldPosition>(self.entity) {
            position.0 = pointer + drag.offset;
        }
    }

    /// End the drag: commit to the snapped cell when it is on the grid,
    /// otherwise bounce back to where the drag started. `None` when no drag
    /// was in progress.
    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        let drag = self.registry.world.get_entity_mut(self.entity)?.take::<Dragging>()?;
        let released = self.position()?;

        let outcome = match self.registry.world.get_resource::<GridModel>() {
            Some(grid) => match grid.snap_if_valid(released) {
                Some(snapped) => DropOutcome::Committed(snapped),
                None => DropOutcome::Reverted(drag.original),
            },
            None => {
                log::warn!(target: LOG_TARGET_TOKENS, "No grid configured, token {} dropped unsnapped", self.id);
                DropOutcome::Released(released)
            }
        };

        match outcome {
            DropOutcome::Committed(target) => {
                self.write_position(target);
                log::debug!(target: LOG_TARGET_TOKENS, "Token {} placed at ({:.2}, {:.2})", self.id, target.x, target.y);
            }
            DropOutcome::Reverted(target) => {
                self.write_position(target);
                log::warn!(target: LOG_TARGET_TOKENS, "Token {} dropped outside the grid, reverted", self.id);
            }
            DropOutcome::Released(_) => {}
        }

        Some(outcome)
    }

    pub fn pointer_enter(&mut self) {
        if self.hover_locked() {
            return;
        }
        if let Some(mut token) = self.registry.world.get_entity_mut(self.entity) {
            token.insert(Hovered);
        }
    }

    pub fn pointer_exit(&mut self) {
        if self.hover_locked() {
            return;
        }
        if let Some(mut token) = self.registry.world.get_entity_mut(self.entity) {
            token.remove::<Hovered>();
        }
    }

    /// Delete-key gesture. Only a selected token can be deleted this way.
    pub fn delete(self) -> bool {
        if !self.is_selected() {
            return false;
        }
        self.destroy();
        true
    }

    /// Unregister from the registry, then despawn. Terminal.
    pub fn destroy(self) {
        self.registry.destroy_token(self.id);
    }

    fn hover_locked(&self) -> bool {
        self.is_selected() || self.is_dragging()
    }

    fn write_position(&mut self, target: Point2<f32>) {
        if let Some(mut position) = self.registry.world.get_mut::<WorldPosition>(self.entity) {
            position.0 = target;
        }
    }
}
