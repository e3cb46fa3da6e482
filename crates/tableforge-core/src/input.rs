//! Translates discrete input events into core calls.
//!
//! The device layer (egui canvas, tests, anything else) resolves hit tests
//! and emits [`InputEvent`]s; the router keeps track of which token is being
//! dragged or hovered and forwards to the registry.

use nalgebra::Point2;

use crate::constants::LOG_TARGET_INPUT;
use crate::ecs::TokenId;
use crate::tokens::{DropOutcome, TokenRegistry};

/// What a primary click landed on, as decided by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Token(TokenId),
    Ui,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed. `target` is the hit-test result at `pointer`.
    PrimaryPress { pointer: Point2<f32>, target: ClickTarget },
    /// Pointer moved while the primary button is held
    PointerMove { pointer: Point2<f32> },
    PrimaryRelease,
    PointerEnter(TokenId),
    PointerExit(TokenId),
    DeletePressed,
}

/// What the router did with an event, for the caller's feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEffect {
    None,
    Spawned(TokenId),
    SpawnRejected,
    DragStarted(TokenId),
    Dropped(TokenId, DropOutcome),
    Deselected,
    Deleted(TokenId),
}

#[derive(Debug, Default)]
pub struct InputRouter {
    spawn_mode: bool,
    dragging: Option<TokenId>,
    hovered: Option<TokenId>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_mode(&self) -> bool {
        self.spawn_mode
    }

    pub fn toggle_spawn_mode(&mut self) -> bool {
        self.spawn_mode = !self.spawn_mode;
        log::info!(
            target: LOG_TARGET_INPUT,
            "Token spawn mode {}",
            if self.spawn_mode { "ON - click to place tokens" } else { "OFF" }
        );
        self.spawn_mode
    }

    pub fn dragging(&self) -> Option<TokenId> {
        self.dragging
    }

    pub fn hovered(&self) -> Option<TokenId> {
        self.hovered
    }

    /// Forget about tokens that no longer exist
    fn prune(&mut self, registry: &TokenRegistry) {
        if self.dragging.is_some_and(|id| !registry.contains(id)) {
            self.dragging = None;
        }
        if self.hovered.is_some_and(|id| !registry.contains(id)) {
            self.hovered = None;
        }
    }

    pub fn dispatch(&mut self, registry: &mut TokenRegistry, event: InputEvent) -> InputEffect {
        self.prune(registry);

        match event {
            InputEvent::PrimaryPress { pointer, target } => self.primary_press(registry, pointer, target),
            InputEvent::PointerMove { pointer } => {
                if let Some(id) = self.dragging {
                    if let Some(mut token) = registry.token_mut(id) {
                        token.pointer_move(pointer);
                    }
                }
                InputEffect::None
            }
            InputEvent::PrimaryRelease => {
                let Some(id) = self.dragging.take() else {
                    return InputEffect::None;
                };
                registry
                    .token_mut(id)
                    .and_then(|mut token| token.pointer_up())
                    .map_or(InputEffect::None, |outcome| InputEffect::Dropped(id, outcome))
            }
            InputEvent::PointerEnter(id) => {
                if let Some(previous) = self.hovered.replace(id).filter(|previous| *previous != id) {
                    if let Some(mut token) = registry.token_mut(previous) {
                        token.pointer_exit();
                    }
                }
                if let Some(mut token) = registry.token_mut(id) {
                    token.pointer_enter();
                }
                InputEffect::None
            }
            InputEvent::PointerExit(id) => {
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                if let Some(mut token) = registry.token_mut(id) {
                    token.pointer_exit();
                }
                InputEffect::None
            }
            InputEvent::DeletePressed => match registry.selected_token_mut() {
                Some(token) => {
                    let id = token.id();
                    if token.delete() {
                        if self.dragging == Some(id) {
                            self.dragging = None;
                        }
                        InputEffect::Deleted(id)
                    } else {
                        InputEffect::None
                    }
                }
                None => InputEffect::None,
            },
        }
    }

    fn primary_press(&mut self, registry: &mut TokenRegistry, pointer: Point2<f32>, target: ClickTarget) -> InputEffect {
        if target == ClickTarget::Ui {
            return InputEffect::None;
        }

        // Spawn mode places a token on every click that is not on the UI,
        // whether or not a token is already under the pointer
        let spawned = if self.spawn_mode {
            Some(registry.spawn_token_at_pointer(pointer))
        } else {
            None
        };

        let effect = match target {
            ClickTarget::Token(id) => match registry.token_mut(id) {
                Some(mut token) => {
                    token.pointer_down(pointer);
                    self.dragging = Some(id);
                    self.hovered = None;
                    InputEffect::DragStarted(id)
                }
                None => InputEffect::None,
            },
            ClickTarget::Empty => {
                let had_selection = registry.selected_token().is_some();
                registry.on_empty_space_click();
                if had_selection { InputEffect::Deselected } else { InputEffect::None }
            }
            ClickTarget::Ui => InputEffect::None,
        };

        match spawned {
            Some(Some(id)) => InputEffect::Spawned(id),
            Some(None) => InputEffect::SpawnRejected,
            None => effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridConfig, GridModel};

    fn setup() -> (TokenRegistry, InputRouter) {
        let grid = GridModel::new(&GridConfig { width: 5, height: 5, cell_size: 1.0, offset: [0.0, 0.0] }).unwrap();
        (TokenRegistry::with_grid(grid), InputRouter::new())
    }

    #[test]
    fn test_press_drag_release_on_token() {
        let (mut registry, mut router) = setup();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();

        let press = InputEvent::PrimaryPress { pointer: Point2::new(0.5, 0.5), target: ClickTarget::Token(id) };
        assert_eq!(router.dispatch(&mut registry, press), InputEffect::DragStarted(id));
        assert_eq!(router.dragging(), Some(id));

        router.dispatch(&mut registry, InputEvent::PointerMove { pointer: Point2::new(3.25, 4.75) });
        let effect = router.dispatch(&mut registry, InputEvent::PrimaryRelease);

        assert_eq!(effect, InputEffect::Dropped(id, DropOutcome::Committed(Point2::new(3.5, 4.5))));
        assert_eq!(router.dragging(), None);
        assert_eq!(registry.selected_token(), Some(id));
    }

    #[test]
    fn test_empty_click_deselects_but_ui_click_does_not() {
        let (mut registry, mut router) = setup();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        registry.select_token(id);

        let ui_click = InputEvent::PrimaryPress { pointer: Point2::new(2.0, 2.0), target: ClickTarget::Ui };
        assert_eq!(router.dispatch(&mut registry, ui_click), InputEffect::None);
        assert_eq!(registry.selected_token(), Some(id));

        let empty_click = InputEvent::PrimaryPress { pointer: Point2::new(2.0, 2.0), target: ClickTarget::Empty };
        assert_eq!(router.dispatch(&mut registry, empty_click), InputEffect::Deselected);
        assert_eq!(registry.selected_token(), None);
    }

    #[test]
    fn test_spawn_mode_places_tokens() {
        let (mut registry, mut router) = setup();
        assert!(router.toggle_spawn_mode());

        let inside = InputEvent::PrimaryPress { pointer: Point2::new(1.2, 1.8), target: ClickTarget::Empty };
        let InputEffect::Spawned(id) = router.dispatch(&mut registry, inside) else {
            panic!("expected a spawn");
        };
        assert_eq!(registry.token(id).unwrap().position, Point2::new(1.5, 1.5));

        let outside = InputEvent::PrimaryPress { pointer: Point2::new(-3.0, 1.0), target: ClickTarget::Empty };
        assert_eq!(router.dispatch(&mut registry, outside), InputEffect::SpawnRejected);
        assert_eq!(registry.len(), 1);

        assert!(!router.toggle_spawn_mode());
        router.dispatch(&mut registry, InputEvent::PrimaryPress { pointer: Point2::new(2.5, 2.5), target: ClickTarget::Empty });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_key_removes_selected_only() {
        let (mut registry, mut router) = setup();
        let a = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        let b = registry.spawn_token_at_pointer(Point2::new(1.5, 0.5)).unwrap();

        assert_eq!(router.dispatch(&mut registry, InputEvent::DeletePressed), InputEffect::None);
        assert_eq!(registry.len(), 2);

        registry.select_token(b);
        assert_eq!(router.dispatch(&mut registry, InputEvent::DeletePressed), InputEffect::Deleted(b));
        assert!(registry.contains(a));
        assert!(!registry.contains(b));
    }

    #[test]
    fn test_hover_moves_between_tokens() {
        let (mut registry, mut router) = setup();
        let a = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        let b = registry.spawn_token_at_pointer(Point2::new(1.5, 0.5)).unwrap();

        router.dispatch(&mut registry, InputEvent::PointerEnter(a));
        assert!(registry.token(a).unwrap().hovered);

        router.dispatch(&mut registry, InputEvent::PointerEnter(b));
        assert!(!registry.token(a).unwrap().hovered);
        assert!(registry.token(b).unwrap().hovered);
        assert_eq!(router.hovered(), Some(b));

        router.dispatch(&mut registry, InputEvent::PointerExit(b));
        assert!(!registry.token(b).unwrap().hovered);
        assert_eq!(router.hovered(), None);
    }

    #[test]
    fn test_router_forgets_deleted_drag_target() {
        let (mut registry, mut router) = setup();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();

        router.dispatch(&mut registry, InputEvent::PrimaryPress { pointer: Point2::new(0.5, 0.5), target: ClickTarget::Token(id) });
        registry.delete_selected_token();

        assert_eq!(router.dispatch(&mut registry, InputEvent::PrimaryRelease), InputEffect::None);
        assert_eq!(router.dragging(), None);
    }

    #[test]
    fn test_list_selection_while_hovered_leaves_no_stale_hover() {
        let (mut registry, mut router) = setup();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();

        router.dispatch(&mut registry, InputEvent::PointerEnter(id));
        assert!(registry.token(id).unwrap().hovered);

        // Picked from the token list while the pointer rests on it
        registry.select_token(id);
        assert!(!registry.token(id).unwrap().hovered);

        router.dispatch(&mut registry, InputEvent::PointerExit(id));
        registry.deselect_all();

        let token = registry.token(id).unwrap();
        assert!(!token.hovered);
        assert!(!token.highlighted());
        assert_eq!(router.hovered(), None);
    }

    #[test]
    fn test_dispatch_survives_externally_despawned_token() {
        let (mut registry, mut router) = setup();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        let press = InputEvent::PrimaryPress { pointer: Point2::new(0.5, 0.5), target: ClickTarget::Token(id) };
        router.dispatch(&mut registry, press);

        let entity = crate::ecs::get_token_entities(registry.world_mut())[0];
        registry.world_mut().despawn(entity);

        assert_eq!(router.dispatch(&mut registry, InputEvent::PointerMove { pointer: Point2::new(2.0, 2.0) }), InputEffect::None);
        assert_eq!(router.dispatch(&mut registry, InputEvent::PrimaryRelease), InputEffect::None);
        assert_eq!(router.dispatch(&mut registry, InputEvent::DeletePressed), InputEffect::None);
        assert_eq!(router.dispatch(&mut registry, InputEvent::PointerEnter(id)), InputEffect::None);
        assert!(registry.is_empty());
    }
}
