use egui::Color32;

use crate::constants::LOG_TARGET_TOKENS;
use crate::ecs::TokenSize;
use crate::tokens::TokenRegistry;

/// Fill used for a hovered or dragged token
pub const HOVER_COLOR: Color32 = Color32::YELLOW;
/// Ring drawn around the selected token
pub const SELECTED_RING_COLOR: Color32 = Color32::GREEN;

pub const PRESET_COLORS: [(&str, Color32); 8] = [
    ("Blue", Color32::from_rgb(51, 102, 255)),
    ("Red", Color32::from_rgb(255, 77, 77)),
    ("Green", Color32::from_rgb(77, 255, 77)),
    ("Yellow", Color32::from_rgb(255, 255, 77)),
    ("Orange", Color32::from_rgb(255, 128, 0)),
    ("Purple", Color32::from_rgb(153, 77, 255)),
    ("White", Color32::WHITE),
    ("Dark Gray", Color32::from_rgb(51, 51, 51)),
];

/// What a palette pick changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickTarget {
    SelectedToken,
    SpawnDefault,
}

/// Recolor the selected token, or make `color` the default for new tokens
/// when nothing is selected.
pub fn apply_color(registry: &mut TokenRegistry, color: Color32) -> PickTarget {
    match registry.selected_token_mut() {
        Some(mut token) => {
            token.set_color(color);
            log::info!(target: LOG_TARGET_TOKENS, "Changed token {} color to {:?}", token.id(), color);
            PickTarget::SelectedToken
        }
        None => {
            registry.set_default_color(color);
            log::info!(target: LOG_TARGET_TOKENS, "Set default token color to {:?}", color);
            PickTarget::SpawnDefault
        }
    }
}

/// Same rule as [`apply_color`], for size
pub fn apply_size(registry: &mut TokenRegistry, size: TokenSize) -> PickTarget {
    match registry.selected_token_mut() {
        Some(mut token) => {
            token.set_size(size);
            PickTarget::SelectedToken
        }
        None => {
            registry.set_default_size(size);
            PickTarget::SpawnDefault
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_apply_color_without_selection_sets_default() {
        let mut registry = TokenRegistry::default();
        let (_, red) = PRESET_COLORS[1];

        assert_eq!(apply_color(&mut registry, red), PickTarget::SpawnDefault);
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        assert_eq!(registry.token(id).unwrap().color, red);
    }

    #[test]
    fn test_apply_color_recolors_selection_only() {
        let mut registry = TokenRegistry::default();
        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        registry.select_token(id);
        let (_, purple) = PRESET_COLORS[5];

        assert_eq!(apply_color(&mut registry, purple), PickTarget::SelectedToken);
        assert_eq!(registry.token(id).unwrap().color, purple);
        assert_eq!(registry.defaults().color, Color32::BLUE);
    }

    #[test]
    fn test_apply_size() {
        let mut registry = TokenRegistry::default();
        assert_eq!(apply_size(&mut registry, TokenSize::Small), PickTarget::SpawnDefault);

        let id = registry.spawn_token_at_pointer(Point2::new(0.5, 0.5)).unwrap();
        assert_eq!(registry.token(id).unwrap().size, TokenSize::Small);

        registry.select_token(id);
        apply_size(&mut registry, TokenSize::Large);
        assert_eq!(registry.token(id).unwrap().size, TokenSize::Large);
        assert_eq!(registry.defaults().size, TokenSize::Small);
    }
}
