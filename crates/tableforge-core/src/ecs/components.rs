use bevy_ecs::prelude::*;
use egui::Color32;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

// A token is an entity carrying the components below. Identity is the
// session-unique TokenId, never the ECS Entity, whose index gets recycled.

/// Session-unique token identity, never reused after deletion
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Component, Clone, Debug, PartialEq)]
pub struct TokenName(pub String);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TokenColor(pub Color32);

/// Visual footprint of a token. Only the drawn scale changes, the hit radius
/// stays at half a cell.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TokenSize {
    pub const ALL: [TokenSize; 3] = [TokenSize::Small, TokenSize::Medium, TokenSize::Large];

    pub fn scale(&self) -> f32 {
        match self {
            TokenSize::Small => 0.5,
            TokenSize::Medium => 0.9, // fills ~90% of a cell
            TokenSize::Large => 1.8,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TokenSize::Small => "Small",
            TokenSize::Medium => "Medium",
            TokenSize::Large => "Large",
        }
    }
}

/// Position in world units. Grid snapped whenever no drag is in progress.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldPosition(pub Point2<f32>);

/// Present only between pointer-down and pointer-up on the token
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Dragging {
    /// Token position minus pointer position at pointer-down
    pub offset: Vector2<f32>,
    /// Where the token goes back to if the drop is rejected
    pub original: Point2<f32>,
}

/// Marker for the one selected token
#[derive(Component, Debug)]
pub struct Selected;

/// Marker for hover highlight
#[derive(Component, Debug)]
pub struct Hovered;

#[derive(Bundle)]
pub struct TokenBundle {
    pub id: TokenId,
    pub name: TokenName,
    pub color: TokenColor,
    pub size: TokenSize,
    pub position: WorldPosition,
}
