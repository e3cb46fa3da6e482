use bevy_ecs::prelude::*;
use egui::Color32;
use super::{TokenId, TokenSize};

/// Color and size used for tokens spawned without explicit presentation
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnDefaults {
    pub color: Color32,
    pub size: TokenSize,
}

impl Default for SpawnDefaults {
    fn default() -> Self {
        Self {
            color: Color32::BLUE,
            size: TokenSize::Medium,
        }
    }
}

/// Hands out token ids. Monotonic, so ids are never reused in a session.
#[derive(Resource, Debug, Default)]
pub struct TokenIdAllocator {
    next: u64,
}

impl TokenIdAllocator {
    pub fn allocate(&mut self) -> TokenId {
        self.next += 1;
        TokenId(self.next)
    }
}
