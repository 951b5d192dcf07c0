//! Sprite renderer component

use crate::ecs::{Component, ComponentKind};
use crate::render::{Color, QuadFill};
use serde::{Serialize, Deserialize};

/// Colored or textured quad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteComponent {
    /// Flat color, or tint when a texture is set
    pub color: Color,

    /// Sprite sheet asset path
    pub texture: Option<String>,

    /// Draw order key; lower layers are drawn first
    pub layer: i32,

    /// Frame shown, 1-based; written by the animation pass
    pub current_frame: u32,

    /// Frames in the sheet; written by the animation pass
    pub total_frames: u32,
}

impl Component for SpriteComponent {
    const KIND: ComponentKind = ComponentKind::Sprite;
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            texture: None,
            layer: 0,
            current_frame: 1,
            total_frames: 1,
        }
    }
}

impl SpriteComponent {
    /// Untextured sprite
    pub fn from_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Textured sprite
    pub fn from_texture(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(texture.into()),
            ..Default::default()
        }
    }

    /// Builder pattern: Set layer
    #[must_use]
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Fill for the stored frame
    pub fn fill(&self) -> QuadFill {
        self.fill_for_frame(self.current_frame, self.total_frames)
    }

    /// Fill for an explicit frame
    pub fn fill_for_frame(&self, frame: u32, total_frames: u32) -> QuadFill {
        match &self.texture {
            Some(texture) => QuadFill::Sprite {
                texture: texture.clone(),
                tint: self.color,
                frame,
                total_frames,
            },
            None => QuadFill::Color(self.color),
        }
    }
}
