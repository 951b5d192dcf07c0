//! Rendering collaborator interface
//!
//! The scene never talks to a GPU. It drives a [`Renderer2D`], which a real
//! backend implements on top of its own pipeline, and which
//! [`HeadlessRenderer`] implements by recording commands.

pub mod camera;
pub mod headless;

pub use camera::SceneCamera;
pub use headless::{HeadlessRenderer, DrawCommand};

use crate::foundation::math::{Mat4, Vec2, Vec4};
use serde::{Serialize, Deserialize};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// As a 4-component vector
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How a quad is filled
#[derive(Debug, Clone, PartialEq)]
pub enum QuadFill {
    /// Flat color
    Color(Color),
    /// One frame of a horizontal sprite sheet
    Sprite {
        /// Texture asset path, resolved by the renderer
        texture: String,
        /// Tint multiplied with the texture
        tint: Color,
        /// 1-based frame to show
        frame: u32,
        /// Number of frames in the sheet
        total_frames: u32,
    },
}

/// Editor gizmo icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gizmo {
    /// Camera icon
    Camera,
}

/// 2D renderer used by the scene's draw passes
///
/// Transforms are world matrices; box corners are in the object's local space.
pub trait Renderer2D {
    /// Begin a batch viewed through `camera`
    fn begin_scene(&mut self, camera: &SceneCamera);

    /// Flush the current batch
    fn end_scene(&mut self);

    /// Draw a unit quad
    fn draw_quad(&mut self, transform: &Mat4, fill: &QuadFill);

    /// Draw the outline through four local-space corners
    fn draw_box(&mut self, corners: [Vec2; 4], transform: &Mat4, color: Color);

    /// Draw a unit-diameter circle
    fn draw_circle(&mut self, transform: &Mat4, color: Color);

    /// Draw an editor gizmo icon
    fn draw_gizmo(&mut self, transform: &Mat4, gizmo: Gizmo, color: Color);

    /// Draw the editor background grid
    fn draw_background_grid(&mut self, spacing: f32);

    /// Clear the render target without drawing anything
    fn clear_render_target(&mut self);

    /// Render target size in pixels (width, height)
    fn render_target_size(&self) -> (u32, u32);

    /// Width / height of the render target, 1.0 for a degenerate target
    #[allow(clippy::cast_precision_loss)]
    fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.render_target_size();
        if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }
}
