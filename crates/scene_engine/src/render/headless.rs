//! Headless renderer that records draw commands
//!
//! Used by drivers that have no window (servers, batch runs) and by tests that
//! need to inspect what a draw pass produced.

use super::{Color, Gizmo, QuadFill, Renderer2D, SceneCamera};
use crate::foundation::math::{Mat4, Vec2};

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `begin_scene`
    BeginScene {
        /// View-projection of the camera the batch was opened with
        view_projection: Mat4,
    },
    /// `end_scene`
    EndScene,
    /// `draw_quad`
    Quad {
        /// World transform
        transform: Mat4,
        /// Fill
        fill: QuadFill,
    },
    /// `draw_box`
    Box {
        /// Local-space corners
        corners: [Vec2; 4],
        /// World transform
        transform: Mat4,
        /// Outline color
        color: Color,
    },
    /// `draw_circle`
    Circle {
        /// World transform
        transform: Mat4,
        /// Fill color
        color: Color,
    },
    /// `draw_gizmo`
    Gizmo {
        /// World transform
        transform: Mat4,
        /// Icon
        gizmo: Gizmo,
        /// Tint
        color: Color,
    },
    /// `draw_background_grid`
    Grid {
        /// Cell size
        spacing: f32,
    },
    /// `clear_render_target`
    Clear,
}

/// Renderer that keeps every command in memory
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    size: (u32, u32),
    commands: Vec<DrawCommand>,
    batch_open: bool,
}

impl HeadlessRenderer {
    /// Create a renderer reporting the given target size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
            batch_open: false,
        }
    }

    /// Change the reported render target size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded quads as (transform, fill)
    pub fn quads(&self) -> impl Iterator<Item = (&Mat4, &QuadFill)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Quad { transform, fill } => Some((transform, fill)),
            _ => None,
        })
    }

    /// How many times the target was cleared
    pub fn clear_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Clear)).count()
    }

    /// Whether a `begin_scene` is waiting for its `end_scene`
    pub fn is_batch_open(&self) -> bool {
        self.batch_open
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl Renderer2D for HeadlessRenderer {
    fn begin_scene(&mut self, camera: &SceneCamera) {
        if self.batch_open {
            log::warn!("begin_scene called while a batch is still open");
        }
        self.batch_open = true;
        self.commands.push(DrawCommand::BeginScene {
            view_projection: *camera.view_projection(),
        });
    }

    fn end_scene(&mut self) {
        self.batch_open = false;
        self.commands.push(DrawCommand::EndScene);
    }

    fn draw_quad(&mut self, transform: &Mat4, fill: &QuadFill) {
        log::trace!("quad {fill:?}");
        self.commands.push(DrawCommand::Quad {
            transform: *transform,
            fill: fill.clone(),
        });
    }

    fn draw_box(&mut self, corners: [Vec2; 4], transform: &Mat4, color: Color) {
        self.commands.push(DrawCommand::Box {
            corners,
            transform: *transform,
            color,
        });
    }

    fn draw_circle(&mut self, transform: &Mat4, color: Color) {
        self.commands.push(DrawCommand::Circle {
            transform: *transform,
            color,
        });
    }

    fn draw_gizmo(&mut self, transform: &Mat4, gizmo: Gizmo, color: Color) {
        self.commands.push(DrawCommand::Gizmo {
            transform: *transform,
            gizmo,
            color,
        });
    }

    fn draw_background_grid(&mut self, spacing: f32) {
        self.commands.push(DrawCommand::Grid { spacing });
    }

    fn clear_render_target(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn render_target_size(&self) -> (u32, u32) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_batch() {
        let mut renderer = HeadlessRenderer::new(200, 100);
        renderer.begin_scene(&SceneCamera::default());
        assert!(renderer.is_batch_open());
        renderer.draw_quad(&Mat4::identity(), &QuadFill::Color(Color::WHITE));
        renderer.end_scene();

        assert!(!renderer.is_batch_open());
        assert_eq!(renderer.commands().len(), 3);
        assert_eq!(renderer.quads().count(), 1);
        assert!((renderer.aspect_ratio() - 2.0).abs() < f32::EPSILON);

        let taken = renderer.take_commands();
        assert_eq!(taken.len(), 3);
        assert!(renderer.commands().is_empty());
    }
}
