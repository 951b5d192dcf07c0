//! Editor draw pass
//!
//! A read-only pass over the scene, seen through an external camera, with
//! overlays for cameras, the selection and colliders. Safe in either play state.

use super::{hierarchy, Object, Scene};
use crate::ecs::components::{BoxColliderComponent, CameraComponent, CircleColliderComponent};
use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::render::{Gizmo, Renderer2D, SceneCamera};

/// Unit quad outline used to highlight a selected object
fn unit_box() -> [Vec2; 4] {
    [
        Vec2::new(-0.5, -0.5),
        Vec2::new(-0.5, 0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(0.5, -0.5),
    ]
}

/// Inputs of one editor frame
#[derive(Debug, Clone, Copy)]
pub struct EditorView<'a> {
    /// Editor viewport camera
    pub camera: &'a SceneCamera,
    /// Draw the background grid
    pub draw_grid: bool,
    /// Highlighted object, null for none
    pub selected: Object,
}

impl Scene {
    /// Draw the scene for the editor
    ///
    /// `dt` is accepted for symmetry with the runtime pass; the editor never
    /// advances animations.
    pub fn on_update_editor(&self, _dt: f32, renderer: &mut dyn Renderer2D, view: &EditorView<'_>) {
        let style = &self.config().editor;
        let aspect = renderer.aspect_ratio();
        let selected = self.entity_of(view.selected).ok();

        renderer.begin_scene(view.camera);
        if view.draw_grid {
            renderer.draw_background_grid(style.grid_spacing);
        }

        self.draw_sprites(renderer);

        for (entity, camera) in self.world.query::<CameraComponent>() {
            let Some(matrix) = hierarchy::world_matrix(&self.world, entity) else {
                continue;
            };
            renderer.draw_box(camera.camera.frustum_corners(aspect), &matrix, style.camera_frustum_color);
            renderer.draw_gizmo(&matrix, Gizmo::Camera, style.gizmo_inactive_color);
        }

        if let Some(entity) = selected {
            if let Some(matrix) = hierarchy::world_matrix(&self.world, entity) {
                match self.world.get::<CameraComponent>(entity) {
                    Some(camera) => {
                        renderer.draw_box(camera.camera.frustum_corners(aspect), &matrix, style.selection_color);
                        renderer.draw_gizmo(&matrix, Gizmo::Camera, style.gizmo_active_color);
                    }
                    None => renderer.draw_box(unit_box(), &matrix, style.selection_color),
                }
            }
        }

        let collider_color = |entity| {
            let alpha = if selected == Some(entity) { 1.0 } else { style.collider_alpha };
            style.collider_color.with_alpha(alpha)
        };

        for (entity, collider) in self.world.query::<BoxColliderComponent>() {
            if let Some(matrix) = hierarchy::world_matrix(&self.world, entity) {
                renderer.draw_box(collider.corners(), &matrix, collider_color(entity));
            }
        }

        for (entity, collider) in self.world.query::<CircleColliderComponent>() {
            if let Some(matrix) = hierarchy::world_matrix(&self.world, entity) {
                let diameter = collider.radius * 2.0;
                let transform = matrix
                    * Mat4::new_translation(&Vec3::new(collider.offset.x, -collider.offset.y, 0.0))
                    * Mat4::new_nonuniform_scaling(&Vec3::new(diameter, diameter, 1.0));
                renderer.draw_circle(&transform, collider_color(entity));
            }
        }

        renderer.end_scene();
    }
}
