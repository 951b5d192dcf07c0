//! Orthographic scene camera

use crate::foundation::math::{Mat4, Vec2};
use serde::{Serialize, Deserialize};

/// Orthographic camera used by both the runtime and the editor pass
///
/// The view matrix is the camera's world transform; view-projection is
/// `projection * inverse(view)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneCamera {
    orthographic_size: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
    projection: Mat4,
    view: Mat4,
    view_projection: Mat4,
}

impl SceneCamera {
    /// Create a camera showing `orthographic_size` world units vertically
    pub fn new(orthographic_size: f32) -> Self {
        let mut camera = Self {
            orthographic_size,
            near: -1.0,
            far: 1.0,
            aspect_ratio: 1.0,
            projection: Mat4::identity(),
            view: Mat4::identity(),
            view_projection: Mat4::identity(),
        };
        camera.recalculate_projection();
        camera
    }

    /// Change the orthographic parameters
    pub fn set_orthographic(&mut self, size: f32, near: f32, far: f32) {
        self.orthographic_size = size;
        self.near = near;
        self.far = far;
        self.recalculate_projection();
    }

    /// Adapt the projection to a render target size
    #[allow(clippy::cast_precision_loss)]
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        if (aspect - self.aspect_ratio).abs() > f32::EPSILON {
            self.aspect_ratio = aspect;
            self.recalculate_projection();
        }
    }

    /// Set the view from the camera object's world matrix
    pub fn update_view(&mut self, world_transform: &Mat4) {
        self.view = *world_transform;
        self.recalculate_view_projection();
    }

    /// Vertical extent in world units
    pub fn orthographic_size(&self) -> f32 {
        self.orthographic_size
    }

    /// Current aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// View matrix (camera world transform)
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Local-space corners of the visible area for a given aspect ratio,
    /// in the order bottom-left, top-left, top-right, bottom-right
    pub fn frustum_corners(&self, aspect_ratio: f32) -> [Vec2; 4] {
        let half_height = self.orthographic_size * 0.5;
        let half_width = half_height * aspect_ratio;
        [
            Vec2::new(-half_width, -half_height),
            Vec2::new(-half_width, half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(half_width, -half_height),
        ]
    }

    fn recalculate_projection(&mut self) {
        let half_height = self.orthographic_size * 0.5;
        let half_width = half_height * self.aspect_ratio;
        self.projection = Mat4::new_orthographic(
            -half_width,
            half_width,
            -half_height,
            half_height,
            self.near,
            self.far,
        );
        self.recalculate_view_projection();
    }

    fn recalculate_view_projection(&mut self) {
        let inverse_view = self.view.try_inverse().unwrap_or_else(|| {
            log::warn!("Camera view matrix is not invertible, using identity");
            Mat4::identity()
        });
        self.view_projection = self.projection * inverse_view;
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{trs_2d, Vec3, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn test_frustum_corners_follow_aspect() {
        let camera = SceneCamera::new(4.0);
        let corners = camera.frustum_corners(2.0);
        assert_relative_eq!(corners[0], Vec2::new(-4.0, -2.0));
        assert_relative_eq!(corners[2], Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_view_projection_centres_camera_position() {
        let mut camera = SceneCamera::new(10.0);
        camera.set_viewport_size(800, 800);
        camera.update_view(&trs_2d(Vec2::new(3.0, -2.0), 0.0, Vec2::new(1.0, 1.0)));

        let clip = camera.view_projection() * Vec4::new(3.0, -2.0, 0.0, 1.0);
        assert_relative_eq!(Vec3::new(clip.x, clip.y, clip.z), Vec3::zeros(), epsilon = 1e-6);

        // Top edge of the view maps to +1 in clip space
        let top = camera.view_projection() * Vec4::new(3.0, 3.0, 0.0, 1.0);
        assert_relative_eq!(top.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_viewport_is_ignored() {
        let mut camera = SceneCamera::new(10.0);
        camera.set_viewport_size(0, 600);
        assert_relative_eq!(camera.aspect_ratio(), 1.0);
    }
}
