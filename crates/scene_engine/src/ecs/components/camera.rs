//! Camera component

use crate::ecs::{Component, ComponentKind};
use crate::render::SceneCamera;
use serde::{Serialize, Deserialize};

/// Marks an object as a scene camera; its view follows the object's world transform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraComponent {
    /// Projection and view state
    pub camera: SceneCamera,
}

impl Component for CameraComponent {
    const KIND: ComponentKind = ComponentKind::Camera;
}

impl CameraComponent {
    /// Orthographic camera showing `size` world units vertically
    pub fn orthographic(size: f32) -> Self {
        Self {
            camera: SceneCamera::new(size),
        }
    }
}
