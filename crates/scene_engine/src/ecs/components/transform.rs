//! Transform component for the ECS system
//!
//! Holds the local 2D transform and the hierarchy links. The links are entity
//! handles resolved through the world on use; the hierarchy operations that keep
//! them consistent live in [`crate::scene::hierarchy`].

use crate::ecs::{Component, ComponentKind, Entity};
use crate::foundation::math::{trs_2d, Mat4, Vec2};
use std::ops::Deref;

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position relative to the parent
    pub translation: Vec2,

    /// Rotation around Z in radians, relative to the parent
    pub rotation: f32,

    /// Scale relative to the parent
    pub scale: Vec2,

    pub(crate) parent: Option<Entity>,
    pub(crate) children: Vec<Entity>,
}

impl Component for TransformComponent {
    const KIND: ComponentKind = ComponentKind::Transform;
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            parent: None,
            children: Vec::new(),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Local transformation matrix (TRS order)
    pub fn local_matrix(&self) -> Mat4 {
        trs_2d(self.translation, self.rotation, self.scale)
    }

    /// Parent entity, `None` for a root
    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    /// Copy translation, rotation and scale from another transform, leaving links untouched
    pub fn copy_local_from(&mut self, other: &Self) {
        self.translation = other.translation;
        self.rotation = other.rotation;
        self.scale = other.scale;
    }
}

/// Write access to the local translation, rotation and scale of a transform
///
/// The hierarchy links stay read-only; reparent through the scene.
#[derive(Debug)]
pub struct LocalTransformMut<'a> {
    transform: &'a mut TransformComponent,
}

impl<'a> LocalTransformMut<'a> {
    pub(crate) fn new(transform: &'a mut TransformComponent) -> Self {
        Self { transform }
    }

    /// Position relative to the parent
    pub fn translation(&mut self) -> &mut Vec2 {
        &mut self.transform.translation
    }

    /// Rotation in radians relative to the parent
    pub fn rotation(&mut self) -> &mut f32 {
        &mut self.transform.rotation
    }

    /// Scale relative to the parent
    pub fn scale(&mut self) -> &mut Vec2 {
        &mut self.transform.scale
    }

    /// Take translation, rotation and scale from another transform
    pub fn set_local(&mut self, other: &TransformComponent) {
        self.transform.copy_local_from(other);
    }
}

impl Deref for LocalTransformMut<'_> {
    type Target = TransformComponent;

    fn deref(&self) -> &TransformComponent {
        self.transform
    }
}
