//! Rigidbody component

use crate::ecs::{Component, ComponentKind};
use crate::foundation::math::Vec2;
use serde::{Serialize, Deserialize};

slotmap::new_key_type! {
    /// Handle to a body inside a running physics bridge
    pub struct BodyHandle;
}

/// How the physics bridge moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves
    #[default]
    Static,
    /// Moved by forces and gravity
    Dynamic,
    /// Moved by velocity only
    Kinematic,
}

/// Physics body settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidbodyComponent {
    /// Simulation mode
    pub body_type: BodyType,

    /// Lock rotation
    pub fixed_rotation: bool,

    /// Multiplier applied to world gravity
    pub gravity_scale: f32,

    /// Linear velocity, written back by the physics bridge
    pub velocity: Vec2,

    #[serde(skip)]
    pub(crate) runtime_body: Option<BodyHandle>,
}

impl Component for RigidbodyComponent {
    const KIND: ComponentKind = ComponentKind::Rigidbody;
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            body_type: BodyType::Static,
            fixed_rotation: false,
            gravity_scale: 1.0,
            velocity: Vec2::zeros(),
            runtime_body: None,
        }
    }
}

impl RigidbodyComponent {
    /// Body of the given type
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            ..Default::default()
        }
    }

    /// Body owned by the running physics bridge, if any
    pub fn runtime_body(&self) -> Option<BodyHandle> {
        self.runtime_body
    }
}
