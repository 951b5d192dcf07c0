//! Collider components

use crate::ecs::{Component, ComponentKind};
use crate::foundation::math::Vec2;
use serde::{Serialize, Deserialize};

/// Axis-aligned box collider in object space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxColliderComponent {
    /// Full extents
    pub size: Vec2,
    /// Center offset from the object origin
    pub offset: Vec2,
    /// Mass per unit area
    pub density: f32,
    /// Coulomb friction
    pub friction: f32,
    /// Bounciness
    pub restitution: f32,
}

impl Component for BoxColliderComponent {
    const KIND: ComponentKind = ComponentKind::BoxCollider;
}

impl Default for BoxColliderComponent {
    fn default() -> Self {
        Self {
            size: Vec2::new(1.0, 1.0),
            offset: Vec2::zeros(),
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl BoxColliderComponent {
    /// Object-space outline corners (bottom-left, top-left, top-right, bottom-right)
    ///
    /// The vertical offset is applied downward, matching the editor overlay convention.
    pub fn corners(&self) -> [Vec2; 4] {
        let (hx, hy) = (self.size.x * 0.5, self.size.y * 0.5);
        let (ox, oy) = (self.offset.x, -self.offset.y);
        [
            Vec2::new(ox - hx, oy - hy),
            Vec2::new(ox - hx, oy + hy),
            Vec2::new(ox + hx, oy + hy),
            Vec2::new(ox + hx, oy - hy),
        ]
    }
}

/// Circle collider in object space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleColliderComponent {
    /// Radius
    pub radius: f32,
    /// Center offset from the object origin
    pub offset: Vec2,
    /// Mass per unit area
    pub density: f32,
    /// Coulomb friction
    pub friction: f32,
    /// Bounciness
    pub restitution: f32,
}

impl Component for CircleColliderComponent {
    const KIND: ComponentKind = ComponentKind::CircleCollider;
}

impl Default for CircleColliderComponent {
    fn default() -> Self {
        Self {
            radius: 0.5,
            offset: Vec2::zeros(),
            density: 1.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_corners_apply_offset() {
        let collider = BoxColliderComponent {
            size: Vec2::new(1.0, 2.0),
            offset: Vec2::new(0.5, 1.0),
            ..Default::default()
        };
        let corners = collider.corners();
        assert_eq!(corners[0], Vec2::new(0.0, -2.0));
        assert_eq!(corners[2], Vec2::new(1.0, 0.0));
    }
}
