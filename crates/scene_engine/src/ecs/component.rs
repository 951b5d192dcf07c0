//! Component trait and component identity

use serde::{Serialize, Deserialize};

/// Marker trait for components
///
/// Every component names its [`ComponentKind`], which gives the store a closed,
/// compile-time identity for introspection and snapshots.
pub trait Component: 'static + Send + Sync {
    /// Stable identity of this component type
    const KIND: ComponentKind;
}

/// Closed set of component types managed by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Local transform and hierarchy links
    Transform,
    /// UUID and display name
    Tag,
    /// Colored or textured quad
    Sprite,
    /// Frame animation driving a sprite
    Animation,
    /// Orthographic camera
    Camera,
    /// Script class binding
    Script,
    /// Axis-aligned box collider
    BoxCollider,
    /// Circle collider
    CircleCollider,
    /// Physics body description
    Rigidbody,
}

impl ComponentKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Transform,
        Self::Tag,
        Self::Sprite,
        Self::Animation,
        Self::Camera,
        Self::Script,
        Self::BoxCollider,
        Self::CircleCollider,
        Self::Rigidbody,
    ];

    /// The flag bit representing this kind
    pub const fn flag(self) -> ComponentFlags {
        match self {
            Self::Transform => ComponentFlags::TRANSFORM,
            Self::Tag => ComponentFlags::TAG,
            Self::Sprite => ComponentFlags::SPRITE,
            Self::Animation => ComponentFlags::ANIMATION,
            Self::Camera => ComponentFlags::CAMERA,
            Self::Script => ComponentFlags::SCRIPT,
            Self::BoxCollider => ComponentFlags::BOX_COLLIDER,
            Self::CircleCollider => ComponentFlags::CIRCLE_COLLIDER,
            Self::Rigidbody => ComponentFlags::RIGIDBODY,
        }
    }

    /// Whether every object must carry this component
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Transform | Self::Tag)
    }
}

bitflags::bitflags! {
    /// Set of component kinds present on an object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ComponentFlags: u16 {
        /// [`ComponentKind::Transform`]
        const TRANSFORM = 1 << 0;
        /// [`ComponentKind::Tag`]
        const TAG = 1 << 1;
        /// [`ComponentKind::Sprite`]
        const SPRITE = 1 << 2;
        /// [`ComponentKind::Animation`]
        const ANIMATION = 1 << 3;
        /// [`ComponentKind::Camera`]
        const CAMERA = 1 << 4;
        /// [`ComponentKind::Script`]
        const SCRIPT = 1 << 5;
        /// [`ComponentKind::BoxCollider`]
        const BOX_COLLIDER = 1 << 6;
        /// [`ComponentKind::CircleCollider`]
        const CIRCLE_COLLIDER = 1 << 7;
        /// [`ComponentKind::Rigidbody`]
        const RIGIDBODY = 1 << 8;
    }
}

impl ComponentFlags {
    /// Iterate the kinds contained in this set
    pub fn kinds(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_round_trip_kinds() {
        let flags = ComponentKind::Camera.flag() | ComponentKind::Script.flag();
        let kinds: Vec<_> = flags.kinds().collect();
        assert_eq!(kinds, vec![ComponentKind::Camera, ComponentKind::Script]);
    }

    #[test]
    fn test_required_kinds() {
        let required: Vec<_> = ComponentKind::ALL.into_iter().filter(|k| k.is_required()).collect();
        assert_eq!(required, vec![ComponentKind::Transform, ComponentKind::Tag]);
    }
}
