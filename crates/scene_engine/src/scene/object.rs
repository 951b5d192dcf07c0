//! Object handles

use crate::ecs::Entity;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a scene instance, unique for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene{}", self.0)
    }
}

/// Copyable reference to one entity of one scene
///
/// Two objects are equal when they name the same entity in the same scene.
/// The default object is null: lookups that miss return it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Object {
    entity: Option<Entity>,
    scene: Option<SceneId>,
}

impl Object {
    /// The null object
    pub const NULL: Self = Self { entity: None, scene: None };

    pub(crate) fn new(entity: Entity, scene: SceneId) -> Self {
        Self {
            entity: Some(entity),
            scene: Some(scene),
        }
    }

    /// Whether this is the null object
    pub fn is_null(&self) -> bool {
        self.entity.is_none()
    }

    /// Underlying entity
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// Owning scene
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.entity, self.scene) {
            (Some(entity), Some(scene)) => write!(f, "{scene}/{entity}"),
            _ => write!(f, "null"),
        }
    }
}
