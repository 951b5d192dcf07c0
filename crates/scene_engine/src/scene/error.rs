//! Scene errors

use crate::ecs::{ComponentKind, EcsError, Entity};
use thiserror::Error;
use uuid::Uuid;

use super::Object;

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Null, stale, or belonging to another scene
    #[error("invalid object handle {0}")]
    InvalidHandle(Object),

    /// The object lacks a component the operation needs
    #[error("entity {0} has no {1:?} component")]
    MissingComponent(Entity, ComponentKind),

    /// Attaching a component the object already has
    #[error("object already has a {0:?} component")]
    ComponentExists(ComponentKind),

    /// Transform and Tag cannot be removed
    #[error("{0:?} component is required and cannot be removed")]
    RequiredComponent(ComponentKind),

    /// Transform and Tag are only changed through the scene's own setters
    #[error("{0:?} component cannot be borrowed mutably")]
    GuardedComponent(ComponentKind),

    /// A live object already carries this UUID
    #[error("UUID {0} is already in use")]
    DuplicateUuid(Uuid),

    /// Reparenting would create a cycle
    #[error("cannot parent {child} under {parent}: it would create a cycle")]
    HierarchyCycle {
        /// Object being reparented
        child: Object,
        /// Requested parent
        parent: Object,
    },

    /// Parent and child links disagree
    #[error("hierarchy corrupted: {0}")]
    HierarchyCorrupted(String),

    /// `on_scene_start` while already playing
    #[error("scene `{0}` is already playing")]
    AlreadyPlaying(String),

    /// `on_scene_end` while stopped
    #[error("scene `{0}` is not playing")]
    NotPlaying(String),

    /// Scene swap without an open project
    #[error("no active project")]
    NoActiveProject,

    /// A snapshot flags a component without carrying its data
    #[error("snapshot of `{name}` flags {kind:?} but has no data for it")]
    IncompleteSnapshot {
        /// Object name
        name: String,
        /// Missing component
        kind: ComponentKind,
    },

    /// Parent links inside a snapshot batch loop back on themselves
    #[error("snapshot parent links form a cycle through {0}")]
    SnapshotCycle(Uuid),

    /// Component store failure
    #[error(transparent)]
    Ecs(#[from] EcsError),
}
