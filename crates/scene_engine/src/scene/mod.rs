//! Scene management
//!
//! A [`Scene`] owns a component store and drives it through play mode:
//!
//! ```text
//! Stopped --on_scene_start--> Playing --on_scene_end--> Stopped
//!                               |
//!                       on_update_runtime(dt)
//! ```
//!
//! Objects are created, duplicated and deleted at any time, in either state.
//! The scene talks to three collaborators, bundled as [`SceneSystems`]: a
//! [`Renderer2D`](crate::render::Renderer2D), a
//! [`ScriptBridge`](crate::scripting::ScriptBridge) and a
//! [`PhysicsBridge`](crate::physics::PhysicsBridge). Their failures are
//! logged per object and never abort a frame.

mod container;
mod editor;
mod error;
pub mod hierarchy;
mod lifecycle;
mod object;
mod snapshot;

#[cfg(test)]
mod tests;

pub use container::{PlayState, Scene};
pub use editor::EditorView;
pub use error::SceneError;
pub use lifecycle::{FrameStats, SceneSystems, StartReport};
pub use object::{Object, SceneId};
pub use snapshot::ObjectSnapshot;
