//! # Scene Engine
//!
//! Runtime core of a 2D scene-graph engine: it owns the live objects, their
//! components and their transform hierarchy, and drives the play lifecycle
//! against pluggable render, script and physics collaborators.
//!
//! ## Features
//!
//! - **Generational ECS**: slotmap-backed entities with deterministic store order
//! - **Object API**: create, duplicate and delete objects; lookup by UUID or name
//! - **Transform hierarchy**: cycle-checked reparenting, world matrices on demand
//! - **Play lifecycle**: script binding, physics stepping, animated sprite pass
//! - **Editor pass**: read-only overlays for cameras, selection and colliders
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = Scene::new("Level 1");
//!     let camera = scene.create_object("Camera");
//!     scene.add_component(camera, CameraComponent::orthographic(10.0))?;
//!
//!     let mut renderer = HeadlessRenderer::default();
//!     let mut scripts = NoScripting;
//!     let mut physics = NoPhysics;
//!     let mut systems = SceneSystems::new(&mut renderer, &mut scripts, &mut physics);
//!
//!     scene.on_scene_start(&mut systems)?;
//!     scene.on_update_runtime(1.0 / 60.0, &mut systems);
//!     scene.on_scene_end(&mut systems)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod render;
pub mod scripting;
pub mod physics;
pub mod scene;
pub mod project;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig},
        ecs::{
            components::{
                AnimationComponent, BodyType, BoxColliderComponent, CameraComponent, CircleColliderComponent,
                LocalTransformMut, RigidbodyComponent, ScriptComponent, ScriptVariable, SpriteComponent, TagComponent,
                TransformComponent,
            },
            Component, ComponentFlags, ComponentKind, Entity, World,
        },
        foundation::math::{Mat4, Vec2, Vec3},
        physics::{BasicPhysics2D, BasicPhysicsConfig, NoPhysics, PhysicsBridge, PhysicsError},
        project::{EditorContext, Project},
        render::{Color, HeadlessRenderer, QuadFill, Renderer2D, SceneCamera},
        scene::{EditorView, FrameStats, Object, ObjectSnapshot, PlayState, Scene, SceneError, SceneSystems},
        scripting::{
            NativeClass, NativeScriptHost, NoScripting, ScriptBridge, ScriptError, ScriptValue, ScriptValueType,
        },
    };
}
