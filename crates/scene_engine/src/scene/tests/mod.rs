//! Cross-module scene tests
//!
//! Exercise the scene against the bundled collaborators: the headless
//! renderer, the native script host and the basic physics integrator.

mod lifecycle;

use crate::physics::{NoPhysics, PhysicsBridge};
use crate::render::HeadlessRenderer;
use crate::scene::{Object, Scene, SceneSystems};
use crate::scripting::{NoScripting, ScriptBridge};
use crate::ecs::components::CameraComponent;
use crate::foundation::math::Vec2;

/// Collaborators owned by a test
pub(super) struct Harness<S: ScriptBridge = NoScripting, P: PhysicsBridge = NoPhysics> {
    pub renderer: HeadlessRenderer,
    pub scripts: S,
    pub physics: P,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(NoScripting, NoPhysics)
    }
}

impl<S: ScriptBridge, P: PhysicsBridge> Harness<S, P> {
    pub fn with(scripts: S, physics: P) -> Self {
        Self {
            renderer: HeadlessRenderer::new(1600, 900),
            scripts,
            physics,
        }
    }

    pub fn systems(&mut self) -> SceneSystems<'_> {
        SceneSystems::new(&mut self.renderer, &mut self.scripts, &mut self.physics)
    }
}

/// Object at a position
pub(super) fn spawn_at(scene: &mut Scene, name: &str, x: f32, y: f32) -> Object {
    let object = scene.create_object(name);
    *scene.transform_mut(object).unwrap().translation() = Vec2::new(x, y);
    object
}

/// Camera object at the origin
pub(super) fn spawn_camera(scene: &mut Scene, name: &str) -> Object {
    let object = scene.create_object(name);
    scene.add_component(object, CameraComponent::orthographic(10.0)).unwrap();
    object
}
