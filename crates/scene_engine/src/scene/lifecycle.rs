//! Play mode: start, runtime frame, end

use super::{hierarchy, PlayState, Scene, SceneError};
use crate::ecs::components::{
    AnimationComponent, CameraComponent, RigidbodyComponent, ScriptComponent, SpriteComponent, TagComponent,
    TransformComponent,
};
use crate::physics::PhysicsBridge;
use crate::render::Renderer2D;
use crate::scripting::{bind_script, BindReport, ScriptBridge, ScriptError, ON_UPDATE};

/// The collaborators a scene drives during play
pub struct SceneSystems<'a> {
    /// Draw target
    pub renderer: &'a mut dyn Renderer2D,
    /// Scripting VM
    pub scripts: &'a mut dyn ScriptBridge,
    /// Physics engine
    pub physics: &'a mut dyn PhysicsBridge,
}

impl<'a> SceneSystems<'a> {
    /// Bundle the three collaborators
    pub fn new(
        renderer: &'a mut dyn Renderer2D,
        scripts: &'a mut dyn ScriptBridge,
        physics: &'a mut dyn PhysicsBridge,
    ) -> Self {
        Self {
            renderer,
            scripts,
            physics,
        }
    }
}

/// What one runtime frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// A camera was active and the sprite pass ran
    pub rendered: bool,
    /// Quads submitted
    pub sprites_drawn: usize,
    /// Script instances whose `OnUpdate` ran
    pub scripts_updated: usize,
    /// Script instances whose `OnUpdate` failed
    pub script_failures: usize,
}

/// Summary of `on_scene_start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartReport {
    /// Scripts with a live instance
    pub scripts_bound: usize,
    /// Scripts left inert
    pub scripts_inert: usize,
    /// Declared variables that kept their default
    pub fields_failed: usize,
}

impl Scene {
    /// Enter play mode
    ///
    /// Resets animations, picks the first camera, signals both bridges and
    /// binds every script component. Binding failures are logged and leave the
    /// component inert; they never fail the start.
    pub fn on_scene_start(&mut self, systems: &mut SceneSystems<'_>) -> Result<StartReport, SceneError> {
        if self.state == PlayState::Playing {
            return Err(SceneError::AlreadyPlaying(self.name().to_string()));
        }
        log::info!("Starting scene `{}`", self.name());

        for (_, animation) in self.world.query_mut::<AnimationComponent>() {
            animation.reset_for_play();
        }

        self.active_camera = self.first_camera();
        if self.active_camera.is_none() {
            log::warn!("Scene `{}` has no camera", self.name());
        }

        systems.scripts.scene_start();
        if let Err(e) = systems.physics.start(&mut self.world) {
            log::warn!("Physics failed to start: {e}");
        }

        let mut report = StartReport::default();
        for entity in self.world.entities_with::<ScriptComponent>() {
            let Some(owner) = self.world.get::<TagComponent>(entity).map(TagComponent::uuid) else {
                continue;
            };
            let Some(script) = self.world.get_mut::<ScriptComponent>(entity) else {
                continue;
            };
            match bind_script(script, owner, &mut *systems.scripts) {
                BindReport::Bound { fields_failed, .. } => {
                    report.scripts_bound += 1;
                    report.fields_failed += fields_failed;
                }
                BindReport::Unresolved | BindReport::InstantiationFailed => report.scripts_inert += 1,
            }
        }

        self.state = PlayState::Playing;
        log::info!(
            "Scene `{}` playing: {} scripts bound, {} inert",
            self.name(),
            report.scripts_bound,
            report.scripts_inert
        );
        Ok(report)
    }

    /// Run one runtime frame
    ///
    /// Never fails: bridge errors are logged per object and a missing camera
    /// only clears the render target.
    pub fn on_update_runtime(&mut self, dt: f32, systems: &mut SceneSystems<'_>) -> FrameStats {
        let mut stats = FrameStats::default();
        self.active_camera = self.first_camera();

        if self.is_playing() {
            if let Err(e) = systems.physics.step(dt, &mut self.world) {
                log::warn!("Physics step failed: {e}");
            }
            self.update_scripts(systems.scripts, &mut stats);
        }

        let camera = self
            .active_camera
            .and_then(|e| self.world.get::<CameraComponent>(e))
            .map(|c| c.camera);
        match camera {
            Some(camera) => {
                if self.is_playing() {
                    self.advance_animations(dt);
                }
                systems.renderer.begin_scene(&camera);
                stats.sprites_drawn = self.draw_sprites(systems.renderer);
                systems.renderer.end_scene();
                stats.rendered = true;
            }
            None => {
                systems.renderer.clear_render_target();
                log::warn!("No scene camera in `{}`", self.name());
            }
        }

        self.update_cameras(systems.renderer.render_target_size());
        stats
    }

    /// Leave play mode
    ///
    /// Script instances and physics bodies are released; components keep
    /// their authored data.
    pub fn on_scene_end(&mut self, systems: &mut SceneSystems<'_>) -> Result<(), SceneError> {
        if self.state != PlayState::Playing {
            return Err(SceneError::NotPlaying(self.name().to_string()));
        }
        self.state = PlayState::Stopped;
        self.active_camera = None;

        systems.scripts.scene_end();
        systems.physics.stop();

        for (_, script) in self.world.query_mut::<ScriptComponent>() {
            script.unbind();
        }
        for (_, rigidbody) in self.world.query_mut::<RigidbodyComponent>() {
            rigidbody.runtime_body = None;
        }

        log::info!("Scene `{}` stopped", self.name());
        Ok(())
    }

    fn update_scripts(&self, scripts: &mut dyn ScriptBridge, stats: &mut FrameStats) {
        for (entity, script) in self.world.query::<ScriptComponent>() {
            let Some(instance) = script.instance() else {
                continue;
            };
            match scripts.invoke_method(instance, ON_UPDATE, &[]) {
                Ok(_) => stats.scripts_updated += 1,
                Err(ScriptError::NoSuchMethod { .. }) => {}
                Err(e) => {
                    stats.script_failures += 1;
                    log::warn!("{ON_UPDATE} failed on {entity} [{}]: {e}", script.path.display());
                }
            }
        }
    }

    fn advance_animations(&mut self, dt: f32) {
        for entity in self.world.entities_with_both::<AnimationComponent, SpriteComponent>() {
            let Some(animation) = self.world.get_mut::<AnimationComponent>(entity) else {
                continue;
            };
            animation.advance(dt);
            let (frame, frames) = (animation.current_frame, animation.frames);
            if let Some(sprite) = self.world.get_mut::<SpriteComponent>(entity) {
                sprite.current_frame = frame;
                sprite.total_frames = frames;
            }
        }
    }

    /// Draw every sprite, lowest layer first; ties keep store order
    ///
    /// The caller owns the `begin_scene`/`end_scene` bracket.
    pub(super) fn draw_sprites(&self, renderer: &mut dyn Renderer2D) -> usize {
        let mut drawn = 0;
        for entity in self.world.sorted_by::<SpriteComponent, _>(|sprite| sprite.layer) {
            let (Some(sprite), Some(matrix)) = (
                self.world.get::<SpriteComponent>(entity),
                hierarchy::world_matrix(&self.world, entity),
            ) else {
                continue;
            };
            // The editor never advances animations, so read the frame from the source
            let fill = match self.world.get::<AnimationComponent>(entity) {
                Some(animation) => sprite.fill_for_frame(animation.current_frame, animation.frames),
                None => sprite.fill(),
            };
            renderer.draw_quad(&matrix, &fill);
            drawn += 1;
        }
        drawn
    }

    fn update_cameras(&mut self, (width, height): (u32, u32)) {
        for entity in self.world.entities_with_both::<CameraComponent, TransformComponent>() {
            let Some(matrix) = hierarchy::world_matrix(&self.world, entity) else {
                continue;
            };
            if let Some(camera) = self.world.get_mut::<CameraComponent>(entity) {
                camera.camera.set_viewport_size(width, height);
                camera.camera.update_view(&matrix);
            }
        }
    }
}
