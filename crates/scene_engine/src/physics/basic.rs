//! Minimal 2D integrator
//!
//! Integrates gravity and velocity for dynamic bodies and velocity alone for
//! kinematic ones. There is no collision response.

use super::{PhysicsBridge, PhysicsError};
use crate::config::Config;
use crate::ecs::components::{BodyHandle, BodyType, RigidbodyComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec2;
use serde::{Serialize, Deserialize};
use slotmap::SlotMap;

/// Settings for [`BasicPhysics2D`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicPhysicsConfig {
    /// World gravity in units per second squared
    pub gravity: Vec2,

    /// Largest timestep integrated in one go; longer frames are split
    pub max_substep: f32,
}

impl Default for BasicPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            max_substep: 1.0 / 30.0,
        }
    }
}

impl Config for BasicPhysicsConfig {}

#[derive(Debug, Clone, Copy)]
struct Body {
    entity: Entity,
}

/// Gravity and velocity integrator implementing [`PhysicsBridge`]
#[derive(Debug)]
pub struct BasicPhysics2D {
    config: BasicPhysicsConfig,
    bodies: SlotMap<BodyHandle, Body>,
    running: bool,
}

impl BasicPhysics2D {
    /// Create an integrator
    pub fn new(config: BasicPhysicsConfig) -> Self {
        Self {
            config,
            bodies: SlotMap::with_key(),
            running: false,
        }
    }

    /// Active settings
    pub fn config(&self) -> &BasicPhysicsConfig {
        &self.config
    }

    /// Number of simulated bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Whether `start` has been called without a matching `stop`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drop bodies whose entity died or lost its rigidbody, create bodies for new rigidbodies
    fn reconcile(&mut self, world: &mut World) {
        self.bodies.retain(|_, body| world.has::<RigidbodyComponent>(body.entity));

        for entity in world.entities_with::<RigidbodyComponent>() {
            let Some(rigidbody) = world.get_mut::<RigidbodyComponent>(entity) else {
                continue;
            };
            let owned = rigidbody
                .runtime_body
                .and_then(|handle| self.bodies.get(handle))
                .is_some_and(|body| body.entity == entity);
            if !owned {
                rigidbody.runtime_body = Some(self.bodies.insert(Body { entity }));
                log::trace!("Created physics body for {entity}");
            }
        }
    }

    fn integrate(&self, dt: f32, world: &mut World) {
        for body in self.bodies.values() {
            let Some(rigidbody) = world.get_mut::<RigidbodyComponent>(body.entity) else {
                continue;
            };
            match rigidbody.body_type {
                BodyType::Static => continue,
                BodyType::Dynamic => rigidbody.velocity += self.config.gravity * rigidbody.gravity_scale * dt,
                BodyType::Kinematic => {}
            }
            let displacement = rigidbody.velocity * dt;
            if let Some(transform) = world.get_mut::<TransformComponent>(body.entity) {
                transform.translation += displacement;
            }
        }
    }
}

impl Default for BasicPhysics2D {
    fn default() -> Self {
        Self::new(BasicPhysicsConfig::default())
    }
}

impl PhysicsBridge for BasicPhysics2D {
    fn start(&mut self, world: &mut World) -> Result<(), PhysicsError> {
        if !self.config.max_substep.is_finite() || self.config.max_substep <= 0.0 {
            return Err(PhysicsError::Simulation(format!(
                "max_substep must be positive, got {}",
                self.config.max_substep
            )));
        }
        self.bodies.clear();
        self.running = true;
        self.reconcile(world);
        log::debug!("Physics started with {} bodies", self.bodies.len());
        Ok(())
    }

    fn step(&mut self, dt: f32, world: &mut World) -> Result<(), PhysicsError> {
        if !self.running {
            return Err(PhysicsError::NotRunning);
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        self.reconcile(world);

        let mut remaining = dt;
        while remaining > 0.0 {
            let substep = remaining.min(self.config.max_substep);
            self.integrate(substep, world);
            remaining -= substep;
        }
        Ok(())
    }

    fn stop(&mut self) {
        log::debug!("Physics stopped, releasing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world_with_body(body_type: BodyType) -> (World, Entity) {
        let mut world = World::new();
        let entity = world.create_entity();
        world.insert(entity, TransformComponent::default()).unwrap();
        world.insert(entity, RigidbodyComponent::new(body_type)).unwrap();
        (world, entity)
    }

    #[test]
    fn test_step_requires_start() {
        let (mut world, _) = world_with_body(BodyType::Dynamic);
        let mut physics = BasicPhysics2D::default();
        assert_eq!(physics.step(0.016, &mut world), Err(PhysicsError::NotRunning));
    }

    #[test]
    fn test_start_assigns_bodies() {
        let (mut world, entity) = world_with_body(BodyType::Dynamic);
        let mut physics = BasicPhysics2D::default();
        physics.start(&mut world).unwrap();
        assert_eq!(physics.body_count(), 1);
        assert!(world.get::<RigidbodyComponent>(entity).unwrap().runtime_body().is_some());
    }

    #[test]
    fn test_dynamic_body_falls() {
        let (mut world, entity) = world_with_body(BodyType::Dynamic);
        let mut physics = BasicPhysics2D::new(BasicPhysicsConfig {
            gravity: Vec2::new(0.0, -10.0),
            max_substep: 1.0,
        });
        physics.start(&mut world).unwrap();
        physics.step(0.5, &mut world).unwrap();

        let rigidbody = world.get::<RigidbodyComponent>(entity).unwrap();
        assert_relative_eq!(rigidbody.velocity.y, -5.0);
        let transform = world.get::<TransformComponent>(entity).unwrap();
        assert_relative_eq!(transform.translation.y, -2.5);
    }

    #[test]
    fn test_static_body_stays() {
        let (mut world, entity) = world_with_body(BodyType::Static);
        let mut physics = BasicPhysics2D::default();
        physics.start(&mut world).unwrap();
        physics.step(1.0, &mut world).unwrap();
        assert_eq!(world.get::<TransformComponent>(entity).unwrap().translation, Vec2::zeros());
    }

    #[test]
    fn test_reconcile_tracks_world_changes() {
        let (mut world, entity) = world_with_body(BodyType::Kinematic);
        let mut physics = BasicPhysics2D::default();
        physics.start(&mut world).unwrap();

        let late = world.create_entity();
        world.insert(late, TransformComponent::default()).unwrap();
        world.insert(late, RigidbodyComponent::new(BodyType::Dynamic)).unwrap();
        world.destroy_entity(entity);

        physics.step(0.01, &mut world).unwrap();
        assert_eq!(physics.body_count(), 1);
        assert!(world.get::<RigidbodyComponent>(late).unwrap().runtime_body().is_some());
    }

    #[test]
    fn test_rejects_invalid_timestep() {
        let (mut world, _) = world_with_body(BodyType::Dynamic);
        let mut physics = BasicPhysics2D::default();
        physics.start(&mut world).unwrap();
        assert_eq!(physics.step(-1.0, &mut world), Err(PhysicsError::InvalidTimestep(-1.0)));
        assert!(matches!(physics.step(f32::NAN, &mut world), Err(PhysicsError::InvalidTimestep(_))));
    }

    #[test]
    fn test_stop_releases_bodies() {
        let (mut world, _) = world_with_body(BodyType::Dynamic);
        let mut physics = BasicPhysics2D::default();
        physics.start(&mut world).unwrap();
        physics.stop();
        assert_eq!(physics.body_count(), 0);
        assert!(!physics.is_running());
    }
}
