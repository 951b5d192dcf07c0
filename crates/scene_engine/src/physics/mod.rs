//! Physics bridge
//!
//! The scene starts, steps and stops a physics world through [`PhysicsBridge`].
//! Bodies are keyed by [`BodyHandle`](crate::ecs::components::BodyHandle)s that the
//! bridge writes into each [`RigidbodyComponent`](crate::ecs::components::RigidbodyComponent)
//! on start.

pub mod basic;

pub use basic::{BasicPhysics2D, BasicPhysicsConfig};

use crate::ecs::World;
use thiserror::Error;

/// Physics errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// `step` was called outside a start/stop pair
    #[error("physics world is not running")]
    NotRunning,

    /// Negative or non-finite timestep
    #[error("invalid timestep {0}")]
    InvalidTimestep(f32),

    /// Failure inside the solver
    #[error("physics simulation failed: {0}")]
    Simulation(String),
}

/// Contract between the scene and a physics engine
pub trait PhysicsBridge {
    /// Build the physics world from every rigidbody in `world`
    fn start(&mut self, world: &mut World) -> Result<(), PhysicsError>;

    /// Advance by `dt` seconds and write the results back into `world`
    fn step(&mut self, dt: f32, world: &mut World) -> Result<(), PhysicsError>;

    /// Tear the physics world down
    fn stop(&mut self);
}

/// Bridge for drivers without physics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPhysics;

impl PhysicsBridge for NoPhysics {
    fn start(&mut self, _world: &mut World) -> Result<(), PhysicsError> {
        Ok(())
    }

    fn step(&mut self, _dt: f32, _world: &mut World) -> Result<(), PhysicsError> {
        Ok(())
    }

    fn stop(&mut self) {}
}
