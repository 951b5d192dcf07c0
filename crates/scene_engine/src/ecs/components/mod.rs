//! ECS Components module
//!
//! Plain data components managed by the scene. Only [`TransformComponent`] and
//! [`TagComponent`] are mandatory; the rest are optional and consumed by the
//! render, script and physics collaborators.

pub mod transform;
pub mod tag;
pub mod sprite;
pub mod animation;
pub mod camera;
pub mod script;
pub mod collision;
pub mod rigidbody;

pub use transform::{LocalTransformMut, TransformComponent};
pub use tag::TagComponent;
pub use sprite::SpriteComponent;
pub use animation::AnimationComponent;
pub use camera::CameraComponent;
pub use script::{ScriptComponent, ScriptVariable};
pub use collision::{BoxColliderComponent, CircleColliderComponent};
pub use rigidbody::{RigidbodyComponent, BodyType, BodyHandle};
