//! Entity-Component-System implementation
//!
//! A small generational component store. Entities are slotmap keys, and every
//! component type lives in its own secondary map, so iteration order is the
//! ascending slot order of the entities and is stable between runs.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;

pub use world::{World, EcsError};
pub use entity::Entity;
pub use component::{Component, ComponentKind, ComponentFlags};
