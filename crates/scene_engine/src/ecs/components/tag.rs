//! Tag component: identity and display name

use crate::ecs::{Component, ComponentKind};
use uuid::Uuid;

/// UUID and display name of an object
///
/// The UUID is assigned at creation and never changes; names are free-form and
/// may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComponent {
    uuid: Uuid,
    /// Display name
    pub name: String,
}

impl Component for TagComponent {
    const KIND: ComponentKind = ComponentKind::Tag;
}

impl TagComponent {
    pub(crate) fn new(name: impl Into<String>, uuid: Uuid) -> Self {
        Self { uuid, name: name.into() }
    }

    /// Immutable identity
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}
