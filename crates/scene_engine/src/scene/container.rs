//! The scene container: object population and component access

use super::{hierarchy, Object, SceneError, SceneId};
use crate::config::SceneConfig;
use crate::ecs::components::{
    AnimationComponent, BoxColliderComponent, CameraComponent, CircleColliderComponent, LocalTransformMut,
    RigidbodyComponent, ScriptComponent, SpriteComponent, TagComponent, TransformComponent,
};
use crate::ecs::{Component, ComponentFlags, ComponentKind, Entity, World};
use crate::foundation::math::Mat4;
use std::collections::HashMap;
use uuid::Uuid;

/// Play state of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayState {
    /// Edit mode
    #[default]
    Stopped,
    /// Between `on_scene_start` and `on_scene_end`
    Playing,
}

/// A named population of objects and the state machine that drives them
///
/// Every object carries a [`TransformComponent`] and a [`TagComponent`] from
/// creation to deletion. Dropping the scene drops every object.
pub struct Scene {
    id: SceneId,
    name: String,
    pub(super) world: World,
    pub(super) uuids: HashMap<Uuid, Entity>,
    pub(super) state: PlayState,
    pub(super) active_camera: Option<Entity>,
    pub(super) config: SceneConfig,
}

impl Scene {
    /// Create an empty scene with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SceneConfig::default())
    }

    /// Create an empty scene
    pub fn with_config(name: impl Into<String>, config: SceneConfig) -> Self {
        let scene = Self {
            id: SceneId::next(),
            name: name.into(),
            world: World::new(),
            uuids: HashMap::new(),
            state: PlayState::Stopped,
            active_camera: None,
            config,
        };
        log::debug!("Created scene `{}` ({})", scene.name, scene.id);
        scene
    }

    /// Process-unique id
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current play state
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether the scene is in play mode
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Settings
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Read access to the component store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Camera chosen for the last runtime frame, null when there is none
    pub fn active_camera(&self) -> Object {
        self.active_camera.map_or(Object::NULL, |e| self.object(e))
    }

    pub(super) fn object(&self, entity: Entity) -> Object {
        Object::new(entity, self.id)
    }

    /// Resolve an object to its entity, rejecting null, stale and foreign handles
    pub(super) fn entity_of(&self, object: Object) -> Result<Entity, SceneError> {
        match object.entity() {
            Some(entity) if object.scene() == Some(self.id) && self.world.contains(entity) => Ok(entity),
            _ => Err(SceneError::InvalidHandle(object)),
        }
    }

    /// Whether the object is a live object of this scene
    pub fn is_valid(&self, object: Object) -> bool {
        self.entity_of(object).is_ok()
    }

    /// Create an object with a fresh UUID
    ///
    /// An empty name is replaced by the configured default name.
    pub fn create_object(&mut self, name: &str) -> Object {
        let mut uuid = Uuid::new_v4();
        while self.uuids.contains_key(&uuid) {
            uuid = Uuid::new_v4();
        }
        self.spawn(name, uuid)
    }

    /// Create an object with a given UUID, e.g. when restoring saved objects
    pub fn create_object_with_uuid(&mut self, name: &str, uuid: Uuid) -> Result<Object, SceneError> {
        if self.uuids.contains_key(&uuid) {
            return Err(SceneError::DuplicateUuid(uuid));
        }
        Ok(self.spawn(name, uuid))
    }

    fn spawn(&mut self, name: &str, uuid: Uuid) -> Object {
        let name = if name.is_empty() { self.config.default_object_name.as_str() } else { name };
        let entity = self.world.create_entity();
        // The entity was created just above, so neither insert can fail
        let _ = self.world.insert(entity, TransformComponent::default());
        let _ = self.world.insert(entity, TagComponent::new(name, uuid));
        self.uuids.insert(uuid, entity);
        log::trace!("Created object `{name}` {uuid} as {entity}");
        self.object(entity)
    }

    /// Copy an object under a new UUID
    ///
    /// The copy is named `<original><suffix>`, keeps translation, rotation and
    /// scale, has no parent or children, and carries a copy of every optional
    /// component of the original. Session state such as script instances and
    /// physics bodies is not copied.
    pub fn duplicate_object(&mut self, object: Object) -> Result<Object, SceneError> {
        let source = self.entity_of(object)?;
        let name = format!("{}{}", self.name_of(object)?, self.config.duplicate_suffix);
        let transform = self.component::<TransformComponent>(object)?.clone();

        let copy = self.create_object(&name);
        let target = self.entity_of(copy)?;
        self.transform_mut(copy)?.set_local(&transform);

        self.copy_component::<SpriteComponent>(source, target)?;
        self.copy_component::<AnimationComponent>(source, target)?;
        self.copy_component::<CameraComponent>(source, target)?;
        self.copy_component::<ScriptComponent>(source, target)?;
        self.copy_component::<BoxColliderComponent>(source, target)?;
        self.copy_component::<CircleColliderComponent>(source, target)?;
        self.copy_component::<RigidbodyComponent>(source, target)?;

        if let Some(script) = self.world.get_mut::<ScriptComponent>(target) {
            script.unbind();
        }
        if let Some(rigidbody) = self.world.get_mut::<RigidbodyComponent>(target) {
            rigidbody.runtime_body = None;
        }

        log::debug!("Duplicated {object} as `{name}`");
        Ok(copy)
    }

    fn copy_component<T: Component + Clone>(&mut self, source: Entity, target: Entity) -> Result<(), SceneError> {
        if let Some(component) = self.world.get::<T>(source).cloned() {
            self.world.insert(target, component)?;
        }
        Ok(())
    }

    /// Delete an object and all of its descendants
    ///
    /// Descendants go first, then the object is unlinked from its parent and
    /// released. Returns how many objects were removed.
    pub fn delete_object(&mut self, object: Object) -> Result<usize, SceneError> {
        let entity = self.entity_of(object)?;
        let mut doomed = hierarchy::descendants(&self.world, entity);
        // Deepest last in the list, so release in reverse
        doomed.reverse();
        for descendant in &doomed {
            self.release(*descendant);
        }
        hierarchy::detach(&mut self.world, entity);
        self.release(entity);

        debug_assert!(hierarchy::validate(&self.world).is_ok());
        log::debug!("Deleted {object} and {} descendants", doomed.len());
        Ok(doomed.len() + 1)
    }

    fn release(&mut self, entity: Entity) {
        if let Some(tag) = self.world.get::<TagComponent>(entity) {
            self.uuids.remove(&tag.uuid());
        }
        if self.active_camera == Some(entity) {
            self.active_camera = None;
        }
        self.world.destroy_entity(entity);
    }

    /// Find an object by UUID, null on a miss
    pub fn object_by_uuid(&self, uuid: Uuid) -> Object {
        self.uuids.get(&uuid).map_or(Object::NULL, |e| self.object(*e))
    }

    /// Find the first object with this name in store order, null on a miss
    pub fn object_by_name(&self, name: &str) -> Object {
        self.world
            .query::<TagComponent>()
            .find(|(_, tag)| tag.name == name)
            .map_or(Object::NULL, |(e, _)| self.object(e))
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.world.entity_count()
    }

    /// Every live object in store order
    pub fn objects(&self) -> impl Iterator<Item = Object> + '_ {
        self.world.entities().map(|e| self.object(e))
    }

    /// Attach a component, rejecting one the object already has
    pub fn add_component<T: Component>(&mut self, object: Object, component: T) -> Result<&mut T, SceneError> {
        let entity = self.entity_of(object)?;
        if self.world.has::<T>(entity) {
            return Err(SceneError::ComponentExists(T::KIND));
        }
        self.world.insert(entity, component)?;
        self.world
            .get_mut::<T>(entity)
            .ok_or(SceneError::MissingComponent(entity, T::KIND))
    }

    /// Borrow a component
    pub fn component<T: Component>(&self, object: Object) -> Result<&T, SceneError> {
        let entity = self.entity_of(object)?;
        self.world.get::<T>(entity).ok_or(SceneError::MissingComponent(entity, T::KIND))
    }

    /// Mutably borrow an optional component
    ///
    /// Transform and Tag are refused with [`SceneError::GuardedComponent`]:
    /// use [`Scene::transform_mut`], [`Scene::set_name`] and [`Scene::set_parent`].
    pub fn component_mut<T: Component>(&mut self, object: Object) -> Result<&mut T, SceneError> {
        if T::KIND.is_required() {
            return Err(SceneError::GuardedComponent(T::KIND));
        }
        let entity = self.entity_of(object)?;
        self.world.get_mut::<T>(entity).ok_or(SceneError::MissingComponent(entity, T::KIND))
    }

    /// Edit the local translation, rotation and scale of an object
    pub fn transform_mut(&mut self, object: Object) -> Result<LocalTransformMut<'_>, SceneError> {
        let entity = self.entity_of(object)?;
        self.world
            .get_mut::<TransformComponent>(entity)
            .map(LocalTransformMut::new)
            .ok_or(SceneError::MissingComponent(entity, ComponentKind::Transform))
    }

    /// Whether a live object carries `T`
    pub fn has_component<T: Component>(&self, object: Object) -> bool {
        self.entity_of(object).is_ok_and(|e| self.world.has::<T>(e))
    }

    /// Detach and return a component; Transform and Tag cannot be removed
    pub fn remove_component<T: Component>(&mut self, object: Object) -> Result<T, SceneError> {
        if T::KIND.is_required() {
            return Err(SceneError::RequiredComponent(T::KIND));
        }
        let entity = self.entity_of(object)?;
        let removed = self
            .world
            .remove::<T>(entity)
            .ok_or(SceneError::MissingComponent(entity, T::KIND))?;
        if T::KIND == ComponentKind::Camera && self.active_camera == Some(entity) {
            self.active_camera = None;
        }
        Ok(removed)
    }

    /// Kinds of the components attached to an object
    pub fn component_kinds(&self, object: Object) -> Result<ComponentFlags, SceneError> {
        Ok(self.world.kinds_of(self.entity_of(object)?))
    }

    /// Immutable identity of an object
    pub fn uuid_of(&self, object: Object) -> Result<Uuid, SceneError> {
        Ok(self.component::<TagComponent>(object)?.uuid())
    }

    /// Display name of an object
    pub fn name_of(&self, object: Object) -> Result<&str, SceneError> {
        Ok(&self.component::<TagComponent>(object)?.name)
    }

    /// Rename an object
    pub fn set_name(&mut self, object: Object, name: impl Into<String>) -> Result<(), SceneError> {
        let entity = self.entity_of(object)?;
        self.world
            .get_mut::<TagComponent>(entity)
            .ok_or(SceneError::MissingComponent(entity, ComponentKind::Tag))?
            .name = name.into();
        Ok(())
    }

    /// Parent of an object, null for a root
    pub fn parent_of(&self, object: Object) -> Result<Object, SceneError> {
        Ok(self
            .component::<TransformComponent>(object)?
            .parent()
            .map_or(Object::NULL, |e| self.object(e)))
    }

    /// Children of an object in insertion order
    pub fn children_of(&self, object: Object) -> Result<Vec<Object>, SceneError> {
        Ok(self
            .component::<TransformComponent>(object)?
            .children()
            .iter()
            .map(|e| self.object(*e))
            .collect())
    }

    /// Reparent `child` under `parent`, or make it a root when `parent` is null
    ///
    /// Parenting an object under itself or one of its descendants is rejected
    /// with [`SceneError::HierarchyCycle`] before anything changes.
    pub fn set_parent(&mut self, child: Object, parent: Object) -> Result<(), SceneError> {
        let child_entity = self.entity_of(child)?;
        let parent_entity = if parent.is_null() { None } else { Some(self.entity_of(parent)?) };

        if let Some(p) = parent_entity {
            if hierarchy::is_ancestor(&self.world, child_entity, p) {
                return Err(SceneError::HierarchyCycle { child, parent });
            }
        }
        hierarchy::set_parent(&mut self.world, child_entity, parent_entity)
    }

    /// World matrix of an object, composed up to its root on every call
    pub fn world_matrix(&self, object: Object) -> Result<Mat4, SceneError> {
        let entity = self.entity_of(object)?;
        hierarchy::world_matrix(&self.world, entity).ok_or_else(|| {
            SceneError::HierarchyCorrupted(format!("cannot resolve world matrix of {entity}"))
        })
    }

    /// Check every parent/child link
    pub fn validate_hierarchy(&self) -> Result<(), SceneError> {
        hierarchy::validate(&self.world)
    }

    /// First camera in store order
    pub(super) fn first_camera(&self) -> Option<Entity> {
        self.world
            .query::<CameraComponent>()
            .map(|(e, _)| e)
            .find(|e| self.world.has::<TransformComponent>(*e))
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("objects", &self.world.entity_count())
            .field("state", &self.state)
            .field("active_camera", &self.active_camera)
            .finish()
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        log::debug!("Dropping scene `{}` with {} objects", self.name, self.world.entity_count());
    }
}
