//! Object snapshots
//!
//! An [`ObjectSnapshot`] carries everything needed to rebuild an object: name,
//! UUID, parent UUID, local transform, the set of attached components and their
//! data. The on-disk format is left to the caller; snapshots are plain serde
//! values.

use super::{hierarchy, Object, Scene, SceneError};
use crate::ecs::components::{
    AnimationComponent, BoxColliderComponent, CameraComponent, CircleColliderComponent, RigidbodyComponent,
    ScriptComponent, SpriteComponent, TagComponent, TransformComponent,
};
use crate::ecs::{Component, ComponentFlags, ComponentKind, Entity};
use crate::foundation::math::Vec2;
use serde::{Serialize, Deserialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Reconstructible state of one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Display name
    pub name: String,
    /// Identity
    pub uuid: Uuid,
    /// Parent identity, `None` for a root
    #[serde(default)]
    pub parent: Option<Uuid>,
    /// Local translation
    pub translation: Vec2,
    /// Local rotation in radians
    pub rotation: f32,
    /// Local scale
    pub scale: Vec2,
    /// Attached components
    pub components: ComponentFlags,

    /// Sprite data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteComponent>,
    /// Animation data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationComponent>,
    /// Camera data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraComponent>,
    /// Script data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptComponent>,
    /// Box collider data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_collider: Option<BoxColliderComponent>,
    /// Circle collider data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_collider: Option<CircleColliderComponent>,
    /// Rigidbody data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rigidbody: Option<RigidbodyComponent>,
}

impl ObjectSnapshot {
    fn has_payload(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Transform | ComponentKind::Tag => true,
            ComponentKind::Sprite => self.sprite.is_some(),
            ComponentKind::Animation => self.animation.is_some(),
            ComponentKind::Camera => self.camera.is_some(),
            ComponentKind::Script => self.script.is_some(),
            ComponentKind::BoxCollider => self.box_collider.is_some(),
            ComponentKind::CircleCollider => self.circle_collider.is_some(),
            ComponentKind::Rigidbody => self.rigidbody.is_some(),
        }
    }

    fn check(&self) -> Result<(), SceneError> {
        match self.components.kinds().find(|kind| !self.has_payload(*kind)) {
            Some(kind) => Err(SceneError::IncompleteSnapshot {
                name: self.name.clone(),
                kind,
            }),
            None => Ok(()),
        }
    }
}

impl Scene {
    /// Capture one object
    pub fn snapshot_object(&self, object: Object) -> Result<ObjectSnapshot, SceneError> {
        let entity = self.entity_of(object)?;
        let tag = self.component::<TagComponent>(object)?;
        let transform = self.component::<TransformComponent>(object)?;
        let parent = transform
            .parent()
            .and_then(|p| self.world.get::<TagComponent>(p))
            .map(TagComponent::uuid);

        Ok(ObjectSnapshot {
            name: tag.name.clone(),
            uuid: tag.uuid(),
            parent,
            translation: transform.translation,
            rotation: transform.rotation,
            scale: transform.scale,
            components: self.world.kinds_of(entity),
            sprite: self.world.get::<SpriteComponent>(entity).cloned(),
            animation: self.world.get::<AnimationComponent>(entity).cloned(),
            camera: self.world.get::<CameraComponent>(entity).copied(),
            script: self.world.get::<ScriptComponent>(entity).cloned().map(|mut s| {
                s.unbind();
                s
            }),
            box_collider: self.world.get::<BoxColliderComponent>(entity).cloned(),
            circle_collider: self.world.get::<CircleColliderComponent>(entity).cloned(),
            rigidbody: self.world.get::<RigidbodyComponent>(entity).cloned().map(|mut r| {
                r.runtime_body = None;
                r
            }),
        })
    }

    /// Capture every object, parents before their children, children in order
    pub fn snapshot_all(&self) -> Result<Vec<ObjectSnapshot>, SceneError> {
        let roots = self
            .world
            .query::<TransformComponent>()
            .filter(|(_, t)| t.parent().is_none())
            .map(|(e, _)| e);

        let mut snapshots = Vec::with_capacity(self.object_count());
        for root in roots {
            snapshots.push(self.snapshot_object(self.object(root))?);
            for descendant in hierarchy::descendants(&self.world, root) {
                snapshots.push(self.snapshot_object(self.object(descendant))?);
            }
        }
        Ok(snapshots)
    }

    /// Recreate objects from snapshots
    ///
    /// Every snapshot and the batch's parent links are checked before anything
    /// is created, so a bad batch leaves the scene untouched. Parents are linked by UUID after all objects
    /// exist; a parent UUID that matches nothing leaves the object a root.
    pub fn restore_objects(&mut self, snapshots: &[ObjectSnapshot]) -> Result<Vec<Object>, SceneError> {
        let mut seen = HashSet::new();
        for snapshot in snapshots {
            snapshot.check()?;
            if self.uuids.contains_key(&snapshot.uuid) || !seen.insert(snapshot.uuid) {
                return Err(SceneError::DuplicateUuid(snapshot.uuid));
            }
        }
        check_parent_links(snapshots)?;

        let mut restored = Vec::with_capacity(snapshots.len());
        for snapshot in snapshots {
            let object = self.create_object_with_uuid(&snapshot.name, snapshot.uuid)?;
            let entity = self.entity_of(object)?;
            {
                let mut transform = self.transform_mut(object)?;
                *transform.translation() = snapshot.translation;
                *transform.rotation() = snapshot.rotation;
                *transform.scale() = snapshot.scale;
            }
            let flags = snapshot.components;
            self.restore_component(entity, flags, snapshot.sprite.clone())?;
            self.restore_component(entity, flags, snapshot.animation.clone())?;
            self.restore_component(entity, flags, snapshot.camera)?;
            self.restore_component(entity, flags, snapshot.script.clone())?;
            self.restore_component(entity, flags, snapshot.box_collider.clone())?;
            self.restore_component(entity, flags, snapshot.circle_collider.clone())?;
            self.restore_component(entity, flags, snapshot.rigidbody.clone())?;
            restored.push(object);
        }

        for (snapshot, object) in snapshots.iter().zip(&restored) {
            let Some(parent_uuid) = snapshot.parent else {
                continue;
            };
            let parent = self.object_by_uuid(parent_uuid);
            if parent.is_null() {
                log::warn!("Parent {parent_uuid} of `{}` not found, restoring as root", snapshot.name);
                continue;
            }
            self.set_parent(*object, parent)?;
        }

        log::debug!("Restored {} objects into `{}`", restored.len(), self.name());
        Ok(restored)
    }

    fn restore_component<T: Component>(
        &mut self,
        entity: Entity,
        flags: ComponentFlags,
        component: Option<T>,
    ) -> Result<(), SceneError> {
        if let Some(component) = component.filter(|_| flags.contains(T::KIND.flag())) {
            self.world.insert(entity, component)?;
        }
        Ok(())
    }
}

/// Reject parent links that loop within the batch
///
/// Objects already in the scene cannot descend from new ones, so only links
/// between batch members can close a cycle.
fn check_parent_links(snapshots: &[ObjectSnapshot]) -> Result<(), SceneError> {
    let parents: HashMap<Uuid, Uuid> = snapshots
        .iter()
        .filter_map(|s| s.parent.map(|parent| (s.uuid, parent)))
        .collect();
    for snapshot in snapshots {
        let mut current = snapshot.uuid;
        for _ in 0..snapshots.len() {
            let Some(parent) = parents.get(&current) else {
                break;
            };
            if *parent == snapshot.uuid {
                return Err(SceneError::SnapshotCycle(snapshot.uuid));
            }
            current = *parent;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use crate::scripting::ScriptValueType;

    #[test]
    fn test_snapshot_restore_preserves_objects() {
        let mut scene = Scene::new("source");
        let parent = scene.create_object("Parent");
        let child = scene.create_object("Child");
        scene.set_parent(child, parent).unwrap();
        *scene.transform_mut(child).unwrap().translation() = Vec2::new(1.0, 2.0);
        scene
            .add_component(child, SpriteComponent::from_color(Color::new(1.0, 0.0, 0.0, 1.0)).with_layer(3))
            .unwrap();
        scene
            .add_component(
                child,
                ScriptComponent::new("scripts/Player.cs").with_variable("health", ScriptValueType::Int, "100"),
            )
            .unwrap();

        let snapshots = scene.snapshot_all().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].name, "Parent");
        assert_eq!(snapshots[1].parent, Some(scene.uuid_of(parent).unwrap()));

        let mut copy = Scene::new("copy");
        let restored = copy.restore_objects(&snapshots).unwrap();
        assert_eq!(copy.object_count(), 2);

        let restored_child = restored[1];
        assert_eq!(copy.uuid_of(restored_child).unwrap(), scene.uuid_of(child).unwrap());
        assert_eq!(copy.parent_of(restored_child).unwrap(), restored[0]);
        assert_eq!(copy.component::<SpriteComponent>(restored_child).unwrap().layer, 3);
        assert_eq!(copy.component::<ScriptComponent>(restored_child).unwrap().variables.len(), 1);
        assert_eq!(
            copy.component::<TransformComponent>(restored_child).unwrap().translation,
            Vec2::new(1.0, 2.0)
        );
        copy.validate_hierarchy().unwrap();
    }

    #[test]
    fn test_restore_rejects_incomplete_snapshot() {
        let mut scene = Scene::new("source");
        let object = scene.create_object("Lonely");
        let mut snapshot = scene.snapshot_object(object).unwrap();
        snapshot.components |= ComponentFlags::SPRITE;

        let mut target = Scene::new("target");
        let err = target.restore_objects(&[snapshot]).unwrap_err();
        assert!(matches!(err, SceneError::IncompleteSnapshot { kind: ComponentKind::Sprite, .. }));
        assert_eq!(target.object_count(), 0);
    }

    #[test]
    fn test_restore_rejects_duplicate_uuid() {
        let mut scene = Scene::new("source");
        let object = scene.create_object("Original");
        let snapshot = scene.snapshot_object(object).unwrap();

        let err = scene.restore_objects(&[snapshot.clone()]).unwrap_err();
        assert_eq!(err, SceneError::DuplicateUuid(snapshot.uuid));
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_restore_rejects_parent_cycle() {
        let mut scene = Scene::new("source");
        let a = scene.create_object("A");
        let b = scene.create_object("B");
        let mut first = scene.snapshot_object(a).unwrap();
        let mut second = scene.snapshot_object(b).unwrap();
        first.parent = Some(second.uuid);
        second.parent = Some(first.uuid);

        let mut target = Scene::new("target");
        let err = target.restore_objects(&[first.clone(), second]).unwrap_err();
        assert_eq!(err, SceneError::SnapshotCycle(first.uuid));
        assert_eq!(target.object_count(), 0);

        first.parent = Some(first.uuid);
        assert_eq!(
            target.restore_objects(&[first.clone()]).unwrap_err(),
            SceneError::SnapshotCycle(first.uuid)
        );
        assert_eq!(target.object_count(), 0);
    }

    #[test]
    fn test_snapshot_round_trips_through_ron() {
        let mut scene = Scene::new("source");
        let object = scene.create_object("Body");
        scene.add_component(object, RigidbodyComponent::default()).unwrap();

        let snapshot = scene.snapshot_object(object).unwrap();
        let text = ron::to_string(&snapshot).unwrap();
        let parsed: ObjectSnapshot = ron::from_str(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
