//! Transform hierarchy
//!
//! Parent and child links live in [`TransformComponent`] as entity handles.
//! These functions are the only code that writes them, which keeps the two
//! directions in agreement: `a.parent == Some(b)` exactly when `b.children`
//! holds `a` once.

use super::SceneError;
use crate::ecs::components::TransformComponent;
use crate::ecs::{ComponentKind, Entity, World};
use crate::foundation::math::Mat4;

/// Whether `ancestor` is `entity` itself or one of its ancestors
pub fn is_ancestor(world: &World, ancestor: Entity, entity: Entity) -> bool {
    let mut current = Some(entity);
    let mut steps = 0;
    while let Some(e) = current {
        if e == ancestor {
            return true;
        }
        // A corrupted graph could loop; never walk more links than there are entities
        steps += 1;
        if steps > world.entity_count() {
            debug_assert!(false, "cycle in transform hierarchy at {e}");
            return false;
        }
        current = world.get::<TransformComponent>(e).and_then(TransformComponent::parent);
    }
    false
}

/// Move `child` under `parent`, or to the root when `parent` is `None`
///
/// The caller has ruled out cycles. The child is removed from its old parent's
/// list before it is appended to the new one, so re-setting the same parent moves
/// the child to the end of the list.
pub fn set_parent(world: &mut World, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
    if !world.has::<TransformComponent>(child) {
        return Err(SceneError::MissingComponent(child, ComponentKind::Transform));
    }
    if let Some(parent) = parent {
        if !world.has::<TransformComponent>(parent) {
            return Err(SceneError::MissingComponent(parent, ComponentKind::Transform));
        }
    }

    detach(world, child);

    if let Some(parent) = parent {
        if let Some(transform) = world.get_mut::<TransformComponent>(parent) {
            transform.children.push(child);
        }
    }
    if let Some(transform) = world.get_mut::<TransformComponent>(child) {
        transform.parent = parent;
    }

    debug_assert!(validate(world).is_ok(), "{:?}", validate(world));
    Ok(())
}

/// Unlink `child` from its parent, leaving it a root
pub fn detach(world: &mut World, child: Entity) {
    let Some(old_parent) = world.get_mut::<TransformComponent>(child).and_then(|t| t.parent.take()) else {
        return;
    };
    if let Some(transform) = world.get_mut::<TransformComponent>(old_parent) {
        transform.children.retain(|c| *c != child);
    }
}

/// Every descendant of `entity`, depth first, children before grandchildren of later siblings
pub fn descendants(world: &World, entity: Entity) -> Vec<Entity> {
    let mut out = Vec::new();
    let mut stack: Vec<Entity> = world
        .get::<TransformComponent>(entity)
        .map(|t| t.children.iter().rev().copied().collect())
        .unwrap_or_default();
    while let Some(next) = stack.pop() {
        out.push(next);
        if let Some(transform) = world.get::<TransformComponent>(next) {
            stack.extend(transform.children.iter().rev().copied());
        }
    }
    out
}

/// Compose local matrices from `entity` up to its root
///
/// Resolved on every call; nothing is cached.
pub fn world_matrix(world: &World, entity: Entity) -> Option<Mat4> {
    let mut matrix = world.get::<TransformComponent>(entity)?.local_matrix();
    let mut current = world.get::<TransformComponent>(entity)?.parent;
    let mut steps = 0;
    while let Some(parent) = current {
        steps += 1;
        if steps > world.entity_count() {
            log::error!("Cycle in transform hierarchy above {entity}");
            return None;
        }
        let transform = world.get::<TransformComponent>(parent)?;
        matrix = transform.local_matrix() * matrix;
        current = transform.parent;
    }
    Some(matrix)
}

/// Check that every link has its counterpart and points at a live entity
pub fn validate(world: &World) -> Result<(), SceneError> {
    for (entity, transform) in world.query::<TransformComponent>() {
        if let Some(parent) = transform.parent {
            let listed = world
                .get::<TransformComponent>(parent)
                .map_or(0, |p| p.children.iter().filter(|c| **c == entity).count());
            if listed != 1 {
                return Err(SceneError::HierarchyCorrupted(format!(
                    "{entity} has parent {parent}, which lists it {listed} times"
                )));
            }
        }
        for child in &transform.children {
            let back = world.get::<TransformComponent>(*child).and_then(TransformComponent::parent);
            if back != Some(entity) {
                return Err(SceneError::HierarchyCorrupted(format!(
                    "{entity} lists child {child}, whose parent is {back:?}"
                )));
            }
        }
    }
    Ok(())
}
