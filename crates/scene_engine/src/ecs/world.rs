//! ECS World implementation

use super::{Component, ComponentFlags, ComponentKind, Entity};
use slotmap::{SecondaryMap, SlotMap};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use thiserror::Error;

/// Component store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was destroyed or never belonged to this world
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}

/// Type-erased view of one component storage, used for entity teardown and
/// introspection without knowing the concrete component type
trait ErasedStorage {
    fn kind(&self) -> ComponentKind;
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn contains(&self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for SecondaryMap<Entity, T> {
    fn kind(&self) -> ComponentKind {
        T::KIND
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.contains_key(entity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
///
/// Iteration over any component type yields entities in ascending slot order.
/// That order is what "store order" means everywhere in the scene API.
pub struct World {
    entities: SlotMap<Entity, ()>,
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity together with all of its components
    ///
    /// Returns `false` if the entity was already dead.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Whether the handle refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all live entities in store order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Add a component to an entity, returning the component it replaced
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Result<Option<T>, EcsError> {
        if !self.contains(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        Ok(self.storage_mut::<T>().insert(entity, component))
    }

    /// Remove a component from an entity
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()?
            .remove(entity)
    }

    /// Get a component from an entity
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<SecondaryMap<Entity, T>>()?
            .get_mut(entity)
    }

    /// Whether the entity carries a component of type `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|s| s.contains_key(entity))
    }

    /// Number of stored components of type `T`
    pub fn count<T: Component>(&self) -> usize {
        self.storage::<T>().map_or(0, SecondaryMap::len)
    }

    /// Kinds of all components attached to an entity
    pub fn kinds_of(&self, entity: Entity) -> ComponentFlags {
        self.storages
            .values()
            .filter(|storage| storage.contains(entity))
            .fold(ComponentFlags::empty(), |flags, storage| flags | storage.kind().flag())
    }

    /// Iterate every `(entity, component)` pair of type `T` in store order
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.storage::<T>().into_iter().flat_map(|storage| storage.iter())
    }

    /// Mutable variant of [`World::query`]
    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SecondaryMap<Entity, T>>())
            .into_iter()
            .flat_map(|storage| storage.iter_mut())
    }

    /// Collect the entities carrying `T`
    ///
    /// Collect first, mutate after: this is the way to change the world
    /// structurally based on a component group.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.query::<T>().map(|(entity, _)| entity).collect()
    }

    /// Collect the entities carrying both `A` and `B`, in the store order of `A`
    pub fn entities_with_both<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.query::<A>()
            .map(|(entity, _)| entity)
            .filter(|entity| self.has::<B>(*entity))
            .collect()
    }

    /// Entities carrying `T`, stable-sorted by a key of their `T` component
    ///
    /// Entities with equal keys keep their relative store order.
    pub fn sorted_by<T: Component, K: Ord>(&self, key: impl Fn(&T) -> K) -> Vec<Entity> {
        let mut keyed: Vec<(K, Entity)> = self.query::<T>().map(|(entity, c)| (key(c), entity)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Remove every entity and component
    pub fn clear(&mut self) {
        self.entities.clear();
        self.storages.clear();
    }

    fn storage<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.storages.get(&TypeId::of::<T>())?.as_any().downcast_ref()
    }

    fn storage_mut<T: Component>(&mut self) -> &mut SecondaryMap<Entity, T> {
        self.storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()))
            .as_any_mut()
            .downcast_mut()
            .expect("component storage is keyed by its own TypeId")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Health(i32);

    impl Component for Health {
        const KIND: ComponentKind = ComponentKind::Script;
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Layer(i32);

    impl Component for Layer {
        const KIND: ComponentKind = ComponentKind::Sprite;
    }

    #[test]
    fn test_create_and_destroy_entities() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        assert_eq!(world.entity_count(), 2);

        world.insert(a, Health(10)).unwrap();
        assert!(world.destroy_entity(a));
        assert!(!world.destroy_entity(a));
        assert!(!world.contains(a));
        assert!(world.contains(b));
        assert_eq!(world.count::<Health>(), 0);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut world = World::new();
        let a = world.create_entity();
        world.destroy_entity(a);
        let b = world.create_entity();

        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert!(!world.contains(a));
        assert_eq!(world.insert(a, Health(1)), Err(EcsError::DeadEntity(a)));
        assert!(world.get::<Health>(a).is_none());
    }

    #[test]
    fn test_insert_get_remove() {
        let mut world = World::new();
        let e = world.create_entity();
        assert_eq!(world.insert(e, Health(5)).unwrap(), None);
        assert_eq!(world.insert(e, Health(7)).unwrap(), Some(Health(5)));

        world.get_mut::<Health>(e).unwrap().0 += 1;
        assert_eq!(world.get::<Health>(e), Some(&Health(8)));
        assert!(world.has::<Health>(e));
        assert!(!world.has::<Layer>(e));

        assert_eq!(world.remove::<Health>(e), Some(Health(8)));
        assert!(!world.has::<Health>(e));
    }

    #[test]
    fn test_kinds_of() {
        let mut world = World::new();
        let e = world.create_entity();
        world.insert(e, Health(1)).unwrap();
        world.insert(e, Layer(0)).unwrap();
        assert_eq!(world.kinds_of(e), ComponentFlags::SCRIPT | ComponentFlags::SPRITE);
    }

    #[test]
    fn test_query_follows_store_order() {
        let mut world = World::new();
        let entities: Vec<_> = (0..4).map(|_| world.create_entity()).collect();
        // Insert out of order; iteration still follows slot order
        for (i, e) in entities.iter().enumerate().rev() {
            world.insert(*e, Health(i as i32)).unwrap();
        }
        let seen: Vec<_> = world.query::<Health>().map(|(e, _)| e).collect();
        assert_eq!(seen, entities);
    }

    #[test]
    fn test_entities_with_both() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.insert(a, Health(1)).unwrap();
        world.insert(b, Health(1)).unwrap();
        world.insert(b, Layer(3)).unwrap();
        assert_eq!(world.entities_with_both::<Health, Layer>(), vec![b]);
    }

    #[test]
    fn test_sorted_by_is_stable() {
        let mut world = World::new();
        let e: Vec<_> = (0..4).map(|_| world.create_entity()).collect();
        world.insert(e[0], Layer(2)).unwrap();
        world.insert(e[1], Layer(1)).unwrap();
        world.insert(e[2], Layer(2)).unwrap();
        world.insert(e[3], Layer(1)).unwrap();

        let order = world.sorted_by::<Layer, _>(|l| l.0);
        assert_eq!(order, vec![e[1], e[3], e[0], e[2]]);
    }

    #[test]
    fn test_query_mut() {
        let mut world = World::new();
        for _ in 0..3 {
            let e = world.create_entity();
            world.insert(e, Health(1)).unwrap();
        }
        for (_, health) in world.query_mut::<Health>() {
            health.0 *= 10;
        }
        assert!(world.query::<Health>().all(|(_, h)| h.0 == 10));
    }
}
