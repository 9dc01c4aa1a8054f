// world.rs - ECS World with entity management and queries

use crate::components::{Tag, Transform};
use crate::ecs::storage::{AnyColumn, Column};
use crate::ecs::{Component, ComponentId, ComponentMeta, Entity};
use std::collections::{hash_map::Entry, HashMap};
use thiserror::Error;

/// Errors raised by component access on a [`World`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("{entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("{entity} does not belong to this world")]
    DeadEntity { entity: Entity },

    #[error("component id {id} is registered as '{existing}' but '{requested}' claims it")]
    ComponentIdConflict {
        id: ComponentId,
        existing: &'static str,
        requested: &'static str,
    },
}

/// The component registry: every entity and every component of a scene.
///
/// Entities are never despawned, so the entity table only grows and
/// generations stay at zero. Handles from another world fail validation.
pub struct World {
    generations: Vec<u32>,
    columns: HashMap<ComponentId, Box<dyn AnyColumn>>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            columns: HashMap::new(),
        }
    }

    /// Allocate a bare entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let index = self.generations.len() as u32;
        self.generations.push(0);
        Entity::new(index, 0)
    }

    /// Create an entity with `Tag` and `Transform` already attached.
    pub fn create_entity(
        &mut self,
        tag: impl Into<String>,
        x: i32,
        y: i32,
    ) -> Result<Entity, WorldError> {
        let entity = self.spawn();
        self.add_component(entity, Tag::new(tag))?;
        self.add_component(entity, Transform::new(x, y))?;
        tracing::debug!(%entity, "entity created");
        Ok(entity)
    }

    /// Check whether a handle refers to a live entity of this world.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index() as usize)
            .is_some_and(|&generation| generation == entity.generation())
    }

    /// Number of entities created so far.
    pub fn entity_count(&self) -> usize {
        self.generations.len()
    }

    /// Attach a component. Attaching the same kind twice keeps the last value.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(), WorldError> {
        if !self.is_alive(entity) {
            return Err(WorldError::DeadEntity { entity });
        }

        let column = match self.columns.entry(T::ID) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(Box::new(Column::<T>::new())),
        };

        let existing = column.meta();
        let column = column
            .as_any_mut()
            .downcast_mut::<Column<T>>()
            .ok_or_else(|| WorldError::ComponentIdConflict {
                id: T::ID,
                existing: existing.type_name,
                requested: std::any::type_name::<T>(),
            })?;

        if column.insert(entity, value).is_some() {
            tracing::trace!(%entity, component = T::NAME, "component replaced");
        }
        Ok(())
    }

    /// Get an immutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.column::<T>()?.get(entity)
    }

    /// Get a mutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.column_mut::<T>()?.get_mut(entity)
    }

    /// Component access for systems that require the component to exist.
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T, WorldError> {
        if !self.is_alive(entity) {
            return Err(WorldError::DeadEntity { entity });
        }
        self.column::<T>()
            .and_then(|column| column.get(entity))
            .ok_or(WorldError::MissingComponent {
                entity,
                component: T::NAME,
            })
    }

    /// Mutable counterpart of [`World::component`].
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, WorldError> {
        if !self.is_alive(entity) {
            return Err(WorldError::DeadEntity { entity });
        }
        self.column_mut::<T>()
            .and_then(|column| column.get_mut(entity))
            .ok_or(WorldError::MissingComponent {
                entity,
                component: T::NAME,
            })
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Borrow an entity for chained component access.
    pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut {
            world: self,
            entity,
        }
    }

    /// Entities holding ALL of the given component kinds, in ascending
    /// entity-index order.
    ///
    /// Use the [`query!`](crate::query) macro to build the id list from types.
    pub fn query(&self, component_ids: &[ComponentId]) -> Vec<Entity> {
        if component_ids.is_empty() {
            return Vec::new();
        }

        let mut columns = Vec::with_capacity(component_ids.len());
        for cid in component_ids {
            match self.columns.get(cid) {
                Some(column) => columns.push(column),
                None => return Vec::new(),
            }
        }

        self.generations
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                columns
                    .iter()
                    .all(|column| column.contains_index(*index as u32))
            })
            .map(|(index, &generation)| Entity::new(index as u32, generation))
            .collect()
    }

    /// Metadata of every component attached to an entity, ordered by id.
    pub fn components_of(&self, entity: Entity) -> Vec<ComponentMeta> {
        if !self.is_alive(entity) {
            return Vec::new();
        }
        let mut metas: Vec<ComponentMeta> = self
            .columns
            .values()
            .filter(|column| column.contains_index(entity.index()))
            .map(|column| column.meta())
            .collect();
        metas.sort_by_key(|meta| meta.id);
        metas
    }

    /// Number of live components of kind `T`.
    pub fn count<T: Component>(&self) -> usize {
        self.columns.get(&T::ID).map_or(0, |column| column.len())
    }

    fn column<T: Component>(&self) -> Option<&Column<T>> {
        self.columns.get(&T::ID)?.as_any().downcast_ref::<Column<T>>()
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        self.columns
            .get_mut(&T::ID)?
            .as_any_mut()
            .downcast_mut::<Column<T>>()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable handle view of one entity.
///
/// ```ignore
/// let player = world.create_entity("PLAYER", 200, 250)?;
/// world
///     .entity_mut(player)
///     .with(Movement::new(0, 0))?
///     .with(Sprite::new(0, 2, 15.0, 0, 0, 50))?;
/// ```
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl<'w> EntityMut<'w> {
    pub fn id(&self) -> Entity {
        self.entity
    }

    /// Attach a component and keep chaining.
    pub fn with<T: Component>(self, value: T) -> Result<Self, WorldError> {
        self.world.add_component(self.entity, value)?;
        Ok(self)
    }

    pub fn get<T: Component>(&self) -> Result<&T, WorldError> {
        self.world.component::<T>(self.entity)
    }

    pub fn get_mut<T: Component>(&mut self) -> Result<&mut T, WorldError> {
        self.world.component_mut::<T>(self.entity)
    }
}
