// storage.rs - Sparse per-component columns
//
// Each component kind has one column indexed by entity index. Scenes hold a
// handful of entities, so a sparse Vec<Option<T>> keeps lookups O(1) and
// iteration ordered by entity index without any unsafe layout tricks.

use crate::ecs::{Component, ComponentMeta, Entity};
use std::any::Any;

/// Storage for every instance of a single component kind.
pub struct Column<T: Component> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T: Component> Column<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Insert or replace the component stored for `entity`.
    ///
    /// Returns the previous value when one was attached.
    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        let idx = entity.index() as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        let previous = self.slots[idx].replace(value);
        if previous.is_none() {
            self.live += 1;
        }
        previous
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots
            .get(entity.index() as usize)
            .and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots
            .get_mut(entity.index() as usize)
            .and_then(|slot| slot.as_mut())
    }

    /// Iterate `(index, component)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|c| (idx as u32, c)))
    }
}

impl<T: Component> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a column so the World can keep every kind in one map.
pub(crate) trait AnyColumn {
    fn meta(&self) -> ComponentMeta;
    fn contains_index(&self, index: u32) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyColumn for Column<T> {
    fn meta(&self) -> ComponentMeta {
        T::meta()
    }

    fn contains_index(&self, index: u32) -> bool {
        matches!(self.slots.get(index as usize), Some(Some(_)))
    }

    fn len(&self) -> usize {
        self.live
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
