//! # Favorites
//!
//! User-curated subset of the catalog. Unique by id, iterated in insertion
//! order, with constant-time lookup for match resolution.

use std::collections::HashMap;

use crate::models::{DogId, DogRecord};

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    by_id: HashMap<DogId, DogRecord>,
    order: Vec<DogId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dog. Returns `false` if its id was already present.
    pub fn add(&mut self, dog: DogRecord) -> bool {
        if self.by_id.contains_key(&dog.id) {
            return false;
        }
        self.order.push(dog.id.clone());
        self.by_id.insert(dog.id.clone(), dog);
        true
    }

    /// Remove a dog by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<DogRecord> {
        let dog = self.by_id.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(dog)
    }

    pub fn get(&self, id: &str) -> Option<&DogRecord> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[DogId] {
        &self.order
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DogRecord> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}
