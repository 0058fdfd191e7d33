use std::sync::RwLock;

use async_trait::async_trait;
use indexmap::IndexMap;
use tracker_core::Entity;

use crate::storage::{BackendError, StorageResult};
use crate::traits::Repository;

/// Process-local repository keeping entities in insertion order.
pub struct InMemoryRepository<E: Entity> {
    records: RwLock<IndexMap<E::Id, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|e| (e.id(), e)).collect()),
        }
    }

    fn poisoned() -> BackendError {
        BackendError::other("in-memory store lock poisoned")
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn create(&self, entity: &E) -> StorageResult<()> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        if records.contains_key(&entity.id()) {
            return Err(BackendError::other(format!(
                "{} '{}' already exists",
                E::ENTITY_TYPE,
                entity.id()
            ))
            .into());
        }
        records.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> StorageResult<()> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        match records.get_mut(&entity.id()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(())
            }
            None => Err(BackendError::other(format!(
                "{} '{}' does not exist",
                E::ENTITY_TYPE,
                entity.id()
            ))
            .into()),
        }
    }

    async fn delete(&self, id: E::Id) -> StorageResult<()> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        match records.shift_remove(&id) {
            Some(_) => Ok(()),
            None => Err(BackendError::other(format!(
                "{} '{id}' does not exist",
                E::ENTITY_TYPE
            ))
            .into()),
        }
    }

    async fn get_all(&self) -> StorageResult<Vec<E>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: E::Id) -> StorageResult<Option<E>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.get(&id).cloned())
    }
}
