use async_trait::async_trait;
use tracker_core::Entity;

use crate::storage::StorageResult;

/// Storage port for one entity type.
///
/// Implementations may be file-backed or network-backed. Failures are
/// reported as [`StorageError`](crate::StorageError) and translated by the
/// caller through [`normalize`](crate::normalize).
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the entity cannot be stored or its id already exists.
    async fn create(&self, entity: &E) -> StorageResult<()>;

    /// # Errors
    ///
    /// Returns an error if the entity cannot be stored or does not exist.
    async fn update(&self, entity: &E) -> StorageResult<()>;

    /// # Errors
    ///
    /// Returns an error if the entity cannot be removed or does not exist.
    async fn delete(&self, id: E::Id) -> StorageResult<()>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn get_all(&self) -> StorageResult<Vec<E>>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    async fn get_by_id(&self, id: E::Id) -> StorageResult<Option<E>>;
}
