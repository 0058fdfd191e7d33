use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracker_core::{AuthMethod, Entity, Role, User};

use crate::providers::InMemoryRepository;
use crate::session::Session;
use crate::storage::{BackendError, BackendErrorKind, StorageResult};
use crate::traits::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoOp {
    Create,
    Update,
    Delete,
    GetAll,
    GetById,
}

/// In-memory repository that fails configured operations.
pub struct FlakyRepository<E: Entity> {
    inner: InMemoryRepository<E>,
    failures: Mutex<HashMap<RepoOp, BackendErrorKind>>,
    calls: Mutex<Vec<RepoOp>>,
}

impl<E: Entity> FlakyRepository<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_records([])
    }

    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        Self {
            inner: InMemoryRepository::with_records(records),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn fail_on(self, op: RepoOp, kind: BackendErrorKind) -> Self {
        self.failures
            .lock()
            .expect("lock poisoned")
            .insert(op, kind);
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<RepoOp> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the backing store cannot be read.
    pub async fn stored(&self) -> Vec<E> {
        self.inner.get_all().await.expect("in-memory read")
    }

    fn check(&self, op: RepoOp) -> StorageResult<()> {
        self.calls.lock().expect("lock poisoned").push(op);
        match self.failures.lock().expect("lock poisoned").get(&op) {
            Some(kind) => Err(BackendError::new(*kind, format!("simulated {op:?} failure")).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for FlakyRepository<E> {
    async fn create(&self, entity: &E) -> StorageResult<()> {
        self.check(RepoOp::Create)?;
        self.inner.create(entity).await
    }

    async fn update(&self, entity: &E) -> StorageResult<()> {
        self.check(RepoOp::Update)?;
        self.inner.update(entity).await
    }

    async fn delete(&self, id: E::Id) -> StorageResult<()> {
        self.check(RepoOp::Delete)?;
        self.inner.delete(id).await
    }

    async fn get_all(&self) -> StorageResult<Vec<E>> {
        self.check(RepoOp::GetAll)?;
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: E::Id) -> StorageResult<Option<E>> {
        self.check(RepoOp::GetById)?;
        self.inner.get_by_id(id).await
    }
}

pub fn session_for(role: Role) -> Session {
    Session::for_user(User::new(
        format!("{role}-user"),
        role,
        AuthMethod::Password {
            secret: "secret".to_string(),
        },
    ))
}
