use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{Country, Hotel, User};
use crate::repositories::staged::StagedBuffer;
use crate::repositories::{DeletePolicies, Record, Repository};

/// Transactional scope over every repository it hands out.
///
/// Create one per request or logical operation. Repositories obtained from the
/// same unit of work share one staging buffer, and [`UnitOfWork::save`]
/// writes everything staged so far in a single transaction. Whatever is still
/// staged when the unit of work is dropped is discarded.
pub struct UnitOfWork {
    db: DatabaseConnection,
    policies: Arc<DeletePolicies>,
    staged: StagedBuffer,
    repositories: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl UnitOfWork {
    pub fn new(db: DatabaseConnection, policies: Arc<DeletePolicies>) -> Self {
        Self {
            db,
            policies,
            staged: Arc::new(Mutex::new(Vec::new())),
            repositories: HashMap::new(),
        }
    }

    /// Repository for `T`, created on first use and reused afterwards
    pub fn repository<T: Record>(&mut self) -> Repository<T> {
        let cached = self
            .repositories
            .get(&TypeId::of::<T>())
            .and_then(|cached| cached.downcast_ref::<Repository<T>>());
        if let Some(repository) = cached {
            return repository.clone();
        }

        let repository = Repository::<T>::new(self.db.clone(), Arc::clone(&self.staged));
        self.repositories
            .insert(TypeId::of::<T>(), Box::new(repository.clone()));
        repository
    }

    /// Number of distinct repositories handed out so far
    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    pub fn countries(&mut self) -> Repository<Country> {
        self.repository()
    }

    pub fn hotels(&mut self) -> Repository<Hotel> {
        self.repository()
    }

    pub fn users(&mut self) -> Repository<User> {
        self.repository()
    }

    /// Number of changes waiting for the next save
    pub async fn pending(&self) -> usize {
        self.staged.lock().await.len()
    }

    /// Commit every staged change atomically and return the affected row count.
    ///
    /// The staged set is taken up front: after this returns, successful or not,
    /// nothing from it is left to commit. On failure the transaction is rolled
    /// back and none of the changes are visible.
    pub async fn save(&self) -> AppResult<u64> {
        let changes = std::mem::take(&mut *self.staged.lock().await);
        if changes.is_empty() {
            return Ok(0);
        }

        tracing::debug!(changes = changes.len(), "Committing unit of work");

        let txn = self.db.begin().await?;
        let mut affected = 0;
        let mut on_commit = Vec::with_capacity(changes.len());

        for change in &changes {
            match change.apply(&txn, &self.policies).await {
                Ok(applied) => {
                    affected += applied.rows;
                    on_commit.extend(applied.on_commit);
                }
                Err(err) => {
                    tracing::debug!(change = %change.describe(), error = %err, "Rolling back unit of work");
                    if let Err(rollback_err) = txn.rollback().await {
                        tracing::warn!(error = %rollback_err, "Rollback failed");
                    }
                    return Err(err);
                }
            }
        }

        txn.commit().await?;

        for settle in on_commit {
            settle();
        }

        Ok(affected)
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if let Ok(staged) = self.staged.try_lock() {
            if !staged.is_empty() {
                tracing::debug!(changes = staged.len(), "Discarding unsaved changes");
            }
        }
    }
}
