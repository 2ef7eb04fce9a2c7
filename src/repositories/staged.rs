use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, EntityTrait, QueryFilter};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::repositories::{key_condition, DeletePolicies, Record};

/// Changes staged by every repository of one unit of work, in staging order.
pub(crate) type StagedBuffer = Arc<Mutex<Vec<Box<dyn StagedChange>>>>;

/// Outcome of applying one staged change inside the commit transaction.
pub(crate) struct Applied {
    pub rows: u64,
    /// Runs only after the transaction has committed
    pub on_commit: Option<Box<dyn FnOnce() + Send>>,
}

impl Applied {
    fn rows(rows: u64) -> Self {
        Self {
            rows,
            on_commit: None,
        }
    }
}

/// A type-erased pending write.
#[async_trait]
pub(crate) trait StagedChange: Send + Sync {
    fn describe(&self) -> String;

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        policies: &DeletePolicies,
    ) -> AppResult<Applied>;
}

pub(crate) enum Change<T: Record> {
    Insert {
        record: T,
        slot: Arc<OnceLock<T::Key>>,
    },
    Update(T),
    Delete(T::Key),
}

#[async_trait]
impl<T: Record> StagedChange for Change<T> {
    fn describe(&self) -> String {
        match self {
            Change::Insert { .. } => format!("insert {}", T::NAME),
            Change::Update(record) => format!("update {} {}", T::NAME, record.key()),
            Change::Delete(key) => format!("delete {} {}", T::NAME, key),
        }
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        policies: &DeletePolicies,
    ) -> AppResult<Applied> {
        match self {
            Change::Insert { record, slot } => {
                let result = T::Entity::insert(record.to_insert()).exec(txn).await?;
                let key = T::Key::from(result.last_insert_id);
                let slot = Arc::clone(slot);

                Ok(Applied {
                    rows: 1,
                    on_commit: Some(Box::new(move || {
                        let _ = slot.set(key);
                    })),
                })
            }
            Change::Update(record) => {
                let key = record.key();
                let result = T::Entity::update_many()
                    .set(record.to_update())
                    .filter(key_condition::<T>(key))
                    .exec(txn)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(AppError::NotFound(format!("{} {}", T::NAME, key)));
                }

                Ok(Applied::rows(result.rows_affected))
            }
            Change::Delete(key) => {
                let dependents = T::before_delete(txn, *key, policies).await?;
                let result = T::Entity::delete_by_id(*key).exec(txn).await?;

                if result.rows_affected == 0 {
                    return Err(AppError::NotFound(format!("{} {}", T::NAME, key)));
                }

                Ok(Applied::rows(dependents + result.rows_affected))
            }
        }
    }
}
