pub mod country;
pub mod hotel;
pub mod paging;
pub mod policy;
pub mod query;
mod staged;
pub mod unit_of_work;
pub mod user;

pub use country::CountryInclude;
pub use hotel::HotelInclude;
pub use paging::{PageMetadata, PageRequest, PagedResult};
pub use policy::{DeletePolicies, DeletePolicy};
pub use query::{Include, Includes, QuerySpec};
pub use unit_of_work::UnitOfWork;
pub use user::UserInclude;

use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, Iterable, PaginatorTrait, PrimaryKeyToColumn,
    PrimaryKeyTrait, QuerySelect, Value,
};
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::repositories::staged::{Change, StagedBuffer};

pub type ModelOf<T> = <<T as Record>::Entity as EntityTrait>::Model;
pub type PrimaryKeyValue<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// A domain record persisted through a [`Repository`].
///
/// Implementors describe how to move between the domain type and its SeaORM
/// entity, which relations can be eagerly loaded, and what has to happen to
/// dependent rows before a delete.
#[async_trait]
pub trait Record: Clone + Send + Sync + Sized + 'static {
    type Entity: EntityTrait<Model: Sync>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + 'static;
    type Key: Copy
        + Debug
        + Display
        + PartialEq
        + Send
        + Sync
        + 'static
        + Into<Value>
        + Into<PrimaryKeyValue<Self::Entity>>
        + From<PrimaryKeyValue<Self::Entity>>;
    type Include: Include;

    /// Name used in error messages
    const NAME: &'static str;

    fn key(&self) -> Self::Key;

    /// Active model for an insert. An unassigned key is left to the engine.
    fn to_insert(&self) -> Self::ActiveModel;

    /// Active model for an update, with every non-key column marked as set.
    fn to_update(&self) -> Self::ActiveModel;

    /// Check required fields before anything is staged
    fn validate(&self) -> AppResult<()>;

    /// Convert `models` and attach the requested relations.
    async fn load(
        db: &DatabaseConnection,
        models: Vec<ModelOf<Self>>,
        includes: &Includes<Self::Include>,
    ) -> AppResult<Vec<Self>>;

    /// Deal with dependent rows ahead of deleting `key`, returning how many
    /// rows were removed alongside it.
    async fn before_delete(
        _txn: &DatabaseTransaction,
        _key: Self::Key,
        _policies: &DeletePolicies,
    ) -> AppResult<u64> {
        Ok(0)
    }
}

/// Condition matching the primary key of `T`
pub fn key_condition<T: Record>(key: T::Key) -> Condition {
    let mut condition = Condition::all();
    for column in <T::Entity as EntityTrait>::PrimaryKey::iter() {
        condition = condition.add(column.into_column().eq(key));
    }
    condition
}

/// Handle on a staged insert, resolved once the owning save commits.
#[derive(Debug, Clone)]
pub struct InsertTicket<K> {
    slot: Arc<OnceLock<K>>,
}

impl<K: Copy> InsertTicket<K> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Arc::new(OnceLock::new()),
        }
    }

    pub(crate) fn slot(&self) -> Arc<OnceLock<K>> {
        Arc::clone(&self.slot)
    }

    /// Key of the stored row, `None` until the insert has been committed
    pub fn id(&self) -> Option<K> {
        self.slot.get().copied()
    }
}

/// Data access for one record type, bound to a [`UnitOfWork`].
///
/// Reads go straight to the database. Writes are only staged here and reach
/// the database when the unit of work is saved.
pub struct Repository<T: Record> {
    db: DatabaseConnection,
    staged: StagedBuffer,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            staged: Arc::clone(&self.staged),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub(crate) fn new(db: DatabaseConnection, staged: StagedBuffer) -> Self {
        Self {
            db,
            staged,
            _record: PhantomData,
        }
    }

    /// First record matching `spec`, with its includes loaded
    pub async fn get(&self, spec: QuerySpec<T>) -> AppResult<Option<T>> {
        let model = spec.select().one(&self.db).await?;

        match model {
            Some(model) => {
                let records = T::load(&self.db, vec![model], spec.included()).await?;
                Ok(records.into_iter().next())
            }
            None => Ok(None),
        }
    }

    /// Record with the given key
    pub async fn get_by_id(
        &self,
        key: T::Key,
        includes: Includes<T::Include>,
    ) -> AppResult<Option<T>> {
        self.get(QuerySpec::by_key(key).includes(includes)).await
    }

    /// Every record matching `spec`; paging on the spec is ignored
    pub async fn get_all(&self, spec: QuerySpec<T>) -> AppResult<Vec<T>> {
        let models = spec.select().all(&self.db).await?;
        T::load(&self.db, models, spec.included()).await
    }

    /// [`Repository::get_all`] that gives up as soon as `cancel` fires.
    ///
    /// The in-flight query is dropped; staged changes are not touched.
    pub async fn get_all_cancellable(
        &self,
        spec: QuerySpec<T>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<T>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AppError::Cancelled),
            result = self.get_all(spec) => result,
        }
    }

    /// One page of the records matching `spec`.
    ///
    /// The total is counted over the filtered set before the page is cut.
    /// Count and fetch are separate statements, so concurrent writes may
    /// make them disagree.
    pub async fn get_paged_list(&self, spec: QuerySpec<T>) -> AppResult<PagedResult<T>> {
        let page = spec.page_request();
        let total_count = self.count(&spec).await?;

        // Pages past the end, however far, are empty
        let offset = match page.offset() {
            Some(offset) if offset < total_count => offset,
            _ => return Ok(PagedResult::new(Vec::new(), total_count, page)),
        };

        let models = spec
            .stable_select()
            .offset(offset)
            .limit(page.page_size())
            .all(&self.db)
            .await?;
        let items = T::load(&self.db, models, spec.included()).await?;

        Ok(PagedResult::new(items, total_count, page))
    }

    /// Number of records matching `spec`
    pub async fn count(&self, spec: &QuerySpec<T>) -> AppResult<u64> {
        let count = spec.select().count(&self.db).await?;
        Ok(count)
    }

    /// Stage a new record
    pub async fn insert(&self, record: T) -> AppResult<InsertTicket<T::Key>> {
        record.validate()?;

        let ticket = InsertTicket::new();
        self.stage(Change::Insert {
            record,
            slot: ticket.slot(),
        })
        .await;

        Ok(ticket)
    }

    /// Stage a full overwrite of a stored record.
    ///
    /// Every column is written, so pass a record fetched in this scope and
    /// mutated, not one built from scratch.
    pub async fn update(&self, record: T) -> AppResult<()> {
        record.validate()?;
        self.stage(Change::Update(record)).await;
        Ok(())
    }

    /// Stage removal of the record with the given key
    pub async fn delete(&self, key: T::Key) -> AppResult<()> {
        self.stage(Change::<T>::Delete(key)).await;
        Ok(())
    }

    async fn stage(&self, change: Change<T>) {
        self.staged.lock().await.push(Box::new(change));
    }
}
