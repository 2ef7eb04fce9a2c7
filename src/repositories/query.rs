use std::fmt::Debug;

use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    Condition, EntityTrait, Iterable, Order, PrimaryKeyToColumn, QueryFilter, QueryOrder, Select,
};

use crate::error::{AppError, AppResult};
use crate::repositories::{key_condition, PageRequest, Record};

/// A named relation that can be eagerly loaded alongside a record.
///
/// Each record type declares a closed set of these; free-form names only
/// exist at the edge and are resolved through [`Includes::parse`].
pub trait Include: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every relation declared for the owning record
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Resolve a relation by name, ignoring ASCII case
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|include| include.name().eq_ignore_ascii_case(name))
    }
}

/// Ordered, duplicate-free set of relations to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Includes<I> {
    items: Vec<I>,
}

impl<I: Include> Includes<I> {
    pub fn none() -> Self {
        Self { items: Vec::new() }
    }

    pub fn of(items: impl IntoIterator<Item = I>) -> Self {
        items.into_iter().collect()
    }

    /// Parse a comma separated list such as `"Country, hotels"`.
    ///
    /// Unknown names are rejected rather than skipped.
    pub fn parse(list: &str) -> AppResult<Self> {
        let mut includes = Self::none();
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let include = I::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = I::ALL.iter().map(|include| include.name()).collect();
                AppError::Validation(format!(
                    "unknown relation '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                ))
            })?;
            includes.push(include);
        }
        Ok(includes)
    }

    pub fn push(&mut self, include: I) {
        if !self.items.contains(&include) {
            self.items.push(include);
        }
    }

    pub fn contains(&self, include: I) -> bool {
        self.items.contains(&include)
    }

    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<I: Include> Default for Includes<I> {
    fn default() -> Self {
        Self::none()
    }
}

impl<I: Include> FromIterator<I> for Includes<I> {
    fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
        let mut includes = Self::none();
        for include in iter {
            includes.push(include);
        }
        includes
    }
}

pub type ColumnOf<T> = <<T as Record>::Entity as EntityTrait>::Column;

/// What to fetch: filter, ordering, relations to load and the page to return.
///
/// Filters are SeaORM conditions, so they run in the database rather than
/// in memory. Successive calls to [`QuerySpec::filter`] are combined with AND.
pub struct QuerySpec<T: Record> {
    condition: Option<Condition>,
    order: Vec<(ColumnOf<T>, Order)>,
    includes: Includes<T::Include>,
    page: PageRequest,
}

impl<T: Record> QuerySpec<T> {
    pub fn new() -> Self {
        Self {
            condition: None,
            order: Vec::new(),
            includes: Includes::none(),
            page: PageRequest::default(),
        }
    }

    /// Match the record with the given key
    pub fn by_key(key: T::Key) -> Self {
        Self::new().filter(key_condition::<T>(key))
    }

    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        let condition = filter.into_condition();
        self.condition = Some(match self.condition.take() {
            Some(existing) => existing.add(condition),
            None => Condition::all().add(condition),
        });
        self
    }

    pub fn include(mut self, include: T::Include) -> Self {
        self.includes.push(include);
        self
    }

    pub fn includes(mut self, includes: Includes<T::Include>) -> Self {
        for include in includes.iter() {
            self.includes.push(include);
        }
        self
    }

    pub fn order_by(mut self, column: ColumnOf<T>, order: Order) -> Self {
        self.order.push((column, order));
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    pub fn included(&self) -> &Includes<T::Include> {
        &self.includes
    }

    /// Filtered select with the requested ordering
    pub(crate) fn select(&self) -> Select<T::Entity> {
        let mut select = T::Entity::find();
        if let Some(condition) = &self.condition {
            select = select.filter(condition.clone());
        }
        for (column, order) in &self.order {
            select = select.order_by(*column, order.clone());
        }
        select
    }

    /// Like [`QuerySpec::select`] but falls back to primary key order so
    /// consecutive pages do not overlap.
    pub(crate) fn stable_select(&self) -> Select<T::Entity> {
        let mut select = self.select();
        if self.order.is_empty() {
            for key in <T::Entity as EntityTrait>::PrimaryKey::iter() {
                select = select.order_by_asc(key.into_column());
            }
        }
        select
    }
}

impl<T: Record> Default for QuerySpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Clone for QuerySpec<T> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition.clone(),
            order: self.order.clone(),
            includes: self.includes.clone(),
            page: self.page,
        }
    }
}
