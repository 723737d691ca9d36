//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! Every entity gets the same four operations through [`Store`]. What an
//! entity can eagerly load is declared by its [`Record`] impl, one batched
//! query per requested relationship.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityName,
    EntityTrait, IntoActiveModel, Iterable, ModelTrait, PrimaryKeyToColumn, QueryFilter,
    QueryOrder, QuerySelect, Value,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::errors::{AppError, AppResult};

/// Rows fetched when at most one is expected; a second one proves ambiguity.
const UNIQUENESS_PROBE: u64 = 2;

/// Exact-match conjunction of `column = value` pairs. Empty matches every row.
#[derive(Clone, Debug)]
pub struct Filters<E: EntityTrait> {
    pairs: Vec<(E::Column, Value)>,
}

impl<E: EntityTrait> Default for Filters<E> {
    fn default() -> Self {
        Self::none()
    }
}

impl<E: EntityTrait> Filters<E> {
    pub fn none() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn by(column: E::Column, value: impl Into<Value>) -> Self {
        Self::none().and(column, value)
    }

    pub fn and(mut self, column: E::Column, value: impl Into<Value>) -> Self {
        self.pairs.push((column, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn condition(&self) -> Condition {
        self.pairs
            .iter()
            .fold(Condition::all(), |cond, (column, value)| {
                cond.add(column.eq(value.clone()))
            })
    }
}

/// An entity the generic repository can serve.
///
/// `Include` names the relationships callers may ask for; `hydrate` loads
/// them for a whole batch of rows and pairs each row with its related data.
#[async_trait]
pub trait Record: EntityTrait {
    type Include: Copy + Debug + Send + Sync + 'static;
    type Graph: Send;

    async fn hydrate(
        txn: &DatabaseTransaction,
        rows: Vec<Self::Model>,
        include: &[Self::Include],
    ) -> AppResult<Vec<Self::Graph>>;
}

/// Repository bound to one entity type and one open transaction.
pub struct Store<'a, E> {
    txn: &'a DatabaseTransaction,
    _entity: PhantomData<E>,
}

impl<'a, E> Store<'a, E> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self {
            txn,
            _entity: PhantomData,
        }
    }
}

fn table_name<E: EntityName>() -> String {
    E::default().table_name().to_owned()
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E: Record>: Send + Sync {
    /// Get the transaction every query runs in
    fn conn(&self) -> &DatabaseTransaction;

    /// All rows matching `filters`, ordered by primary key, with `include` loaded
    async fn find_all(&self, filters: Filters<E>, include: &[E::Include]) -> AppResult<Vec<E::Graph>> {
        let mut query = E::find().filter(filters.condition());
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }

        let rows = query.all(self.conn()).await?;
        tracing::debug!(table = %table_name::<E>(), rows = rows.len(), ?include, "find_all");

        E::hydrate(self.conn(), rows, include).await
    }

    /// The single row matching `filters`, if any
    async fn find_one_or_none(
        &self,
        filters: Filters<E>,
        include: &[E::Include],
    ) -> AppResult<Option<E::Graph>> {
        let table = table_name::<E>();
        let mut rows = E::find()
            .filter(filters.condition())
            .limit(UNIQUENESS_PROBE)
            .all(self.conn())
            .await?;

        if rows.len() > 1 {
            tracing::error!(table = %table, "find_one_or_none matched more than one row");
            return Err(AppError::ambiguous(table));
        }

        let Some(row) = rows.pop() else {
            tracing::debug!(table = %table, "find_one_or_none matched nothing");
            return Ok(None);
        };

        Ok(E::hydrate(self.conn(), vec![row], include).await?.pop())
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<E: Record>: Send + Sync {
    /// Get the transaction every statement runs in
    fn conn(&self) -> &DatabaseTransaction;

    /// Insert one row and return it with generated id and timestamps
    async fn add(&self, values: E::ActiveModel) -> AppResult<E::Model>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    {
        let table = table_name::<E>();
        let row = values.insert(self.conn()).await.map_err(|e| {
            let error = AppError::from(e);
            tracing::error!(table = %table, error = %error, "insert failed");
            error
        })?;

        tracing::debug!(table = %table, "row added");
        Ok(row)
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<E: Record>: Send + Sync {
    /// Get the transaction every statement runs in
    fn conn(&self) -> &DatabaseTransaction;

    /// Delete exactly one row matching `filters` and return what it held.
    ///
    /// Zero matches is `NotFound`, more than one is `AmbiguousResult`; in
    /// both cases nothing is deleted. Dependents go with the row through
    /// the schema's cascade rules.
    async fn delete(&self, filters: Filters<E>) -> AppResult<E::Model> {
        let table = table_name::<E>();
        let mut rows = E::find()
            .filter(filters.condition())
            .limit(UNIQUENESS_PROBE)
            .all(self.conn())
            .await?;

        let row = match (rows.pop(), rows.is_empty()) {
            (Some(row), true) => row,
            (None, _) => return Err(AppError::not_found(table)),
            (Some(_), false) => {
                tracing::error!(table = %table, "delete matched more than one row");
                return Err(AppError::ambiguous(table));
            }
        };

        let key = E::PrimaryKey::iter().fold(Condition::all(), |cond, key| {
            let column = key.into_column();
            cond.add(column.eq(row.get(column)))
        });

        let result = E::delete_many().filter(key).exec(self.conn()).await?;
        if result.rows_affected != 1 {
            // Removed by a concurrent transaction between the lookup and the delete
            return Err(AppError::not_found(table));
        }

        tracing::debug!(table = %table, "row deleted");
        Ok(row)
    }
}

#[async_trait]
impl<E: Record> ReadRepository<E> for Store<'_, E> {
    fn conn(&self) -> &DatabaseTransaction {
        self.txn
    }
}

#[async_trait]
impl<E: Record> WriteRepository<E> for Store<'_, E> {
    fn conn(&self) -> &DatabaseTransaction {
        self.txn
    }
}

#[async_trait]
impl<E: Record> DeleteRepository<E> for Store<'_, E> {
    fn conn(&self) -> &DatabaseTransaction {
        self.txn
    }
}

/// Full CRUD repository - Combines all operations
pub trait CrudRepository<E: Record>:
    ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E> CrudRepository<E> for T
where
    T: ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>,
    E: Record,
{
}

/// Bucket `(key, value)` pairs by key, keeping arrival order inside each bucket.
pub(super) fn group_by<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash,
{
    let mut groups: HashMap<K, Vec<V>> = HashMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}

/// Remove and return the bucket for `key`, empty when nothing was loaded.
pub(super) fn take_group<K, V>(groups: &mut HashMap<K, Vec<V>>, key: K) -> Vec<V>
where
    K: Eq + Hash,
{
    groups.remove(&key).unwrap_or_default()
}
