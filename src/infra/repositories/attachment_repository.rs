//! Attachment repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use std::collections::HashMap;

use super::base::{ReadRepository, Record, Store};
use super::entities::attachment;
use crate::errors::AppResult;

pub type AttachmentRepository<'a> = Store<'a, attachment::Entity>;

/// Attachments have no relationships to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentInclude {}

#[async_trait]
impl Record for attachment::Entity {
    type Include = AttachmentInclude;
    type Graph = attachment::Model;

    async fn hydrate(
        _txn: &DatabaseTransaction,
        rows: Vec<attachment::Model>,
        _include: &[AttachmentInclude],
    ) -> AppResult<Vec<attachment::Model>> {
        Ok(rows)
    }
}

impl Store<'_, attachment::Entity> {
    /// Stored paths for `ids`, in the order the ids were given.
    ///
    /// Unknown ids are skipped; a repeated id yields its path again.
    pub async fn find_paths_by_ids(&self, ids: &[i32]) -> AppResult<Vec<String>> {
        let paths = self.find_path_map(ids.iter().copied()).await?;
        Ok(ids.iter().filter_map(|id| paths.get(id).cloned()).collect())
    }

    /// Path of every known id among `ids`, in one query.
    pub async fn find_path_map(
        &self,
        ids: impl IntoIterator<Item = i32> + Send,
    ) -> AppResult<HashMap<i32, String>> {
        let mut ids: Vec<i32> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        ids.sort_unstable();
        ids.dedup();

        Ok(attachment::Entity::find()
            .filter(attachment::Column::Id.is_in(ids))
            .all(self.conn())
            .await?
            .into_iter()
            .map(|a| (a.id, a.path))
            .collect())
    }
}
