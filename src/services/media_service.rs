//! Media service - Stores uploads and records them as attachments.

use async_trait::async_trait;
use sea_orm::Set;
use std::sync::Arc;

use crate::errors::AppResult;
use crate::infra::repositories::entities::attachment;
use crate::infra::repositories::WriteRepository;
use crate::infra::{MediaStore, UnitOfWork};
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Media service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Store the file and return the new attachment id
    async fn upload(&self, file_name: String, content: Vec<u8>) -> AppResult<i32>;
}

/// Concrete implementation of MediaService.
pub struct MediaManager<U: UnitOfWork> {
    uow: Arc<U>,
    store: MediaStore,
}

impl<U: UnitOfWork> MediaManager<U> {
    pub fn new(uow: Arc<U>, store: MediaStore) -> Self {
        Self { uow, store }
    }
}

#[async_trait]
impl<U: UnitOfWork> MediaService for MediaManager<U> {
    async fn upload(&self, file_name: String, content: Vec<u8>) -> AppResult<i32> {
        let path = self.store.save(&file_name, &content).await?;
        let stored = path.to_string_lossy().into_owned();

        let result = with_transaction!(self.uow, |ctx| {
            ctx.attachments()
                .add(attachment::ActiveModel {
                    path: Set(stored),
                    ..Default::default()
                })
                .await
        });

        match result {
            Ok(created) => {
                tracing::info!(media_id = created.id, "Media stored at {}", path.display());
                Ok(created.id)
            }
            Err(e) => {
                // The row never landed, so the file would be unreachable
                if let Err(cleanup) = self.store.remove(&path).await {
                    tracing::warn!("Failed to remove orphaned upload {}: {}", path.display(), cleanup);
                } else {
                    tracing::debug!("Removed {} after failed insert", path.display());
                }
                Err(e)
            }
        }
    }
}
