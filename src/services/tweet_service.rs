//! Tweet service - Feed, publishing and likes.

use async_trait::async_trait;
use sea_orm::Set;
use std::sync::Arc;

use super::assembly::tweet_view;
use crate::domain::{NewTweet, TweetView};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::{like, tweet, MediaIds};
use crate::infra::repositories::{
    DeleteRepository, Filters, ReadRepository, TweetInclude, WriteRepository,
};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Tweet service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TweetService: Send + Sync {
    /// Every tweet with author, likes and attachment paths
    async fn feed(&self) -> AppResult<Vec<TweetView>>;

    /// Publish a tweet and return its id
    async fn publish(&self, author_id: i32, draft: NewTweet) -> AppResult<i32>;

    /// Delete one of the author's own tweets
    async fn remove(&self, author_id: i32, tweet_id: i32) -> AppResult<()>;

    async fn like(&self, user_id: i32, tweet_id: i32) -> AppResult<()>;

    async fn unlike(&self, user_id: i32, tweet_id: i32) -> AppResult<()>;
}

/// Concrete implementation of TweetService using Unit of Work.
pub struct TweetManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TweetManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TweetService for TweetManager<U> {
    async fn feed(&self) -> AppResult<Vec<TweetView>> {
        with_transaction!(self.uow, |ctx| {
            let graphs = ctx
                .tweets()
                .find_all(Filters::none(), &[TweetInclude::Author, TweetInclude::LikedBy])
                .await?;

            // One lookup for the whole feed, then split back per tweet
            let paths = ctx
                .attachments()
                .find_path_map(
                    graphs
                        .iter()
                        .flat_map(|g| g.tweet().attachment_ids().iter().copied())
                        .collect::<Vec<_>>(),
                )
                .await?;

            let views = graphs
                .iter()
                .map(|graph| {
                    let attachments = graph
                        .tweet()
                        .attachment_ids()
                        .iter()
                        .filter_map(|id| paths.get(id).cloned())
                        .collect();
                    tweet_view(graph, attachments)
                })
                .collect::<Vec<_>>();
            Ok::<_, AppError>(views)
        })
    }

    async fn publish(&self, author_id: i32, draft: NewTweet) -> AppResult<i32> {
        let NewTweet { content, media_ids } = draft;
        // No media is stored as NULL rather than an empty list
        let attachments = (!media_ids.is_empty()).then_some(MediaIds(media_ids));

        let created = with_transaction!(self.uow, |ctx| {
            ctx.tweets()
                .add(tweet::ActiveModel {
                    content: Set(content),
                    user_id: Set(author_id),
                    attachments: Set(attachments),
                    ..Default::default()
                })
                .await
        })?;

        tracing::info!(tweet_id = created.id, author_id, "Tweet published");
        Ok(created.id)
    }

    async fn remove(&self, author_id: i32, tweet_id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            ctx.tweets()
                .delete(
                    Filters::by(tweet::Column::Id, tweet_id).and(tweet::Column::UserId, author_id),
                )
                .await
        })?;

        tracing::info!(tweet_id, author_id, "Tweet deleted");
        Ok(())
    }

    async fn like(&self, user_id: i32, tweet_id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            ctx.likes()
                .add(like::ActiveModel {
                    user_id: Set(user_id),
                    tweet_id: Set(tweet_id),
                    ..Default::default()
                })
                .await
        })?;
        Ok(())
    }

    async fn unlike(&self, user_id: i32, tweet_id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            ctx.likes()
                .delete(
                    Filters::by(like::Column::UserId, user_id).and(like::Column::TweetId, tweet_id),
                )
                .await
        })?;
        Ok(())
    }
}
