//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.

use async_trait::async_trait;
use sea_orm::Set;
use std::sync::Arc;

use super::assembly::user_view;
use crate::domain::{CurrentUser, UserView};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::entities::{follower, user};
use crate::infra::repositories::{
    DeleteRepository, Filters, ReadRepository, UserInclude, WriteRepository,
};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Resolve an API key to the user owning it
    async fn authenticate(&self, api_key: &str) -> AppResult<CurrentUser>;

    /// Profile with followers and following
    async fn profile(&self, user_id: i32) -> AppResult<UserView>;

    /// Make `follower_id` follow `followed_id`
    async fn follow(&self, follower_id: i32, followed_id: i32) -> AppResult<()>;

    /// Remove the follow edge `follower_id` → `followed_id`
    async fn unfollow(&self, follower_id: i32, followed_id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn authenticate(&self, api_key: &str) -> AppResult<CurrentUser> {
        let api_key = api_key.to_owned();
        let found = with_transaction!(self.uow, |ctx| {
            ctx.users()
                .find_one_or_none(Filters::by(user::Column::ApiKey, api_key), &[])
                .await
        })?;

        match found {
            Some(graph) => Ok(CurrentUser::from(graph.into_user())),
            None => {
                tracing::warn!("Unauthorized access attempt with invalid Api-Key");
                Err(AppError::InvalidApiKey)
            }
        }
    }

    async fn profile(&self, user_id: i32) -> AppResult<UserView> {
        let graph = with_transaction!(self.uow, |ctx| {
            ctx.users()
                .find_one_or_none(
                    Filters::by(user::Column::Id, user_id),
                    &UserInclude::PROFILE,
                )
                .await
        })?
        .ok_or_not_found("User")?;

        Ok(user_view(&graph))
    }

    async fn follow(&self, follower_id: i32, followed_id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            ctx.followers()
                .add(follower::ActiveModel {
                    user_id: Set(follower_id),
                    followed_user_id: Set(followed_id),
                    ..Default::default()
                })
                .await
        })?;

        tracing::info!(follower_id, followed_id, "User followed");
        Ok(())
    }

    async fn unfollow(&self, follower_id: i32, followed_id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| {
            ctx.followers()
                .delete(
                    Filters::by(follower::Column::UserId, follower_id)
                        .and(follower::Column::FollowedUserId, followed_id),
                )
                .await
        })?;

        tracing::info!(follower_id, followed_id, "User unfollowed");
        Ok(())
    }
}
