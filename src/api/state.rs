//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::infra::Database;
use crate::services::{MediaService, ServiceContainer, Services, TweetService, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub tweet_service: Arc<dyn TweetService>,
    pub media_service: Arc<dyn MediaService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
    /// Largest accepted request body in bytes
    pub body_limit: usize,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            user_service: container.users(),
            tweet_service: container.tweets(),
            media_service: container.media(),
            database,
            body_limit: config.max_upload_bytes,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        tweet_service: Arc<dyn TweetService>,
        media_service: Arc<dyn MediaService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            tweet_service,
            media_service,
            database,
            body_limit: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
