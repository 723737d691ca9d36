//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{MediaService, TweetService, UserService};
use crate::config::Config;
use crate::infra::{MediaStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;

    fn tweets(&self) -> Arc<dyn TweetService>;

    fn media(&self) -> Arc<dyn MediaService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    tweet_service: Arc<dyn TweetService>,
    media_service: Arc<dyn MediaService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        user_service: Arc<dyn UserService>,
        tweet_service: Arc<dyn TweetService>,
        media_service: Arc<dyn MediaService>,
    ) -> Self {
        Self {
            user_service,
            tweet_service,
            media_service,
        }
    }

    /// Create service container from database connection and config.
    ///
    /// All services share one Unit of Work over the same connection pool.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{MediaManager, TweetManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let store = MediaStore::new(&config.media_dir);

        Self::new(
            Arc::new(UserManager::new(uow.clone())),
            Arc::new(TweetManager::new(uow.clone())),
            Arc::new(MediaManager::new(uow, store)),
        )
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn tweets(&self) -> Arc<dyn TweetService> {
        self.tweet_service.clone()
    }

    fn media(&self) -> Arc<dyn MediaService> {
        self.media_service.clone()
    }
}
