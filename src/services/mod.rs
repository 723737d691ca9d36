//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod assembly;
pub mod container;
mod media_service;
mod tweet_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use media_service::{MediaManager, MediaService};
pub use tweet_service::{TweetManager, TweetService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use media_service::MockMediaService;
#[cfg(any(test, feature = "test-utils"))]
pub use tweet_service::MockTweetService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
