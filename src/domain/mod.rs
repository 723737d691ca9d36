//! Domain layer - Core business types
//!
//! The payloads the API speaks in, independent of how rows are stored.

pub mod tweet;
pub mod user;

pub use tweet::{LikeSummary, NewTweet, TweetView};
pub use user::{CurrentUser, UserSummary, UserView};
