//! Shared types for DRY compliance.

mod response;

pub use response::{
    Ack, Created, FeedResponse, MediaCreatedResponse, TweetCreatedResponse, UserResponse,
};
