//! Repository layer - Data access abstraction
//!
//! One generic [`Store`] serves every entity; the per-entity modules declare
//! which relationships can be eagerly loaded and add bespoke queries.

mod attachment_repository;
mod base;
pub mod entities;
mod follower_repository;
mod like_repository;
mod tweet_repository;
mod user_repository;

pub use attachment_repository::{AttachmentInclude, AttachmentRepository};
pub use base::{
    CrudRepository, DeleteRepository, Filters, ReadRepository, Record, Store, WriteRepository,
};
pub use follower_repository::{FollowerGraph, FollowerInclude, FollowerRepository};
pub use like_repository::{LikeGraph, LikeInclude, LikeRepository};
pub use tweet_repository::{TweetGraph, TweetInclude, TweetRepository};
pub use user_repository::{UserGraph, UserInclude, UserRepository};
