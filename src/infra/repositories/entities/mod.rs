//! SeaORM entity definitions
//!
//! These are database-specific entities. Relationship accessors between them
//! are declared here and resolved by the repositories' eager loading.

/// Stamps `created_at`/`updated_at` on insert and `updated_at` on update.
macro_rules! timestamped {
    () => {
        #[async_trait::async_trait]
        impl sea_orm::ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, sea_orm::DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                let now = chrono::Utc::now();
                if insert {
                    self.created_at = sea_orm::ActiveValue::Set(now);
                }
                self.updated_at = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}

pub mod attachment;
pub mod follower;
pub mod like;
pub mod tweet;
pub mod user;

// Re-exports for public API convenience
pub use attachment::{
    ActiveModel as AttachmentActiveModel, Entity as AttachmentEntity, Model as AttachmentModel,
};
pub use follower::{
    ActiveModel as FollowerActiveModel, Entity as FollowerEntity, Model as FollowerModel,
};
pub use like::{ActiveModel as LikeActiveModel, Entity as LikeEntity, Model as LikeModel};
pub use tweet::{
    ActiveModel as TweetActiveModel, Entity as TweetEntity, MediaIds, Model as TweetModel,
};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
