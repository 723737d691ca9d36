//! Migration: Create user, tweet, like, follower and attachment tables.

use sea_orm::{ConnectionTrait, DatabaseBackend};
use sea_orm_migration::prelude::*;

use crate::config::{MAX_API_KEY_LENGTH, MAX_NAME_LENGTH};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(user_table()).await?;

        manager
            .create_table(
                Table::create()
                    .table(Tweet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tweet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tweet::Content).text().not_null())
                    .col(ColumnDef::new(Tweet::UserId).integer().not_null())
                    .col(ColumnDef::new(Tweet::Attachments).json().null())
                    .col(&mut timestamp(Tweet::CreatedAt))
                    .col(&mut timestamp(Tweet::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tweet_user_id_user")
                            .from(Tweet::Table, Tweet::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Like::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Like::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Like::UserId).integer().not_null())
                    .col(ColumnDef::new(Like::TweetId).integer().not_null())
                    .col(&mut timestamp(Like::CreatedAt))
                    .col(&mut timestamp(Like::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_user_id_user")
                            .from(Like::Table, Like::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_like_tweet_id_tweet")
                            .from(Like::Table, Like::TweetId)
                            .to(Tweet::Table, Tweet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("uq_like_user_id_tweet_id")
                            .col(Like::UserId)
                            .col(Like::TweetId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Follower::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Follower::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Follower::UserId).integer().not_null())
                    .col(ColumnDef::new(Follower::FollowedUserId).integer().not_null())
                    .col(&mut timestamp(Follower::CreatedAt))
                    .col(&mut timestamp(Follower::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follower_user_id_user")
                            .from(Follower::Table, Follower::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_follower_followed_user_id_user")
                            .from(Follower::Table, Follower::FollowedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("uq_follower_user_id_followed_user_id")
                            .col(Follower::UserId)
                            .col(Follower::FollowedUserId)
                            .unique(),
                    )
                    // No self-follow
                    .check(Expr::col(Follower::UserId).ne(Expr::col(Follower::FollowedUserId)))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attachment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attachment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attachment::Path).string().not_null())
                    .col(&mut timestamp(Attachment::CreatedAt))
                    .col(&mut timestamp(Attachment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Full-text search over tweet content is PostgreSQL-only
        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE INDEX IF NOT EXISTS gix_tweet_content_ru \
                     ON tweet USING gin (to_tsvector('russian', content))",
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dependents first
        manager
            .drop_table(Table::drop().table(Attachment::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Follower::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Like::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tweet::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

fn user_table() -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(User::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(User::Name)
                .string_len(MAX_NAME_LENGTH as u32)
                .not_null(),
        )
        .col(
            ColumnDef::new(User::ApiKey)
                .string_len(MAX_API_KEY_LENGTH as u32)
                .not_null()
                .unique_key(),
        )
        .col(&mut timestamp(User::CreatedAt))
        .col(&mut timestamp(User::UpdatedAt))
        .to_owned()
}

fn timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    Name,
    ApiKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Tweet {
    Table,
    Id,
    Content,
    UserId,
    Attachments,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Like {
    Table,
    Id,
    UserId,
    TweetId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Follower {
    Table,
    Id,
    UserId,
    FollowedUserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Attachment {
    Table,
    Id,
    Path,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_columns_are_bounded_by_the_configured_lengths() {
        let sql = user_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(&format!(r#""name" varchar({})"#, MAX_NAME_LENGTH)));
        assert!(sql.contains(&format!(r#""api_key" varchar({})"#, MAX_API_KEY_LENGTH)));
    }
}
