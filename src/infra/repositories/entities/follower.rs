//! Follower database entity for SeaORM.
//!
//! Each row is a directed edge of the follow graph: `user_id` follows
//! `followed_user_id`. Both ends reference `user`, so the user side is
//! reached through [`Linked`] paths instead of a single `Related` impl.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follower")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub followed_user_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowedUserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    FollowedUser,
}

/// Edge → the user doing the following.
#[derive(Debug)]
pub struct ToFollowingUser;

impl Linked for ToFollowingUser {
    type FromEntity = Entity;
    type ToEntity = super::user::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::User.def()]
    }
}

/// Edge → the user being followed.
#[derive(Debug)]
pub struct ToFollowedUser;

impl Linked for ToFollowedUser {
    type FromEntity = Entity;
    type ToEntity = super::user::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::FollowedUser.def()]
    }
}

timestamped!();
