//! Follower repository: directed edges of the follow graph.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use std::collections::HashMap;

use super::base::{Record, Store};
use super::entities::{follower, user};
use crate::errors::AppResult;

pub type FollowerRepository<'a> = Store<'a, follower::Entity>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowerInclude {
    /// The user doing the following
    User,
    FollowedUser,
}

#[derive(Clone, Debug)]
pub struct FollowerGraph {
    edge: follower::Model,
    user: Option<user::Model>,
    followed_user: Option<user::Model>,
}

impl FollowerGraph {
    pub fn edge(&self) -> &follower::Model {
        &self.edge
    }

    pub fn user(&self) -> Option<&user::Model> {
        self.user.as_ref()
    }

    pub fn followed_user(&self) -> Option<&user::Model> {
        self.followed_user.as_ref()
    }
}

#[async_trait]
impl Record for follower::Entity {
    type Include = FollowerInclude;
    type Graph = FollowerGraph;

    async fn hydrate(
        txn: &DatabaseTransaction,
        rows: Vec<follower::Model>,
        include: &[FollowerInclude],
    ) -> AppResult<Vec<FollowerGraph>> {
        if rows.is_empty() || include.is_empty() {
            return Ok(rows
                .into_iter()
                .map(|edge| FollowerGraph {
                    edge,
                    user: None,
                    followed_user: None,
                })
                .collect());
        }

        // Both ends live in the same table, so one lookup serves every option
        let mut ids: Vec<i32> = Vec::with_capacity(rows.len() * 2);
        for option in include {
            match option {
                FollowerInclude::User => ids.extend(rows.iter().map(|e| e.user_id)),
                FollowerInclude::FollowedUser => {
                    ids.extend(rows.iter().map(|e| e.followed_user_id))
                }
            }
        }
        ids.sort_unstable();
        ids.dedup();

        let users: HashMap<i32, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(txn)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let with_user = include.contains(&FollowerInclude::User);
        let with_followed = include.contains(&FollowerInclude::FollowedUser);

        Ok(rows
            .into_iter()
            .map(|edge| FollowerGraph {
                user: with_user.then(|| users.get(&edge.user_id).cloned()).flatten(),
                followed_user: with_followed
                    .then(|| users.get(&edge.followed_user_id).cloned())
                    .flatten(),
                edge,
            })
            .collect())
    }
}
