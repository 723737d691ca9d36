//! Like repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use std::collections::HashMap;

use super::base::{Record, Store};
use super::entities::{like, tweet, user};
use crate::errors::AppResult;

pub type LikeRepository<'a> = Store<'a, like::Entity>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeInclude {
    User,
    Tweet,
}

#[derive(Clone, Debug)]
pub struct LikeGraph {
    like: like::Model,
    user: Option<user::Model>,
    tweet: Option<tweet::Model>,
}

impl LikeGraph {
    pub fn like(&self) -> &like::Model {
        &self.like
    }

    pub fn user(&self) -> Option<&user::Model> {
        self.user.as_ref()
    }

    pub fn tweet(&self) -> Option<&tweet::Model> {
        self.tweet.as_ref()
    }
}

#[async_trait]
impl Record for like::Entity {
    type Include = LikeInclude;
    type Graph = LikeGraph;

    async fn hydrate(
        txn: &DatabaseTransaction,
        rows: Vec<like::Model>,
        include: &[LikeInclude],
    ) -> AppResult<Vec<LikeGraph>> {
        let mut users: HashMap<i32, user::Model> = HashMap::new();
        let mut tweets: HashMap<i32, tweet::Model> = HashMap::new();

        for option in include {
            match option {
                LikeInclude::User => {
                    users = user::Entity::find()
                        .filter(user::Column::Id.is_in(rows.iter().map(|l| l.user_id)))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|u| (u.id, u))
                        .collect();
                }
                LikeInclude::Tweet => {
                    tweets = tweet::Entity::find()
                        .filter(tweet::Column::Id.is_in(rows.iter().map(|l| l.tweet_id)))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|t| (t.id, t))
                        .collect();
                }
            }
        }

        Ok(rows
            .into_iter()
            .map(|like| LikeGraph {
                user: users.get(&like.user_id).cloned(),
                tweet: tweets.get(&like.tweet_id).cloned(),
                like,
            })
            .collect())
    }
}
