//! Tweet repository: tweets with their author and likers.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

use super::base::{group_by, take_group, Record, Store};
use super::entities::{like, tweet, user};
use crate::errors::AppResult;

pub type TweetRepository<'a> = Store<'a, tweet::Entity>;

/// Relationships a tweet query may load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweetInclude {
    Author,
    /// Users who liked the tweet, in like order
    LikedBy,
}

#[derive(Clone, Debug)]
pub struct TweetGraph {
    tweet: tweet::Model,
    author: Option<user::Model>,
    liked_by: Vec<user::Model>,
}

impl TweetGraph {
    pub(crate) fn new(
        tweet: tweet::Model,
        author: Option<user::Model>,
        liked_by: Vec<user::Model>,
    ) -> Self {
        Self {
            tweet,
            author,
            liked_by,
        }
    }

    pub fn tweet(&self) -> &tweet::Model {
        &self.tweet
    }

    /// `None` unless [`TweetInclude::Author`] was requested
    pub fn author(&self) -> Option<&user::Model> {
        self.author.as_ref()
    }

    pub fn liked_by(&self) -> &[user::Model] {
        &self.liked_by
    }
}

#[async_trait]
impl Record for tweet::Entity {
    type Include = TweetInclude;
    type Graph = TweetGraph;

    async fn hydrate(
        txn: &DatabaseTransaction,
        rows: Vec<tweet::Model>,
        include: &[TweetInclude],
    ) -> AppResult<Vec<TweetGraph>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut authors: HashMap<i32, user::Model> = HashMap::new();
        let mut liked_by: HashMap<i32, Vec<user::Model>> = HashMap::new();

        for option in include {
            match option {
                TweetInclude::Author => {
                    let mut author_ids: Vec<i32> = rows.iter().map(|t| t.user_id).collect();
                    author_ids.sort_unstable();
                    author_ids.dedup();

                    authors = user::Entity::find()
                        .filter(user::Column::Id.is_in(author_ids))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|u| (u.id, u))
                        .collect();
                }
                TweetInclude::LikedBy => {
                    // Likers come back joined to their user row: one query for the whole batch
                    let found = like::Entity::find()
                        .filter(like::Column::TweetId.is_in(rows.iter().map(|t| t.id)))
                        .find_also_related(user::Entity)
                        .order_by_asc(like::Column::Id)
                        .all(txn)
                        .await?;
                    liked_by = group_by(
                        found
                            .into_iter()
                            .filter_map(|(l, u)| u.map(|u| (l.tweet_id, u))),
                    );
                }
            }
        }

        Ok(rows
            .into_iter()
            .map(|tweet| {
                let author = authors.get(&tweet.user_id).cloned();
                let likers = take_group(&mut liked_by, tweet.id);
                TweetGraph::new(tweet, author, likers)
            })
            .collect())
    }
}
