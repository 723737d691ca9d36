//! User repository: users with their tweets, likes and follow graph.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

use super::base::{group_by, take_group, Record, Store};
use super::entities::{follower, like, tweet, user};
use crate::errors::AppResult;

pub type UserRepository<'a> = Store<'a, user::Entity>;

/// Relationships a user query may load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserInclude {
    Tweets,
    LikedTweets,
    /// Users this user follows
    Following,
    /// Users following this user
    Followers,
}

impl UserInclude {
    pub const ALL: [UserInclude; 4] = [
        UserInclude::Following,
        UserInclude::Followers,
        UserInclude::LikedTweets,
        UserInclude::Tweets,
    ];

    /// What a profile shows: both sides of the follow graph.
    pub const PROFILE: [UserInclude; 2] = [UserInclude::Followers, UserInclude::Following];
}

/// A user row plus whatever relationships were requested.
///
/// Relationship lists are derived from `like`/`follower` rows and are only
/// readable here; they change by adding or deleting those rows.
#[derive(Clone, Debug)]
pub struct UserGraph {
    user: user::Model,
    tweets: Vec<tweet::Model>,
    liked_tweets: Vec<tweet::Model>,
    following: Vec<user::Model>,
    followers: Vec<user::Model>,
}

impl UserGraph {
    pub(crate) fn new(
        user: user::Model,
        tweets: Vec<tweet::Model>,
        liked_tweets: Vec<tweet::Model>,
        following: Vec<user::Model>,
        followers: Vec<user::Model>,
    ) -> Self {
        Self {
            user,
            tweets,
            liked_tweets,
            following,
            followers,
        }
    }

    pub fn user(&self) -> &user::Model {
        &self.user
    }

    pub fn tweets(&self) -> &[tweet::Model] {
        &self.tweets
    }

    pub fn liked_tweets(&self) -> &[tweet::Model] {
        &self.liked_tweets
    }

    pub fn following(&self) -> &[user::Model] {
        &self.following
    }

    pub fn followers(&self) -> &[user::Model] {
        &self.followers
    }

    pub fn into_user(self) -> user::Model {
        self.user
    }
}

#[async_trait]
impl Record for user::Entity {
    type Include = UserInclude;
    type Graph = UserGraph;

    async fn hydrate(
        txn: &DatabaseTransaction,
        rows: Vec<user::Model>,
        include: &[UserInclude],
    ) -> AppResult<Vec<UserGraph>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|u| u.id).collect();
        let mut tweets: HashMap<i32, Vec<tweet::Model>> = HashMap::new();
        let mut liked_tweets: HashMap<i32, Vec<tweet::Model>> = HashMap::new();
        let mut following: HashMap<i32, Vec<user::Model>> = HashMap::new();
        let mut followers: HashMap<i32, Vec<user::Model>> = HashMap::new();

        for option in include {
            match option {
                UserInclude::Tweets => {
                    let found = tweet::Entity::find()
                        .filter(tweet::Column::UserId.is_in(ids.clone()))
                        .order_by_asc(tweet::Column::Id)
                        .all(txn)
                        .await?;
                    tweets = group_by(found.into_iter().map(|t| (t.user_id, t)));
                }
                UserInclude::LikedTweets => {
                    let found = like::Entity::find()
                        .filter(like::Column::UserId.is_in(ids.clone()))
                        .find_also_related(tweet::Entity)
                        .order_by_asc(like::Column::Id)
                        .all(txn)
                        .await?;
                    liked_tweets = group_by(
                        found
                            .into_iter()
                            .filter_map(|(l, t)| t.map(|t| (l.user_id, t))),
                    );
                }
                UserInclude::Following => {
                    let found = follower::Entity::find()
                        .filter(follower::Column::UserId.is_in(ids.clone()))
                        .find_also_linked(follower::ToFollowedUser)
                        .order_by_asc(follower::Column::Id)
                        .all(txn)
                        .await?;
                    following = group_by(
                        found
                            .into_iter()
                            .filter_map(|(edge, u)| u.map(|u| (edge.user_id, u))),
                    );
                }
                UserInclude::Followers => {
                    let found = follower::Entity::find()
                        .filter(follower::Column::FollowedUserId.is_in(ids.clone()))
                        .find_also_linked(follower::ToFollowingUser)
                        .order_by_asc(follower::Column::Id)
                        .all(txn)
                        .await?;
                    followers = group_by(
                        found
                            .into_iter()
                            .filter_map(|(edge, u)| u.map(|u| (edge.followed_user_id, u))),
                    );
                }
            }
        }

        Ok(rows
            .into_iter()
            .map(|user| {
                let id = user.id;
                UserGraph::new(
                    user,
                    take_group(&mut tweets, id),
                    take_group(&mut liked_tweets, id),
                    take_group(&mut following, id),
                    take_group(&mut followers, id),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_loads_only_the_follow_graph() {
        assert!(UserInclude::PROFILE.contains(&UserInclude::Followers));
        assert!(UserInclude::PROFILE.contains(&UserInclude::Following));
        assert!(!UserInclude::PROFILE.contains(&UserInclude::Tweets));
        assert!(!UserInclude::PROFILE.contains(&UserInclude::LikedTweets));
    }
}
