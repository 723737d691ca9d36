//! Response assembly: loaded entity graphs to API views.
//!
//! Pure functions; everything they read must already be loaded.

use crate::domain::{LikeSummary, TweetView, UserSummary, UserView};
use crate::infra::repositories::{TweetGraph, UserGraph};

/// Profile with follower and following lists.
pub fn user_view(graph: &UserGraph) -> UserView {
    let user = graph.user();
    UserView {
        id: user.id,
        name: user.name.clone(),
        followers: graph.followers().iter().map(UserSummary::from).collect(),
        following: graph.following().iter().map(UserSummary::from).collect(),
    }
}

/// Feed entry; `attachments` are the already resolved media paths.
///
/// Without a loaded author the author keeps its id and gets an empty name.
pub fn tweet_view(graph: &TweetGraph, attachments: Vec<String>) -> TweetView {
    let tweet = graph.tweet();
    let author = graph.author().map(UserSummary::from).unwrap_or(UserSummary {
        id: tweet.user_id,
        name: String::new(),
    });

    TweetView {
        id: tweet.id,
        content: tweet.content.clone(),
        author,
        likes: graph
            .liked_by()
            .iter()
            .map(|u| LikeSummary {
                user_id: u.id,
                name: u.name.clone(),
            })
            .collect(),
        attachments,
    }
}
