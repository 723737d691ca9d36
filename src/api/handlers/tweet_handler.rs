//! Feed, tweet and like handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CurrentUser, NewTweet};
use crate::errors::AppResult;
use crate::types::{Ack, Created, FeedResponse, TweetCreatedResponse};

/// Tweet publication request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTweetRequest {
    /// Tweet text
    #[validate(length(min = 1, message = "Tweet text is required"))]
    #[schema(example = "Hello, world!")]
    pub tweet_data: String,
    /// Ids returned by `POST /api/medias`, in display order
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub tweet_media_ids: Option<Vec<i32>>,
}

impl From<CreateTweetRequest> for NewTweet {
    fn from(request: CreateTweetRequest) -> Self {
        Self {
            content: request.tweet_data,
            media_ids: request.tweet_media_ids.unwrap_or_default(),
        }
    }
}

/// Create tweet routes
pub fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tweets).post(create_tweet))
        .route("/:tweet_id", delete(delete_tweet))
        .route("/:tweet_id/likes", post(like_tweet).delete(unlike_tweet))
}

/// List every tweet
#[utoipa::path(
    get,
    path = "/api/tweets",
    tag = "Tweets",
    responses(
        (status = 200, description = "All tweets with author, likes and attachments", body = FeedResponse)
    )
)]
pub async fn list_tweets(State(state): State<AppState>) -> AppResult<Json<FeedResponse>> {
    let tweets = state.tweet_service.feed().await?;
    Ok(Json(FeedResponse::new(tweets)))
}

/// Publish a tweet
#[utoipa::path(
    post,
    path = "/api/tweets",
    tag = "Tweets",
    security(("api_key" = [])),
    request_body = CreateTweetRequest,
    responses(
        (status = 201, description = "Tweet published", body = TweetCreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn create_tweet(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateTweetRequest>,
) -> AppResult<Created<TweetCreatedResponse>> {
    let tweet_id = state.tweet_service.publish(user.id, payload.into()).await?;
    Ok(Created(TweetCreatedResponse::new(tweet_id)))
}

/// Delete one of the caller's tweets
#[utoipa::path(
    delete,
    path = "/api/tweets/{tweet_id}",
    tag = "Tweets",
    security(("api_key" = [])),
    params(("tweet_id" = i32, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Tweet deleted", body = Ack),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "No such tweet owned by the caller")
    )
)]
pub async fn delete_tweet(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tweet_id): Path<i32>,
) -> AppResult<Json<Ack>> {
    state.tweet_service.remove(user.id, tweet_id).await?;
    Ok(Ack::ok())
}

/// Like a tweet
#[utoipa::path(
    post,
    path = "/api/tweets/{tweet_id}/likes",
    tag = "Tweets",
    security(("api_key" = [])),
    params(("tweet_id" = i32, Path, description = "Tweet ID")),
    responses(
        (status = 201, description = "Tweet liked", body = Ack),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Tweet not found"),
        (status = 409, description = "Already liked")
    )
)]
pub async fn like_tweet(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tweet_id): Path<i32>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    state.tweet_service.like(user.id, tweet_id).await?;
    Ok(Ack::created())
}

/// Remove a like
#[utoipa::path(
    delete,
    path = "/api/tweets/{tweet_id}/likes",
    tag = "Tweets",
    security(("api_key" = [])),
    params(("tweet_id" = i32, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Like removed", body = Ack),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Tweet was not liked")
    )
)]
pub async fn unlike_tweet(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(tweet_id): Path<i32>,
) -> AppResult<Json<Ack>> {
    state.tweet_service.unlike(user.id, tweet_id).await?;
    Ok(Ack::ok())
}
