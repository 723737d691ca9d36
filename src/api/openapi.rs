//! OpenAPI documentation configuration.
//!
//! The document is served as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{media_handler, tweet_handler, user_handler};
use crate::config::API_KEY_HEADER;
use crate::domain::{LikeSummary, TweetView, UserSummary, UserView};
use crate::types::{Ack, FeedResponse, MediaCreatedResponse, TweetCreatedResponse, UserResponse};

/// OpenAPI documentation for the microblog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microblog API",
        version = "0.1.0",
        description = "Users, tweets, likes, follows and media attachments"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::get_current_user,
        user_handler::get_user,
        user_handler::follow_user,
        user_handler::unfollow_user,
        // Tweet endpoints
        tweet_handler::list_tweets,
        tweet_handler::create_tweet,
        tweet_handler::delete_tweet,
        tweet_handler::like_tweet,
        tweet_handler::unlike_tweet,
        // Media endpoints
        media_handler::upload_media,
    ),
    components(
        schemas(
            // Domain types
            UserSummary,
            UserView,
            LikeSummary,
            TweetView,
            // Responses
            Ack,
            UserResponse,
            FeedResponse,
            TweetCreatedResponse,
            MediaCreatedResponse,
            // Requests
            tweet_handler::CreateTweetRequest,
            media_handler::MediaUpload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Profiles and the follow graph"),
        (name = "Tweets", description = "Feed, publishing and likes"),
        (name = "Media", description = "Uploads referenced by tweets")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the `Api-Key` header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}
