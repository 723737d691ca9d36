//! Application route configuration.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{media_routes, tweet_routes, user_routes};
use super::middleware::timing_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(
            "/api",
            Router::new()
                .nest("/users", user_routes())
                .nest("/tweets", tweet_routes())
                .nest("/medias", media_routes()),
        )
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(timing_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Microblog API"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, healthy) = match state.database.ping().await {
        Ok(_) => (
            ServiceStatus {
                status: "healthy",
                error: None,
            },
            true,
        ),
        Err(e) => (
            ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
            false,
        ),
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use mockall::predicate::eq;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::{Config, API_KEY_HEADER, PROCESS_TIME_HEADER};
    use crate::domain::{CurrentUser, UserSummary, UserView};
    use crate::errors::AppError;
    use crate::infra::Database;
    use crate::services::{MockMediaService, MockTweetService, MockUserService};

    async fn app(users: MockUserService, tweets: MockTweetService, media: MockMediaService) -> Router {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        };
        let database = Arc::new(Database::connect_without_migrations(&config).await.unwrap());

        create_router(AppState::new(
            Arc::new(users),
            Arc::new(tweets),
            Arc::new(media),
            database,
        ))
    }

    fn authenticated_as(id: i32) -> MockUserService {
        let mut users = MockUserService::new();
        users.expect_authenticate().returning(move |_| {
            Ok(CurrentUser {
                id,
                name: "test".to_string(),
            })
        });
        users
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert!(response.headers().contains_key(PROCESS_TIME_HEADER));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn missing_api_key_is_rejected() {
        let app = app(
            MockUserService::new(),
            MockTweetService::new(),
            MockMediaService::new(),
        )
        .await;

        let request = Request::get("/api/users/me").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["result"], false);
        assert_eq!(body["error_message"], "Missing API Key");
    }

    #[tokio::test]
    async fn unknown_api_key_is_rejected() {
        let mut users = MockUserService::new();
        users
            .expect_authenticate()
            .returning(|_| Err(AppError::InvalidApiKey));
        let app = app(users, MockTweetService::new(), MockMediaService::new()).await;

        let request = Request::get("/api/users/me")
            .header(API_KEY_HEADER, "nobody")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_message"], "Invalid API Key");
    }

    #[tokio::test]
    async fn me_returns_the_callers_profile() {
        let mut users = authenticated_as(1);
        users.expect_profile().with(eq(1)).returning(|id| {
            Ok(UserView {
                id,
                name: "test".to_string(),
                followers: vec![UserSummary {
                    id: 2,
                    name: "David".to_string(),
                }],
                following: vec![],
            })
        });
        let app = app(users, MockTweetService::new(), MockMediaService::new()).await;

        let request = Request::get("/api/users/me")
            .header(API_KEY_HEADER, "test")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "result": true,
                "user": {"id": 1, "name": "test", "followers": [{"id": 2, "name": "David"}]}
            })
        );
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let mut users = MockUserService::new();
        users
            .expect_profile()
            .returning(|_| Err(AppError::not_found("User")));
        let app = app(users, MockTweetService::new(), MockMediaService::new()).await;

        let request = Request::get("/api/users/42").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_message"], "User not found");
    }

    #[tokio::test]
    async fn create_tweet_forwards_text_and_media() {
        let mut tweets = MockTweetService::new();
        tweets
            .expect_publish()
            .withf(|author, draft| {
                *author == 1 && draft.content == "hello" && draft.media_ids == vec![5, 6]
            })
            .returning(|_, _| Ok(9));
        let app = app(authenticated_as(1), tweets, MockMediaService::new()).await;

        let request = Request::post("/api/tweets")
            .header(API_KEY_HEADER, "test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"tweet_data": "hello", "tweet_media_ids": [5, 6]}"#,
            ))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, serde_json::json!({"result": true, "tweet_id": 9}));
    }

    #[tokio::test]
    async fn empty_tweet_text_is_a_validation_error() {
        let app = app(
            authenticated_as(1),
            MockTweetService::new(),
            MockMediaService::new(),
        )
        .await;

        let request = Request::post("/api/tweets")
            .header(API_KEY_HEADER, "test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"tweet_data": ""}"#))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn duplicate_like_is_a_conflict() {
        let mut tweets = MockTweetService::new();
        tweets
            .expect_like()
            .with(eq(1), eq(3))
            .returning(|_, _| Err(AppError::ConstraintViolation("uq_like".to_string())));
        let app = app(authenticated_as(1), tweets, MockMediaService::new()).await;

        let request = Request::post("/api/tweets/3/likes")
            .header(API_KEY_HEADER, "test")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn upload_reads_the_file_field() {
        let mut media = MockMediaService::new();
        media
            .expect_upload()
            .withf(|name, content| name == "cat.png" && content == b"meow")
            .returning(|_, _| Ok(7));
        let app = app(MockUserService::new(), MockTweetService::new(), media).await;

        let body = "--XBOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cat.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             meow\r\n\
             --XBOUNDARY--\r\n";
        let request = Request::post("/api/medias")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, serde_json::json!({"result": true, "media_id": 7}));
    }

    #[tokio::test]
    async fn health_pings_the_database() {
        let app = app(
            MockUserService::new(),
            MockTweetService::new(),
            MockMediaService::new(),
        )
        .await;

        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["services"]["database"]["status"], "healthy");
    }
}
