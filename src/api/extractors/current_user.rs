//! Authenticated caller extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::AppState;
use crate::config::API_KEY_HEADER;
use crate::domain::CurrentUser;
use crate::errors::AppError;

/// Resolves the `Api-Key` header to the user owning it.
///
/// Rejects with `Missing API Key` when the header is absent or empty and
/// `Invalid API Key` when no user holds the key.
#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|key| !key.is_empty());

        let Some(api_key) = api_key else {
            tracing::warn!("Missing Api-Key in request headers");
            return Err(AppError::MissingApiKey);
        };

        state.user_service.authenticate(api_key).await
    }
}
