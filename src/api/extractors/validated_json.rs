//! JSON body extractor that runs `validator` rules before the handler.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// `Json<T>` whose payload has passed `T::validate`.
///
/// A body that is not JSON or does not match `T` becomes `BadRequest`;
/// a well-formed body breaking a rule becomes `Validation`. Both answer 400.
///
/// ```rust,ignore
/// async fn create_tweet(
///     user: CurrentUser,
///     ValidatedJson(request): ValidatedJson<CreateTweetRequest>,
/// ) -> AppResult<Created<TweetCreatedResponse>> { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            AppError::bad_request(rejection.body_text())
        })?;

        payload
            .validate()
            .map_err(|errors| AppError::validation(describe(&errors)))?;

        Ok(ValidatedJson(payload))
    }
}

/// One message per failed rule, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, failure.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Draft {
        #[validate(length(min = 1, message = "Tweet text is required"))]
        text: String,
        #[validate(range(min = 1))]
        media_id: i32,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_payload_passes_through() {
        let ValidatedJson(draft) =
            ValidatedJson::<Draft>::from_request(json_request(r#"{"text":"hi","media_id":3}"#), &())
                .await
                .unwrap();

        assert_eq!(draft.text, "hi");
        assert_eq!(draft.media_id, 3);
    }

    #[tokio::test]
    async fn broken_rules_are_listed_by_field() {
        let result =
            ValidatedJson::<Draft>::from_request(json_request(r#"{"text":"","media_id":0}"#), &())
                .await;

        match result {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, "media_id is invalid (range), Tweet text is required")
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let result = ValidatedJson::<Draft>::from_request(json_request("{not json"), &()).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
