//! Request timing middleware.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

use crate::config::PROCESS_TIME_HEADER;

/// Stamps every response with `X-Process-Time` (seconds) and logs the request.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{:.4}", elapsed)) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    tracing::info!(
        "{} {} completed in {:.4}s with status {}",
        method,
        path,
        elapsed,
        response.status().as_u16()
    );

    response
}
