//! HTTP request handlers.

pub mod media_handler;
pub mod tweet_handler;
pub mod user_handler;

pub use media_handler::media_routes;
pub use tweet_handler::tweet_routes;
pub use user_handler::user_routes;
