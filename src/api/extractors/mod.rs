//! Custom request extractors.

mod current_user;
mod validated_json;

pub use validated_json::ValidatedJson;
