//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use sea_orm::Set;

use microblog_api::config::Config;
use microblog_api::infra::repositories::entities::{attachment, tweet, user, MediaIds};
use microblog_api::infra::{Database, Persistence};

/// In-memory SQLite with media stored under `media_dir`.
pub fn sqlite_config(media_dir: &Path) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        media_dir: media_dir.to_path_buf(),
        ..Config::default()
    }
}

/// A migrated database and a unit of work over it.
pub async fn persistence() -> (Arc<Database>, Persistence) {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        ..Config::default()
    };
    let database = Database::connect(&config)
        .await
        .expect("in-memory database should migrate");
    let uow = Persistence::new(database.get_connection());
    (Arc::new(database), uow)
}

pub fn new_user(name: &str) -> user::ActiveModel {
    user::ActiveModel {
        name: Set(name.to_string()),
        api_key: Set(name.to_lowercase()),
        ..Default::default()
    }
}

pub fn new_tweet(user_id: i32, content: &str, media_ids: &[i32]) -> tweet::ActiveModel {
    tweet::ActiveModel {
        content: Set(content.to_string()),
        user_id: Set(user_id),
        attachments: Set((!media_ids.is_empty()).then(|| MediaIds(media_ids.to_vec()))),
        ..Default::default()
    }
}

pub fn new_attachment(path: &str) -> attachment::ActiveModel {
    attachment::ActiveModel {
        path: Set(path.to_string()),
        ..Default::default()
    }
}
