//! Seed command - Creates the demo users.

use sea_orm::Set;

use crate::config::{Config, DEMO_USERS};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::user;
use crate::infra::repositories::{Filters, ReadRepository, WriteRepository};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::with_transaction;

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Persistence::new(db.get_connection());

    let created = seed_demo_users(&uow).await?;
    tracing::info!("Seeded {} demo users", created);

    Ok(())
}

/// Insert every demo user whose api key is not taken yet; returns how many were added.
pub async fn seed_demo_users<U: UnitOfWork>(uow: &U) -> AppResult<usize> {
    with_transaction!(uow, |ctx| {
        let users = ctx.users();
        let mut created = 0;

        for (name, api_key) in DEMO_USERS {
            let existing = users
                .find_one_or_none(Filters::by(user::Column::ApiKey, *api_key), &[])
                .await?;
            if existing.is_some() {
                tracing::debug!("Demo user {} already exists", name);
                continue;
            }

            users
                .add(user::ActiveModel {
                    name: Set(name.to_string()),
                    api_key: Set(api_key.to_string()),
                    ..Default::default()
                })
                .await?;
            created += 1;
        }

        Ok::<_, AppError>(created)
    })
}
