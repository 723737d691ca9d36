//! Unit of Work pattern implementation.
//!
//! Every request's database work runs inside one transaction handed out
//! here. The transaction commits when the closure returns `Ok`, rolls back
//! on `Err`, and the connection goes back to the pool either way.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};

use super::repositories::{
    entities::{attachment, follower, like, tweet, user},
    AttachmentRepository, FollowerRepository, LikeRepository, Store, TweetRepository,
    UserRepository,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the service level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> UserRepository<'a> {
        Store::<user::Entity>::new(self.txn)
    }

    pub fn tweets(&self) -> TweetRepository<'a> {
        Store::<tweet::Entity>::new(self.txn)
    }

    pub fn likes(&self) -> LikeRepository<'a> {
        Store::<like::Entity>::new(self.txn)
    }

    pub fn followers(&self) -> FollowerRepository<'a> {
        Store::<follower::Entity>::new(self.txn)
    }

    pub fn attachments(&self) -> AttachmentRepository<'a> {
        Store::<attachment::Entity>::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
    isolation: Option<IsolationLevel>,
    access: Option<AccessMode>,
}

impl Persistence {
    /// READ COMMITTED where the backend supports isolation levels.
    /// SQLite transactions are serialized by the engine and take no options.
    pub fn new(db: DatabaseConnection) -> Self {
        let (isolation, access) = match db.get_database_backend() {
            DatabaseBackend::Sqlite => (None, None),
            _ => (Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite)),
        };

        Self {
            db,
            isolation,
            access,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(self.isolation, self.access)
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
