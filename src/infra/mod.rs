//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Media file storage
//! - Unit of Work for transaction management

pub mod db;
pub mod media;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use media::MediaStore;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
