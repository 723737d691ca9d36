//! Microblog API - a minimal Twitter-like backend
//!
//! Users identified by an API key publish tweets with optional media
//! attachments, like tweets and follow each other. Storage goes through a
//! generic repository layer with batched eager loading.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Response views and request payloads
//! - **services**: Use cases and response assembly
//! - **infra**: Database, repositories, unit of work and media storage
//! - **api**: HTTP handlers, extractors, middleware and routes
//! - **types**: Response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the demo users
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
