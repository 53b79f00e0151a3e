//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Connections come from a `bb8` pool via `diesel-async`; the schema
//! is managed by the embedded migrations in [`migrations`].
//!
//! # Example
//!
//! ```ignore
//! use devconnector::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/devconnector")).await?;
//! let profiles = DieselProfileRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_profile_repository;
mod diesel_user_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
