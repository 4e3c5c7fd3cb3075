//! PostgreSQL adapters for the repository ports.
//!
//! Repositories translate between Diesel rows (`models`, `schema`) and domain
//! types; neither leaves this module. Connections come from a `bb8` pool of
//! `diesel-async` connections and every driver failure is mapped onto the
//! port's own error enum.
//!
//! ```ignore
//! use crm_backend::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/crm")).await?;
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_client_repository;
mod diesel_order_repository;
mod diesel_product_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_client_repository::DieselClientRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
