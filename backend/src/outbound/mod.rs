//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories used without a database URL
//! - **security**: Argon2 password hashing and HS256 session tokens
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. Stock reservation is the one
//! rule they enforce themselves, because it must run inside the store's unit
//! of work.

pub mod memory;
pub mod persistence;
pub mod security;
