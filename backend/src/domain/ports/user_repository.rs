//! Port for seller account persistence.
use async_trait::async_trait;

use crate::domain::{User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email index rejected the insert.
        DuplicateEmail { email: String } => "user email already registered: {email}",
    }
}

/// Account storage keyed by id and normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account, hash included, by normalised email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, UserPersistenceError>;
}
