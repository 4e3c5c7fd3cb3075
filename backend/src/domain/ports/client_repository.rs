//! Port for client persistence.
use async_trait::async_trait;

use crate::domain::{Client, ClientId, Email, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by client repository adapters.
    pub enum ClientPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "client repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "client repository query failed: {message}",
        /// The unique email index rejected the write.
        DuplicateEmail { email: String } => "client email already registered: {email}",
    }
}

/// Client storage. Ownership checks happen in the service, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Store a new client.
    async fn insert(&self, client: &Client) -> Result<(), ClientPersistenceError>;

    /// Fetch a client by identifier.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientPersistenceError>;

    /// Fetch the client registered under `email`.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, ClientPersistenceError>;

    /// Every client, oldest first.
    async fn list_all(&self) -> Result<Vec<Client>, ClientPersistenceError>;

    /// Clients owned by `vendedor`, oldest first.
    async fn list_by_seller(&self, vendedor: &UserId)
    -> Result<Vec<Client>, ClientPersistenceError>;

    /// Overwrite the mutable fields of an existing client.
    ///
    /// Returns `false` when the id no longer resolves.
    async fn update(&self, client: &Client) -> Result<bool, ClientPersistenceError>;

    /// Remove a client. Returns `false` when the id did not resolve.
    async fn delete(&self, id: &ClientId) -> Result<bool, ClientPersistenceError>;
}
