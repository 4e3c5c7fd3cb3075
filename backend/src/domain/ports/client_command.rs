//! Driving port for client mutations.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, ClientPatch, DeletionReceipt, Error, NewClient, UserId};

/// Driving port for client writes, scoped to the acting seller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientCommand: Send + Sync {
    /// `nuevoCliente`: create a client owned by `actor`.
    async fn create(&self, actor: &UserId, client: NewClient) -> Result<Client, Error>;

    /// `actualizarCliente`: merge a patch into a client `actor` owns.
    async fn update(&self, actor: &UserId, id: &ClientId, patch: ClientPatch)
    -> Result<Client, Error>;

    /// `eliminarCliente`: remove a client `actor` owns.
    async fn delete(&self, actor: &UserId, id: &ClientId) -> Result<DeletionReceipt, Error>;
}
