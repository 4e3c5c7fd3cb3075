//! Driving port for client reads.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, Error, UserId};

/// Driving port for client reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientQuery: Send + Sync {
    /// `obtenerClientes`: every client in the system.
    async fn list_all(&self) -> Result<Vec<Client>, Error>;

    /// `obtenerClientesVendedor`: clients owned by `actor`.
    async fn list_for_seller(&self, actor: &UserId) -> Result<Vec<Client>, Error>;

    /// `obtenerCliente`: one client, only for its owner.
    async fn get(&self, actor: &UserId, id: &ClientId) -> Result<Client, Error>;
}
