//! Driving port for order reads.

use async_trait::async_trait;

use crate::domain::{Error, Order, OrderId, OrderStatus, SellerOrder, UserId};

/// Driving port for order reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// `obtenerPedidos`: every order in the system.
    async fn list_all(&self) -> Result<Vec<Order>, Error>;

    /// `obtenerPedidosVendedor`: the actor's orders with their clients.
    async fn list_for_seller(&self, actor: &UserId) -> Result<Vec<SellerOrder>, Error>;

    /// `obtenerPedidoEstado`: the actor's orders in one state.
    async fn list_by_status(&self, actor: &UserId, estado: OrderStatus) -> Result<Vec<Order>, Error>;

    /// `obtenerPedido`: one order, only for its owner.
    async fn get(&self, actor: &UserId, id: &OrderId) -> Result<Order, Error>;
}
