//! Driving port for order mutations.

use async_trait::async_trait;

use crate::domain::{ClientId, DeletionReceipt, Error, Order, OrderId, OrderLine, OrderPatch, UserId};

/// Driving port for order writes, scoped to the acting seller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// `nuevoPedido`: reserve stock and store a pending order for a client
    /// `actor` owns.
    async fn place(
        &self,
        actor: &UserId,
        cliente: &ClientId,
        lines: Vec<OrderLine>,
    ) -> Result<Order, Error>;

    /// `actualizarPedido`.
    async fn update(&self, actor: &UserId, id: &OrderId, patch: OrderPatch) -> Result<Order, Error>;

    /// `eliminarPedido`. Stock is not restored.
    async fn delete(&self, actor: &UserId, id: &OrderId) -> Result<DeletionReceipt, Error>;
}
