//! Order placement and order management.
//!
//! The service resolves and guards the client, then hands the validated lines
//! to the store, which reserves stock and prices the order in one unit of
//! work.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{ClientRepository, OrderCommand, OrderQuery, OrderRepository};
use crate::domain::service_support::{map_client_error, map_order_error};
use crate::domain::{
    Client, ClientId, DeletionReceipt, Error, Order, OrderId, OrderLine, OrderPatch,
    OrderPlacement, OrderStatus, Owned, OwnershipGuard, SellerOrder, UserId,
};

/// Confirmation text for `eliminarPedido`.
pub const ORDER_DELETED_MESSAGE: &str = "Pedido eliminado";

/// Order service implementing [`OrderCommand`] and [`OrderQuery`].
#[derive(Clone)]
pub struct OrderService<O, C> {
    orders: Arc<O>,
    clients: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<O, C> OrderService<O, C> {
    /// Create the service over the order and client repositories.
    ///
    /// `clients` is read to check that the target client belongs to the
    /// seller placing the order.
    #[must_use]
    pub const fn new(orders: Arc<O>, clients: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders,
            clients,
            clock,
        }
    }
}

impl<O, C> OrderService<O, C>
where
    O: OrderRepository,
    C: ClientRepository,
{
    async fn owned_client(&self, actor: &UserId, id: &ClientId) -> Result<Client, Error> {
        let client = self.clients.find_by_id(id).await.map_err(map_client_error)?;
        OwnershipGuard::authorize(actor, client)
    }

    async fn owned_order(&self, actor: &UserId, id: &OrderId) -> Result<Order, Error> {
        let order = self.orders.find_by_id(id).await.map_err(map_order_error)?;
        OwnershipGuard::authorize(actor, order)
    }
}

#[async_trait]
impl<O, C> OrderCommand for OrderService<O, C>
where
    O: OrderRepository,
    C: ClientRepository,
{
    async fn place(
        &self,
        actor: &UserId,
        cliente: &ClientId,
        lines: Vec<OrderLine>,
    ) -> Result<Order, Error> {
        let client = self.owned_client(actor, cliente).await?;
        let placement = OrderPlacement {
            id: OrderId::random(),
            cliente: client.id,
            vendedor: *actor,
            lines,
            creado: self.clock.utc(),
        };

        let order = self.orders.place(placement).await.map_err(|err| {
            debug!(%err, cliente = %client.id, "order placement rejected");
            map_order_error(err)
        })?;
        info!(
            order_id = %order.id,
            cliente = %order.cliente,
            lines = order.pedido.len(),
            total = %order.total,
            "order placed; stock reserved"
        );
        Ok(order)
    }

    async fn update(
        &self,
        actor: &UserId,
        id: &OrderId,
        patch: OrderPatch,
    ) -> Result<Order, Error> {
        self.owned_order(actor, id).await?;
        if let Some(cliente) = patch.cliente.as_ref() {
            self.owned_client(actor, cliente).await?;
        }

        let restocked = patch.touches_stock();
        let order = self.orders.update(id, patch).await.map_err(map_order_error)?;
        info!(order_id = %order.id, estado = %order.estado, restocked, "order updated");
        Ok(order)
    }

    async fn delete(&self, actor: &UserId, id: &OrderId) -> Result<DeletionReceipt, Error> {
        self.owned_order(actor, id).await?;
        if !self.orders.delete(id).await.map_err(map_order_error)? {
            return Err(Error::not_found(Order::NOT_FOUND));
        }
        info!(order_id = %id, "order deleted");
        Ok(DeletionReceipt::new(id, ORDER_DELETED_MESSAGE))
    }
}

#[async_trait]
impl<O, C> OrderQuery for OrderService<O, C>
where
    O: OrderRepository,
    C: ClientRepository,
{
    async fn list_all(&self) -> Result<Vec<Order>, Error> {
        self.orders.list_all().await.map_err(map_order_error)
    }

    async fn list_for_seller(&self, actor: &UserId) -> Result<Vec<SellerOrder>, Error> {
        let orders = self
            .orders
            .list_by_seller(actor, None)
            .await
            .map_err(map_order_error)?;

        let mut clients: HashMap<ClientId, Option<Client>> = HashMap::new();
        let mut embedded = Vec::with_capacity(orders.len());
        for order in orders {
            let client = match clients.get(&order.cliente) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self
                        .clients
                        .find_by_id(&order.cliente)
                        .await
                        .map_err(map_client_error)?;
                    clients.insert(order.cliente, found.clone());
                    found
                }
            };
            embedded.push(SellerOrder::new(order, client));
        }
        Ok(embedded)
    }

    async fn list_by_status(
        &self,
        actor: &UserId,
        estado: OrderStatus,
    ) -> Result<Vec<Order>, Error> {
        self.orders
            .list_by_seller(actor, Some(estado))
            .await
            .map_err(map_order_error)
    }

    async fn get(&self, actor: &UserId, id: &OrderId) -> Result<Order, Error> {
        self.owned_order(actor, id).await
    }
}
