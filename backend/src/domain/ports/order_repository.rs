//! Port for order persistence and stock reservation.
//!
//! Placing and re-pricing an order touch product stock; adapters run those
//! operations as one unit of work so a failed line leaves every product's
//! `existencia` as it was.

use async_trait::async_trait;

use crate::domain::{
    ClientId, Order, OrderId, OrderPatch, OrderPlacement, OrderStatus, ReservationError,
    RevenueGroup, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by order repository adapters.
    pub enum OrderPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "order repository query failed: {message}",
        /// The order disappeared while it was being updated.
        OrderNotFound { id: String } => "order {id} not found",
        /// A line references an unknown product.
        ProductNotFound { id: String } => "product {id} not found",
        /// A line asks for more units than are in stock.
        InsufficientStock { producto: String } => "insufficient stock for {producto}",
    }
}

impl From<ReservationError> for OrderPersistenceError {
    fn from(value: ReservationError) -> Self {
        match value {
            ReservationError::UnknownProduct(id) => Self::product_not_found(id.to_string()),
            ReservationError::InsufficientStock(producto) => Self::insufficient_stock(producto),
        }
    }
}

/// Order storage. Owns stock reservation so it shares a unit of work with
/// the order write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Reserve stock for every line and store the priced order.
    ///
    /// Lines for the same product are reserved cumulatively. Nothing is
    /// written when any line fails.
    async fn place(&self, placement: OrderPlacement) -> Result<Order, OrderPersistenceError>;

    /// Fetch an order by identifier.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderPersistenceError>;

    /// Every order, oldest first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError>;

    /// Orders placed by `vendedor`, optionally restricted to one state.
    async fn list_by_seller(
        &self,
        vendedor: &UserId,
        estado: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderPersistenceError>;

    /// Apply a patch. When it replaces the line items the previous quantities
    /// are released and the new ones reserved in the same unit of work.
    async fn update(&self, id: &OrderId, patch: OrderPatch)
    -> Result<Order, OrderPersistenceError>;

    /// Remove an order without touching stock. Returns `false` when the id did
    /// not resolve.
    async fn delete(&self, id: &OrderId) -> Result<bool, OrderPersistenceError>;

    /// Revenue of completed orders summed per client, unordered.
    async fn revenue_by_client(&self)
    -> Result<Vec<RevenueGroup<ClientId>>, OrderPersistenceError>;

    /// Revenue of completed orders summed per seller, unordered.
    async fn revenue_by_seller(&self) -> Result<Vec<RevenueGroup<UserId>>, OrderPersistenceError>;
}
