//! PostgreSQL-backed `OrderRepository`.
//!
//! Each line is reserved with a conditional decrement
//! (`existencia = existencia - n WHERE existencia >= n`), so concurrent
//! placements can never drive stock negative. Placement and line replacement
//! run inside one transaction; the first failing line rolls back every
//! decrement made before it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{OrderPersistenceError, OrderRepository};
use crate::domain::{
    ClientId, LineItem, Order, OrderId, OrderLine, OrderPatch, OrderPlacement, OrderStatus,
    Product, ProductId, ReservationError, RevenueGroup, UserId, finalize, order_total,
    price_lines,
};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{OrderRow, ProductRow, line_items_column, stock_column};
use super::pool::{DbPool, PoolError};
use super::schema::{pedidos, productos};

/// Diesel-backed implementation of [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a repository over a connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderPersistenceError {
    map_basic_pool_error(error, OrderPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrderPersistenceError {
    map_basic_diesel_error(
        error,
        OrderPersistenceError::query,
        OrderPersistenceError::connection,
    )
}

fn product_not_found(id: ProductId) -> OrderPersistenceError {
    OrderPersistenceError::product_not_found(id.to_string())
}

/// Failure inside a transaction: either the driver or a domain rule.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    Order(OrderPersistenceError),
}

impl From<diesel::result::Error> for TxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

impl From<OrderPersistenceError> for TxError {
    fn from(value: OrderPersistenceError) -> Self {
        Self::Order(value)
    }
}

impl From<ReservationError> for TxError {
    fn from(value: ReservationError) -> Self {
        Self::Order(value.into())
    }
}

impl From<TxError> for OrderPersistenceError {
    fn from(value: TxError) -> Self {
        match value {
            TxError::Diesel(error) => map_diesel_error(error),
            TxError::Order(error) => error,
        }
    }
}

/// Reserve `lines` in input order, returning the updated product rows.
async fn reserve(
    conn: &mut AsyncPgConnection,
    lines: &[OrderLine],
) -> Result<BTreeMap<ProductId, Product>, TxError> {
    let mut reserved = BTreeMap::new();
    for line in lines {
        let cantidad = stock_column(line.cantidad()).map_err(OrderPersistenceError::query)?;
        let decremented: Option<ProductRow> = diesel::update(
            productos::table
                .find(line.producto().as_uuid())
                .filter(productos::existencia.ge(cantidad)),
        )
        .set(productos::existencia.eq(productos::existencia - cantidad))
        .returning(ProductRow::as_returning())
        .get_result(conn)
        .await
        .optional()?;

        let Some(row) = decremented else {
            let nombre: Option<String> = productos::table
                .find(line.producto().as_uuid())
                .select(productos::nombre)
                .first(conn)
                .await
                .optional()?;
            debug!(producto = %line.producto(), cantidad, "line could not be reserved");
            return Err(match nombre {
                Some(nombre) => ReservationError::InsufficientStock(nombre),
                None => ReservationError::UnknownProduct(line.producto()),
            }
            .into());
        };
        let product = Product::try_from(row).map_err(OrderPersistenceError::query)?;
        reserved.insert(product.id, product);
    }
    Ok(reserved)
}

/// Return the quantities of `items` to stock; deleted products are skipped.
async fn release(conn: &mut AsyncPgConnection, items: &[LineItem]) -> Result<(), TxError> {
    for item in items {
        let cantidad = stock_column(item.cantidad).map_err(OrderPersistenceError::query)?;
        diesel::update(productos::table.find(item.id.as_uuid()))
            .set(productos::existencia.eq(productos::existencia + cantidad))
            .execute(conn)
            .await?;
    }
    Ok(())
}

fn rows_to_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, OrderPersistenceError> {
    rows.into_iter()
        .map(Order::try_from)
        .collect::<Result<_, _>>()
        .map_err(OrderPersistenceError::query)
}

fn revenue_groups<K>(
    rows: Vec<(Uuid, Option<Decimal>)>,
    key: impl Fn(Uuid) -> K,
) -> Vec<RevenueGroup<K>> {
    rows.into_iter()
        .map(|(id, total)| RevenueGroup {
            key: key(id),
            total: total.unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn place(&self, placement: OrderPlacement) -> Result<Order, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let order = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let reserved = reserve(conn, &placement.lines).await?;
                    let order = finalize(placement, &reserved).map_err(product_not_found)?;
                    let row = OrderRow::try_from(&order).map_err(OrderPersistenceError::query)?;
                    diesel::insert_into(pedidos::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(order)
                }
                .scope_boxed()
            })
            .await?;
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OrderRow> = pedidos::table
            .find(id.as_uuid())
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Order::try_from)
            .transpose()
            .map_err(OrderPersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = pedidos::table
            .select(OrderRow::as_select())
            .order_by((pedidos::creado.asc(), pedidos::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_orders(rows)
    }

    async fn list_by_seller(
        &self,
        vendedor: &UserId,
        estado: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = pedidos::table
            .filter(pedidos::vendedor.eq(*vendedor.as_uuid()))
            .select(OrderRow::as_select())
            .order_by((pedidos::creado.asc(), pedidos::id.asc()))
            .into_boxed();
        if let Some(wanted) = estado {
            query = query.filter(pedidos::estado.eq(wanted.as_str()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_orders(rows)
    }

    async fn update(
        &self,
        id: &OrderId,
        patch: OrderPatch,
    ) -> Result<Order, OrderPersistenceError> {
        let order_id = *id;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let order = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let row: OrderRow = pedidos::table
                        .find(order_id.as_uuid())
                        .select(OrderRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| {
                            OrderPersistenceError::order_not_found(order_id.to_string())
                        })?;
                    let mut order = Order::try_from(row).map_err(OrderPersistenceError::query)?;

                    order.cliente = patch.cliente.unwrap_or(order.cliente);
                    order.estado = patch.estado.unwrap_or(order.estado);
                    if let Some(lines) = patch.pedido {
                        release(conn, &order.pedido).await?;
                        let reserved = reserve(conn, &lines).await?;
                        order.pedido = price_lines(&lines, &reserved).map_err(product_not_found)?;
                        order.total = order_total(&order.pedido);
                    }

                    let pedido =
                        line_items_column(&order.pedido).map_err(OrderPersistenceError::query)?;
                    diesel::update(pedidos::table.find(order_id.as_uuid()))
                        .set((
                            pedidos::cliente.eq(*order.cliente.as_uuid()),
                            pedidos::estado.eq(order.estado.as_str()),
                            pedidos::pedido.eq(pedido),
                            pedidos::total.eq(order.total),
                        ))
                        .execute(conn)
                        .await?;
                    Ok(order)
                }
                .scope_boxed()
            })
            .await?;
        Ok(order)
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(pedidos::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn revenue_by_client(
        &self,
    ) -> Result<Vec<RevenueGroup<ClientId>>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, Option<Decimal>)> = pedidos::table
            .filter(pedidos::estado.eq(OrderStatus::Completado.as_str()))
            .group_by(pedidos::cliente)
            .select((pedidos::cliente, diesel::dsl::sum(pedidos::total)))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(revenue_groups(rows, ClientId::from_uuid))
    }

    async fn revenue_by_seller(&self) -> Result<Vec<RevenueGroup<UserId>>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, Option<Decimal>)> = pedidos::table
            .filter(pedidos::estado.eq(OrderStatus::Completado.as_str()))
            .group_by(pedidos::vendedor)
            .select((pedidos::vendedor, diesel::dsl::sum(pedidos::total)))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(revenue_groups(rows, UserId::from_uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    fn reservation_failures_keep_their_meaning() {
        let err = OrderPersistenceError::from(TxError::from(ReservationError::InsufficientStock(
            "Teclado".into(),
        )));
        assert_eq!(err, OrderPersistenceError::insufficient_stock("Teclado"));
    }

    #[rstest]
    fn driver_failures_are_redacted() {
        let err = OrderPersistenceError::from(TxError::from(diesel::result::Error::NotFound));
        assert_eq!(err, OrderPersistenceError::query("record not found"));
    }

    #[rstest]
    fn null_sums_become_zero() {
        let id = Uuid::new_v4();
        let groups = revenue_groups(vec![(id, None), (id, Some(dec!(3.5)))], ClientId::from_uuid);
        assert_eq!(groups[0].total, Decimal::ZERO);
        assert_eq!(groups[1].total, dec!(3.5));
    }
}
