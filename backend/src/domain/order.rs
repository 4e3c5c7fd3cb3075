//! Orders and the pricing half of order placement.
//!
//! Stock reservation happens inside the store's unit of work; once every line
//! has been reserved the adapter hands the reserved products back here and
//! [`finalize`] snapshots prices and computes the total.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::FieldError;
use super::{Client, ClientId, OrderId, Product, ProductId, UserId};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, stock reserved, not yet settled.
    #[default]
    Pendiente,
    /// Settled; counts towards revenue rankings.
    Completado,
    /// Abandoned. Reserved stock is not returned.
    Cancelado,
}

impl OrderStatus {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pendiente => "PENDIENTE",
            Self::Completado => "COMPLETADO",
            Self::Cancelado => "CANCELADO",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown order state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("estado desconocido: {0}")]
pub struct UnknownOrderStatus(
    /// The rejected input.
    pub String,
);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDIENTE" => Ok(Self::Pendiente),
            "COMPLETADO" => Ok(Self::Completado),
            "CANCELADO" => Ok(Self::Cancelado),
            _ => Err(UnknownOrderStatus(s.to_owned())),
        }
    }
}

/// Requested line as sent by the caller: a product and a raw quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    /// Requested product.
    #[schema(value_type = String)]
    pub id: ProductId,
    /// Requested units, validated later.
    #[schema(example = 2)]
    pub cantidad: i64,
}

/// Validated line: `cantidad` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    producto: ProductId,
    cantidad: u32,
}

impl OrderLine {
    /// Validate a requested quantity for `producto`.
    ///
    /// # Errors
    ///
    /// [`FieldError::NotPositive`] for zero or negative quantities and
    /// [`FieldError::OutOfRange`] above what a stock column can hold.
    pub fn try_new(producto: ProductId, requested: i64) -> Result<Self, FieldError> {
        if requested <= 0 {
            return Err(FieldError::NotPositive { field: "cantidad" });
        }
        let cantidad = u32::try_from(requested)
            .ok()
            .filter(|value| *value <= i32::MAX.unsigned_abs())
            .ok_or(FieldError::OutOfRange {
                field: "cantidad",
                min: 1,
                max: i64::from(i32::MAX),
            })?;
        Ok(Self { producto, cantidad })
    }

    /// Product the line draws on.
    #[must_use]
    pub const fn producto(&self) -> ProductId {
        self.producto
    }

    /// Units requested; always at least one.
    #[must_use]
    pub const fn cantidad(&self) -> u32 {
        self.cantidad
    }
}

/// Validate a requested line list: non-empty, every quantity positive.
pub fn validate_lines(raw: &[OrderLineRequest]) -> Result<Vec<OrderLine>, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::Empty { field: "pedido" });
    }
    raw.iter()
        .map(|line| OrderLine::try_new(line.id, line.cantidad))
        .collect()
}

/// Why a line could not be reserved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    /// The line references a product that does not exist.
    #[error("product {0} not found")]
    UnknownProduct(ProductId),
    /// The line asks for more units than remain; carries the product name.
    #[error("insufficient stock for {0}")]
    InsufficientStock(String),
}

/// Decrement `stock` line by line, in input order.
///
/// Repeated products draw on what earlier lines left, so quantities add up.
/// `stock` is a working copy: on error it is partially decremented and the
/// caller must discard it.
pub fn reserve_lines(
    lines: &[OrderLine],
    stock: &mut BTreeMap<ProductId, Product>,
) -> Result<(), ReservationError> {
    for line in lines {
        let product = stock
            .get_mut(&line.producto)
            .ok_or(ReservationError::UnknownProduct(line.producto))?;
        product.existencia = product
            .existencia
            .checked_sub(line.cantidad)
            .ok_or_else(|| ReservationError::InsufficientStock(product.nombre.clone()))?;
    }
    Ok(())
}

/// Return the quantities of `items` to `stock`. Products that no longer
/// exist are skipped.
pub fn release_lines(items: &[LineItem], stock: &mut BTreeMap<ProductId, Product>) {
    for item in items {
        if let Some(product) = stock.get_mut(&item.id) {
            product.existencia = product.existencia.saturating_add(item.cantidad);
        }
    }
}

/// Line item stored on an order: quantity plus the product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    /// Product the units came from.
    #[schema(value_type = String)]
    pub id: ProductId,
    /// Units sold.
    #[schema(example = 2)]
    pub cantidad: u32,
    /// Product name at placement time.
    #[schema(example = "Teclado")]
    pub nombre: String,
    /// Unit price at placement time.
    #[schema(value_type = f64, example = 25.5)]
    pub precio: Decimal,
}

impl LineItem {
    /// `cantidad * precio`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.precio * Decimal::from(self.cantidad)
    }
}

/// Sum of `cantidad * precio` across the line items.
#[must_use]
pub fn order_total(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::subtotal).sum()
}

/// Placement handed to the store: validated lines plus identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlacement {
    /// Identifier for the new order.
    pub id: OrderId,
    /// Client the order is for.
    pub cliente: ClientId,
    /// Seller placing it.
    pub vendedor: UserId,
    /// Lines in request order.
    pub lines: Vec<OrderLine>,
    /// Placement time.
    pub creado: DateTime<Utc>,
}

/// Price reserved lines against the product rows read during reservation.
///
/// `reserved` must contain every product referenced by `lines`; a missing one
/// yields the offending id.
pub fn price_lines(
    lines: &[OrderLine],
    reserved: &BTreeMap<ProductId, Product>,
) -> Result<Vec<LineItem>, ProductId> {
    lines
        .iter()
        .map(|line| {
            let product = reserved.get(&line.producto).ok_or(line.producto)?;
            Ok(LineItem {
                id: product.id,
                cantidad: line.cantidad,
                nombre: product.nombre.clone(),
                precio: product.precio,
            })
        })
        .collect()
}

/// Build the stored order once every line has been reserved.
pub fn finalize(
    placement: OrderPlacement,
    reserved: &BTreeMap<ProductId, Product>,
) -> Result<Order, ProductId> {
    let pedido = price_lines(&placement.lines, reserved)?;
    let total = order_total(&pedido);
    Ok(Order {
        id: placement.id,
        cliente: placement.cliente,
        vendedor: placement.vendedor,
        pedido,
        total,
        estado: OrderStatus::Pendiente,
        creado: placement.creado,
    })
}

/// Stored order.
///
/// ## Invariants
/// - `total == sum(cantidad * precio)` over `pedido`.
/// - `vendedor` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Record identifier.
    #[schema(value_type = String)]
    pub id: OrderId,
    /// Client the order is for.
    #[schema(value_type = String)]
    pub cliente: ClientId,
    /// Seller that placed it.
    #[schema(value_type = String)]
    pub vendedor: UserId,
    /// Priced line items.
    pub pedido: Vec<LineItem>,
    /// Sum of the line subtotals.
    #[schema(value_type = f64, example = 51.0)]
    pub total: Decimal,
    /// Lifecycle state.
    pub estado: OrderStatus,
    /// Placement time.
    pub creado: DateTime<Utc>,
}

/// Validated partial update for `actualizarPedido`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    /// Move the order to another client.
    pub cliente: Option<ClientId>,
    /// New lifecycle state.
    pub estado: Option<OrderStatus>,
    /// Replacement line items.
    pub pedido: Option<Vec<OrderLine>>,
}

impl OrderPatch {
    /// Validate the requested changes.
    pub fn try_from_parts(
        cliente: Option<ClientId>,
        estado: Option<OrderStatus>,
        pedido: Option<&[OrderLineRequest]>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            cliente,
            estado,
            pedido: pedido.map(validate_lines).transpose()?,
        })
    }

    /// Whether the patch changes line items and therefore stock.
    #[must_use]
    pub fn touches_stock(&self) -> bool {
        self.pedido.is_some()
    }
}

/// Order with its client record embedded (`obtenerPedidosVendedor`).
///
/// `cliente` is `None` when the client has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerOrder {
    /// Record identifier.
    #[schema(value_type = String)]
    pub id: OrderId,
    /// Client record, if it still exists.
    pub cliente: Option<Client>,
    /// Seller that placed it.
    #[schema(value_type = String)]
    pub vendedor: UserId,
    /// Priced line items.
    pub pedido: Vec<LineItem>,
    /// Sum of the line subtotals.
    #[schema(value_type = f64)]
    pub total: Decimal,
    /// Lifecycle state.
    pub estado: OrderStatus,
    /// Placement time.
    pub creado: DateTime<Utc>,
}

impl SellerOrder {
    /// Embed the client record (or its absence) into `order`.
    #[must_use]
    pub fn new(order: Order, cliente: Option<Client>) -> Self {
        Self {
            id: order.id,
            cliente,
            vendedor: order.vendedor,
            pedido: order.pedido,
            total: order.total,
            estado: order.estado,
            creado: order.creado,
        }
    }
}
