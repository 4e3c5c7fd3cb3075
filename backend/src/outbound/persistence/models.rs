//! Diesel row structs and their conversions to domain types.
//!
//! Conversions from rows are fallible: a row that no longer satisfies a
//! domain invariant yields a message that adapters report as a query error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Client, ClientId, Email, LineItem, Order, OrderId, OrderStatus, Product, ProductId,
    ProductPatch, User,
    UserAccount, UserId,
};

use super::schema::{clientes, pedidos, productos, usuarios};

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = usuarios)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub password: String,
    pub creado: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn from_account(account: &UserAccount) -> Self {
        Self {
            id: *account.user.id.as_uuid(),
            nombre: account.user.nombre.clone(),
            apellido: account.user.apellido.clone(),
            email: account.user.email.to_string(),
            password: account.password_hash.clone(),
            creado: account.user.creado,
        }
    }

    pub(crate) fn into_account(self) -> Result<UserAccount, String> {
        let email = Email::parse("email", &self.email).map_err(|err| err.to_string())?;
        Ok(UserAccount {
            user: User {
                id: UserId::from_uuid(self.id),
                nombre: self.nombre,
                apellido: self.apellido,
                email,
                creado: self.creado,
            },
            password_hash: self.password,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = clientes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub empresa: String,
    pub email: String,
    pub telefono: Option<String>,
    pub vendedor: Uuid,
    pub creado: DateTime<Utc>,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: *client.id.as_uuid(),
            nombre: client.nombre.clone(),
            apellido: client.apellido.clone(),
            empresa: client.empresa.clone(),
            email: client.email.to_string(),
            telefono: client.telefono.clone(),
            vendedor: *client.vendedor.as_uuid(),
            creado: client.creado,
        }
    }
}

impl TryFrom<ClientRow> for Client {
    type Error = String;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let email = Email::parse("email", &row.email).map_err(|err| err.to_string())?;
        Ok(Self {
            id: ClientId::from_uuid(row.id),
            nombre: row.nombre,
            apellido: row.apellido,
            empresa: row.empresa,
            email,
            telefono: row.telefono,
            vendedor: UserId::from_uuid(row.vendedor),
            creado: row.creado,
        })
    }
}

/// Editable client columns; owner and creation time stay fixed.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = clientes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ClientChanges<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub empresa: &'a str,
    pub email: &'a str,
    pub telefono: Option<&'a str>,
}

impl<'a> From<&'a Client> for ClientChanges<'a> {
    fn from(client: &'a Client) -> Self {
        Self {
            nombre: &client.nombre,
            apellido: &client.apellido,
            empresa: &client.empresa,
            email: client.email.as_ref(),
            telefono: client.telefono.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = productos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub nombre: String,
    pub existencia: i32,
    pub precio: Decimal,
    pub creado: DateTime<Utc>,
}

impl TryFrom<&Product> for ProductRow {
    type Error = String;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *product.id.as_uuid(),
            nombre: product.nombre.clone(),
            existencia: stock_column(product.existencia)?,
            precio: product.precio,
            creado: product.creado,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = String;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let existencia = u32::try_from(row.existencia)
            .map_err(|_| format!("product {} has negative stock", row.id))?;
        Ok(Self {
            id: ProductId::from_uuid(row.id),
            nombre: row.nombre,
            precio: row.precio,
            existencia,
            creado: row.creado,
        })
    }
}

/// Columns set by a product patch; `None` leaves the stored value alone.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = productos)]
pub(crate) struct ProductChanges<'a> {
    pub nombre: Option<&'a str>,
    pub precio: Option<Decimal>,
    pub existencia: Option<i32>,
}

impl<'a> TryFrom<&'a ProductPatch> for ProductChanges<'a> {
    type Error = String;

    fn try_from(patch: &'a ProductPatch) -> Result<Self, Self::Error> {
        Ok(Self {
            nombre: patch.nombre.as_deref(),
            precio: patch.precio,
            existencia: patch.existencia.map(stock_column).transpose()?,
        })
    }
}

/// Convert a domain quantity to the `Int4` column type.
pub(crate) fn stock_column(quantity: u32) -> Result<i32, String> {
    i32::try_from(quantity).map_err(|_| format!("quantity {quantity} exceeds column range"))
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pedidos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub pedido: serde_json::Value,
    pub total: Decimal,
    pub cliente: Uuid,
    pub vendedor: Uuid,
    pub estado: String,
    pub creado: DateTime<Utc>,
}

impl TryFrom<&Order> for OrderRow {
    type Error = String;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: *order.id.as_uuid(),
            pedido: line_items_column(&order.pedido)?,
            total: order.total,
            cliente: *order.cliente.as_uuid(),
            vendedor: *order.vendedor.as_uuid(),
            estado: order.estado.as_str().to_owned(),
            creado: order.creado,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = String;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let pedido: Vec<LineItem> = serde_json::from_value(row.pedido)
            .map_err(|err| format!("order {} has malformed line items: {err}", row.id))?;
        let estado: OrderStatus = row
            .estado
            .parse()
            .map_err(|err| format!("order {}: {err}", row.id))?;
        Ok(Self {
            id: OrderId::from_uuid(row.id),
            cliente: ClientId::from_uuid(row.cliente),
            vendedor: UserId::from_uuid(row.vendedor),
            pedido,
            total: row.total,
            estado,
            creado: row.creado,
        })
    }
}

pub(crate) fn line_items_column(items: &[LineItem]) -> Result<serde_json::Value, String> {
    serde_json::to_value(items).map_err(|err| format!("could not encode line items: {err}"))
}
