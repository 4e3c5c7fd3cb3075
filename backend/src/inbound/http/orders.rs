//! Order handlers. Every route needs an authenticated seller.
//!
//! ```text
//! GET    /api/v1/pedidos
//! GET    /api/v1/pedidos/vendedor
//! GET    /api/v1/pedidos/estado/{estado}
//! GET    /api/v1/pedidos/{id}
//! POST   /api/v1/pedidos        {"cliente":"<uuid>","pedido":[{"id":"<uuid>","cantidad":2}]}
//! PUT    /api/v1/pedidos/{id}   {"estado":"COMPLETADO"}
//! DELETE /api/v1/pedidos/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ClientId, DeletionReceipt, Error, Order, OrderId, OrderLineRequest, OrderPatch, OrderStatus,
    SellerOrder, validate_lines,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_id, parse_status};

/// Body of `nuevoPedido`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewOrderRequest {
    /// Identifier of a client the caller owns.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub cliente: String,
    /// Requested lines; at least one.
    pub pedido: Vec<OrderLineRequest>,
}

/// Body of `actualizarPedido`; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct OrderPatchRequest {
    /// Reassign to another owned client.
    pub cliente: Option<String>,
    /// New state.
    pub estado: Option<OrderStatus>,
    /// Replacement lines; stock is re-reserved.
    pub pedido: Option<Vec<OrderLineRequest>>,
}

/// Every order in the system (`obtenerPedidos`).
#[utoipa::path(
    get,
    path = "/api/v1/pedidos",
    responses(
        (status = 200, description = "All orders", body = [Order]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "obtenerPedidos",
    security(("BearerToken" = []))
)]
#[get("/pedidos")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<Order>>> {
    actor.require()?;
    Ok(web::Json(state.orders_query.list_all().await?))
}

/// The actor's orders with their client embedded (`obtenerPedidosVendedor`).
#[utoipa::path(
    get,
    path = "/api/v1/pedidos/vendedor",
    responses(
        (status = 200, description = "The actor's orders", body = [SellerOrder]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "obtenerPedidosVendedor",
    security(("BearerToken" = []))
)]
#[get("/pedidos/vendedor")]
pub async fn list_seller_orders(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<SellerOrder>>> {
    let seller = actor.require()?;
    Ok(web::Json(state.orders_query.list_for_seller(seller).await?))
}

/// The actor's orders in one state (`obtenerPedidoEstado`).
#[utoipa::path(
    get,
    path = "/api/v1/pedidos/estado/{estado}",
    params(("estado" = OrderStatus, Path, description = "Order state, case-insensitive")),
    responses(
        (status = 200, description = "Matching orders", body = [Order]),
        (status = 400, description = "Unknown state", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "obtenerPedidoEstado",
    security(("BearerToken" = []))
)]
#[get("/pedidos/estado/{estado}")]
pub async fn list_orders_by_status(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Order>>> {
    let seller = actor.require()?;
    let estado = parse_status(&path.into_inner())?;
    Ok(web::Json(
        state.orders_query.list_by_status(seller, estado).await?,
    ))
}

/// One of the actor's orders (`obtenerPedido`).
#[utoipa::path(
    get,
    path = "/api/v1/pedidos/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "No such order", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "obtenerPedido",
    security(("BearerToken" = []))
)]
#[get("/pedidos/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<Order>> {
    let seller = actor.require()?;
    let id: OrderId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.orders_query.get(seller, &id).await?))
}

/// Place an order for one of the actor's clients (`nuevoPedido`).
///
/// Stock for every line is reserved atomically; if any line cannot be
/// served nothing is decremented.
#[utoipa::path(
    post,
    path = "/api/v1/pedidos",
    request_body = NewOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Client owned by another seller", body = Error),
        (status = 404, description = "Unknown client or product", body = Error),
        (status = 409, description = "Insufficient stock", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "nuevoPedido",
    security(("BearerToken" = []))
)]
#[post("/pedidos")]
pub async fn create_order(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<NewOrderRequest>,
) -> ApiResult<HttpResponse> {
    let seller = actor.require()?;
    let NewOrderRequest { cliente, pedido } = payload.into_inner();
    let client_id: ClientId = parse_id("cliente", &cliente)?;
    let lines = validate_lines(&pedido)?;
    let order = state.orders.place(seller, &client_id, lines).await?;
    Ok(HttpResponse::Created().json(order))
}

/// Patch one of the actor's orders (`actualizarPedido`).
#[utoipa::path(
    put,
    path = "/api/v1/pedidos/{id}",
    params(("id" = String, Path, description = "Order id")),
    request_body = OrderPatchRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "Unknown order, client or product", body = Error),
        (status = 409, description = "Insufficient stock", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "actualizarPedido",
    security(("BearerToken" = []))
)]
#[put("/pedidos/{id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    payload: web::Json<OrderPatchRequest>,
) -> ApiResult<web::Json<Order>> {
    let seller = actor.require()?;
    let id: OrderId = parse_id("id", &path.into_inner())?;
    let OrderPatchRequest {
        cliente,
        estado,
        pedido,
    } = payload.into_inner();
    let client_id = cliente
        .map(|raw| parse_id::<ClientId>("cliente", &raw))
        .transpose()?;
    let patch = OrderPatch::try_from_parts(client_id, estado, pedido.as_deref())?;
    Ok(web::Json(state.orders.update(seller, &id, patch).await?))
}

/// Remove one of the actor's orders (`eliminarPedido`). Stock is not
/// restored.
#[utoipa::path(
    delete,
    path = "/api/v1/pedidos/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Deletion receipt", body = DeletionReceipt),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "No such order", body = Error)
    ),
    tags = ["pedidos"],
    operation_id = "eliminarPedido",
    security(("BearerToken" = []))
)]
#[delete("/pedidos/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionReceipt>> {
    let seller = actor.require()?;
    let id: OrderId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.orders.delete(seller, &id).await?))
}
