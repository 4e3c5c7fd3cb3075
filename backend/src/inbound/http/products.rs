//! Product catalogue handlers.
//!
//! ```text
//! GET    /api/v1/productos
//! GET    /api/v1/productos/buscar?texto=monitor
//! GET    /api/v1/productos/{id}
//! POST   /api/v1/productos        {"nombre":"Monitor","precio":199.99,"existencia":5}
//! PUT    /api/v1/productos/{id}   {"existencia":8}
//! DELETE /api/v1/productos/{id}
//! ```
//!
//! Reads are public; writes need an authenticated actor.

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DeletionReceipt, Error, NewProduct, Product, ProductId, ProductPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

/// Body of `nuevoProducto`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewProductRequest {
    /// Display name.
    #[schema(example = "Monitor 24\"")]
    pub nombre: String,
    /// Unit price; must not be negative.
    #[schema(value_type = f64, example = 199.99)]
    pub precio: Decimal,
    /// Units in stock; must not be negative.
    #[schema(example = 5)]
    pub existencia: i64,
}

/// Body of `actualizarProducto`; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductPatchRequest {
    /// New display name.
    pub nombre: Option<String>,
    /// New unit price.
    #[schema(value_type = Option<f64>)]
    pub precio: Option<Decimal>,
    /// New stock level.
    pub existencia: Option<i64>,
}

/// Query of `buscarProducto`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Words matched against product names.
    #[param(example = "monitor")]
    pub texto: String,
}

/// List the catalogue (`obtenerProductos`).
#[utoipa::path(
    get,
    path = "/api/v1/productos",
    responses(
        (status = 200, description = "Products in insertion order", body = [Product]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["productos"],
    operation_id = "obtenerProductos",
    security([])
)]
#[get("/productos")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    Ok(web::Json(state.products_query.list().await?))
}

/// Full-text search over product names (`buscarProducto`).
#[utoipa::path(
    get,
    path = "/api/v1/productos/buscar",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = [Product]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["productos"],
    operation_id = "buscarProducto",
    security([])
)]
#[get("/productos/buscar")]
pub async fn search_products(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let SearchQuery { texto } = query.into_inner();
    Ok(web::Json(state.products_query.search(&texto).await?))
}

/// Fetch one product (`obtenerProducto`).
#[utoipa::path(
    get,
    path = "/api/v1/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["productos"],
    operation_id = "obtenerProducto",
    security([])
)]
#[get("/productos/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let id: ProductId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.products_query.get(&id).await?))
}

/// Add a product (`nuevoProducto`).
#[utoipa::path(
    post,
    path = "/api/v1/productos",
    request_body = NewProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["productos"],
    operation_id = "nuevoProducto",
    security(("BearerToken" = []))
)]
#[post("/productos")]
pub async fn create_product(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<NewProductRequest>,
) -> ApiResult<HttpResponse> {
    actor.require()?;
    let NewProductRequest {
        nombre,
        precio,
        existencia,
    } = payload.into_inner();
    let product = NewProduct::try_from_parts(&nombre, precio, existencia)?;
    let created = state.products.create(product).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch a product (`actualizarProducto`).
#[utoipa::path(
    put,
    path = "/api/v1/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPatchRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["productos"],
    operation_id = "actualizarProducto",
    security(("BearerToken" = []))
)]
#[put("/productos/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    payload: web::Json<ProductPatchRequest>,
) -> ApiResult<web::Json<Product>> {
    actor.require()?;
    let id: ProductId = parse_id("id", &path.into_inner())?;
    let ProductPatchRequest {
        nombre,
        precio,
        existencia,
    } = payload.into_inner();
    let patch = ProductPatch::try_from_parts(nombre.as_deref(), precio, existencia)?;
    Ok(web::Json(state.products.update(&id, patch).await?))
}

/// Remove a product (`eliminarProducto`).
#[utoipa::path(
    delete,
    path = "/api/v1/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deletion receipt", body = DeletionReceipt),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["productos"],
    operation_id = "eliminarProducto",
    security(("BearerToken" = []))
)]
#[delete("/productos/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionReceipt>> {
    actor.require()?;
    let id: ProductId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.products.delete(&id).await?))
}
