//! Client handlers. Every route needs an authenticated seller.
//!
//! ```text
//! GET    /api/v1/clientes
//! GET    /api/v1/clientes/vendedor
//! GET    /api/v1/clientes/{id}
//! POST   /api/v1/clientes        {"nombre":"Luis","apellido":"Pérez","empresa":"Ferretería","email":"luis@example.com"}
//! PUT    /api/v1/clientes/{id}   {"telefono":"555-0101"}
//! DELETE /api/v1/clientes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Client, ClientId, ClientPatch, DeletionReceipt, Error, NewClient};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id;

/// Body of `nuevoCliente`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewClientRequest {
    /// Contact first name.
    #[schema(example = "Luis")]
    pub nombre: String,
    /// Contact surname.
    #[schema(example = "Pérez")]
    pub apellido: String,
    /// Company name.
    #[schema(example = "Ferretería Pérez")]
    pub empresa: String,
    /// Unique contact email.
    #[schema(example = "luis@ferreteria.example")]
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub telefono: Option<String>,
}

/// Body of `actualizarCliente`; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ClientPatchRequest {
    /// New first name.
    pub nombre: Option<String>,
    /// New surname.
    pub apellido: Option<String>,
    /// New company name.
    pub empresa: Option<String>,
    /// New email; must stay unique.
    pub email: Option<String>,
    /// New phone number.
    pub telefono: Option<String>,
}

/// Every client in the system (`obtenerClientes`).
#[utoipa::path(
    get,
    path = "/api/v1/clientes",
    responses(
        (status = 200, description = "All clients", body = [Client]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "obtenerClientes",
    security(("BearerToken" = []))
)]
#[get("/clientes")]
pub async fn list_clients(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<Client>>> {
    actor.require()?;
    Ok(web::Json(state.clients_query.list_all().await?))
}

/// Clients owned by the actor (`obtenerClientesVendedor`).
#[utoipa::path(
    get,
    path = "/api/v1/clientes/vendedor",
    responses(
        (status = 200, description = "The actor's clients", body = [Client]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "obtenerClientesVendedor",
    security(("BearerToken" = []))
)]
#[get("/clientes/vendedor")]
pub async fn list_seller_clients(
    state: web::Data<HttpState>,
    actor: Actor,
) -> ApiResult<web::Json<Vec<Client>>> {
    let seller = actor.require()?;
    Ok(web::Json(state.clients_query.list_for_seller(seller).await?))
}

/// One of the actor's clients (`obtenerCliente`).
#[utoipa::path(
    get,
    path = "/api/v1/clientes/{id}",
    params(("id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "No such client", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "obtenerCliente",
    security(("BearerToken" = []))
)]
#[get("/clientes/{id}")]
pub async fn get_client(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<Client>> {
    let seller = actor.require()?;
    let id: ClientId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.clients_query.get(seller, &id).await?))
}

/// Register a client for the actor (`nuevoCliente`).
#[utoipa::path(
    post,
    path = "/api/v1/clientes",
    request_body = NewClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "nuevoCliente",
    security(("BearerToken" = []))
)]
#[post("/clientes")]
pub async fn create_client(
    state: web::Data<HttpState>,
    actor: Actor,
    payload: web::Json<NewClientRequest>,
) -> ApiResult<HttpResponse> {
    let seller = actor.require()?;
    let NewClientRequest {
        nombre,
        apellido,
        empresa,
        email,
        telefono,
    } = payload.into_inner();
    let client =
        NewClient::try_from_parts(&nombre, &apellido, &empresa, &email, telefono.as_deref())?;
    let created = state.clients.create(seller, client).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch one of the actor's clients (`actualizarCliente`).
#[utoipa::path(
    put,
    path = "/api/v1/clientes/{id}",
    params(("id" = String, Path, description = "Client id")),
    request_body = ClientPatchRequest,
    responses(
        (status = 200, description = "Updated client", body = Client),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "No such client", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "actualizarCliente",
    security(("BearerToken" = []))
)]
#[put("/clientes/{id}")]
pub async fn update_client(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
    payload: web::Json<ClientPatchRequest>,
) -> ApiResult<web::Json<Client>> {
    let seller = actor.require()?;
    let id: ClientId = parse_id("id", &path.into_inner())?;
    let ClientPatchRequest {
        nombre,
        apellido,
        empresa,
        email,
        telefono,
    } = payload.into_inner();
    let patch = ClientPatch::try_from_parts(
        nombre.as_deref(),
        apellido.as_deref(),
        empresa.as_deref(),
        email.as_deref(),
        telefono.as_deref(),
    )?;
    Ok(web::Json(state.clients.update(seller, &id, patch).await?))
}

/// Remove one of the actor's clients (`eliminarCliente`).
#[utoipa::path(
    delete,
    path = "/api/v1/clientes/{id}",
    params(("id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Deletion receipt", body = DeletionReceipt),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Owned by another seller", body = Error),
        (status = 404, description = "No such client", body = Error)
    ),
    tags = ["clientes"],
    operation_id = "eliminarCliente",
    security(("BearerToken" = []))
)]
#[delete("/clientes/{id}")]
pub async fn delete_client(
    state: web::Data<HttpState>,
    actor: Actor,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionReceipt>> {
    let seller = actor.require()?;
    let id: ClientId = parse_id("id", &path.into_inner())?;
    Ok(web::Json(state.clients.delete(seller, &id).await?))
}
