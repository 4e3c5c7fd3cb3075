//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` route under its operation name
//! (`nuevoUsuario`, `obtenerProductos`, ...), the health probes, the domain
//! schemas and the bearer token security scheme. The document backs Swagger
//! UI in debug builds and is printed by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AuthenticatedUser, Client, ClientRanking, DeletionReceipt, Error, ErrorCode, LineItem, Order,
    OrderLineRequest, OrderStatus, Product, SellerOrder, SellerRanking, SessionToken, User,
};
use crate::inbound::http::clients::{ClientPatchRequest, NewClientRequest};
use crate::inbound::http::orders::{NewOrderRequest, OrderPatchRequest};
use crate::inbound::http::products::{NewProductRequest, ProductPatchRequest};
use crate::inbound::http::users::{LoginRequest, NewUserRequest};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /api/v1/usuarios/autenticar."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CRM backend API",
        description = "Sellers, their clients, the product catalogue and stock-aware orders."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::search_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::clients::list_clients,
        crate::inbound::http::clients::list_seller_clients,
        crate::inbound::http::clients::get_client,
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::update_client,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::list_seller_orders,
        crate::inbound::http::orders::list_orders_by_status,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::reports::top_clients,
        crate::inbound::http::reports::top_sellers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        AuthenticatedUser,
        SessionToken,
        Client,
        Product,
        Order,
        OrderStatus,
        OrderLineRequest,
        LineItem,
        SellerOrder,
        ClientRanking,
        SellerRanking,
        DeletionReceipt,
        NewUserRequest,
        LoginRequest,
        NewProductRequest,
        ProductPatchRequest,
        NewClientRequest,
        ClientPatchRequest,
        NewOrderRequest,
        OrderPatchRequest,
    )),
    tags(
        (name = "usuarios", description = "Seller accounts and sessions"),
        (name = "productos", description = "Product catalogue"),
        (name = "clientes", description = "Clients owned by sellers"),
        (name = "pedidos", description = "Orders and stock reservation"),
        (name = "reportes", description = "Revenue rankings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document for the REST surface.
pub struct ApiDoc;
