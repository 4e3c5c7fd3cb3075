//! Application assembly shared by the server binary and integration tests.
//!
//! [`build_http_state`] wires the domain services over any set of repository
//! adapters; [`build_app`] mounts the API scope, health probes and, in debug
//! builds, Swagger UI.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::Clock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{
    ClientRepository, OrderRepository, PasswordHasher, ProductRepository, SessionTokens,
    UserRepository,
};
use crate::domain::{
    ClientService, OrderService, ProductService, SalesRankingService, UserAccountService,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, query_config};
use crate::middleware::Trace;

/// Repository adapters backing one running instance.
pub struct Repositories<U, C, P, O> {
    /// Seller accounts.
    pub users: Arc<U>,
    /// Client records.
    pub clients: Arc<C>,
    /// Product catalogue.
    pub products: Arc<P>,
    /// Orders and stock reservation.
    pub orders: Arc<O>,
}

impl<S> Repositories<S, S, S, S> {
    /// Use one adapter for every port, as the in-memory store does.
    #[must_use]
    pub fn shared(store: Arc<S>) -> Self {
        Self {
            users: Arc::clone(&store),
            clients: Arc::clone(&store),
            products: Arc::clone(&store),
            orders: store,
        }
    }
}

/// Credential adapters and the clock handed to the services.
pub struct Credentials {
    /// One-way password hashing.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Session token issuing and verification.
    pub tokens: Arc<dyn SessionTokens>,
    /// Source of creation timestamps.
    pub clock: Arc<dyn Clock>,
}

/// Build the handler state from repositories and credential adapters.
#[must_use]
pub fn build_http_state<U, C, P, O>(
    repos: Repositories<U, C, P, O>,
    credentials: Credentials,
) -> HttpState
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    let Repositories {
        users,
        clients,
        products,
        orders,
    } = repos;
    let Credentials {
        hasher,
        tokens,
        clock,
    } = credentials;

    let accounts = Arc::new(UserAccountService::new(
        Arc::clone(&users),
        hasher,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let client_service = Arc::new(ClientService::new(Arc::clone(&clients), Arc::clone(&clock)));
    let product_service = Arc::new(ProductService::new(products, Arc::clone(&clock)));
    let order_service = Arc::new(OrderService::new(
        Arc::clone(&orders),
        Arc::clone(&clients),
        clock,
    ));
    let rankings = Arc::new(SalesRankingService::new(orders, clients, users));

    HttpState {
        registration: accounts.clone(),
        login: accounts,
        tokens,
        clients: client_service.clone(),
        clients_query: client_service,
        products: product_service.clone(),
        products_query: product_service,
        orders: order_service.clone(),
        orders_query: order_service,
        rankings,
    }
}

/// Build the actix application around prepared state.
#[must_use]
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").configure(configure_api);

    let base = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = base.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = base;

    app
}
