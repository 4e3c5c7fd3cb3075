//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod auth;
pub mod clients;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register every API route on `cfg`.
///
/// Literal segments (`buscar`, `vendedor`, `estado`) are registered before
/// the `{id}` routes that would otherwise capture them.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::current_user)
        .service(products::list_products)
        .service(products::search_products)
        .service(products::get_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(clients::list_clients)
        .service(clients::list_seller_clients)
        .service(clients::get_client)
        .service(clients::create_client)
        .service(clients::update_client)
        .service(clients::delete_client)
        .service(orders::list_orders)
        .service(orders::list_seller_orders)
        .service(orders::list_orders_by_status)
        .service(orders::get_order)
        .service(orders::create_order)
        .service(orders::update_order)
        .service(orders::delete_order)
        .service(reports::top_clients)
        .service(reports::top_sellers);
}
