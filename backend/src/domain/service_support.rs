//! Mapping from persistence port errors to domain errors.
//!
//! Connection failures become `service_unavailable`; anything else the store
//! reports unexpectedly becomes `internal_error`. Constraint violations with a
//! domain meaning map onto their own codes.

use serde_json::json;
use tracing::debug;

use super::Error;
use super::ports::{
    ClientPersistenceError, OrderPersistenceError, ProductPersistenceError, UserPersistenceError,
};

/// Message for a client email that is already taken.
pub const DUPLICATE_CLIENT_MESSAGE: &str = "Ese cliente ya esta registrado";
/// Message for an unknown product id.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Producto no encontrado";

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict(super::ports::DUPLICATE_USER_MESSAGE)
        }
    }
}

pub(crate) fn map_client_error(error: ClientPersistenceError) -> Error {
    debug!(%error, "client repository failure");
    match error {
        ClientPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("client repository unavailable: {message}"))
        }
        ClientPersistenceError::Query { message } => {
            Error::internal(format!("client repository error: {message}"))
        }
        ClientPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_CLIENT_MESSAGE),
    }
}

pub(crate) fn map_product_error(error: ProductPersistenceError) -> Error {
    debug!(%error, "product repository failure");
    match error {
        ProductPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        ProductPersistenceError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
    }
}

pub(crate) fn map_order_error(error: OrderPersistenceError) -> Error {
    debug!(%error, "order repository failure");
    match error {
        OrderPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderPersistenceError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
        OrderPersistenceError::OrderNotFound { .. } => {
            Error::not_found(<super::Order as super::Owned>::NOT_FOUND)
        }
        OrderPersistenceError::ProductNotFound { id } => {
            Error::not_found(PRODUCT_NOT_FOUND_MESSAGE).with_details(json!({ "id": id }))
        }
        OrderPersistenceError::InsufficientStock { producto } => {
            Error::insufficient_stock(&producto)
        }
    }
}
