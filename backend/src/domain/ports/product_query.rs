//! Driving port for catalogue reads.

use async_trait::async_trait;

use crate::domain::{Error, Product, ProductId};

/// Driving port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// `obtenerProductos`.
    async fn list(&self) -> Result<Vec<Product>, Error>;

    /// `obtenerProducto`.
    async fn get(&self, id: &ProductId) -> Result<Product, Error>;

    /// `buscarProducto`: whole-word match on the product name.
    async fn search(&self, texto: &str) -> Result<Vec<Product>, Error>;
}
