//! Driving port for catalogue mutations.

use async_trait::async_trait;

use crate::domain::{DeletionReceipt, Error, NewProduct, Product, ProductId, ProductPatch};

/// Driving port for catalogue writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// `nuevoProducto`.
    async fn create(&self, product: NewProduct) -> Result<Product, Error>;

    /// `actualizarProducto`.
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, Error>;

    /// `eliminarProducto`.
    async fn delete(&self, id: &ProductId) -> Result<DeletionReceipt, Error>;
}
