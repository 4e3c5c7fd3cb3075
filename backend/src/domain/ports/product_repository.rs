//! Port for catalogue persistence.
use async_trait::async_trait;

use crate::domain::{Product, ProductId, ProductPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
    }
}

/// Driven port for the product catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product.
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError>;

    /// Product by id, if any.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductPersistenceError>;

    /// Whole catalogue, oldest first.
    async fn list_all(&self) -> Result<Vec<Product>, ProductPersistenceError>;

    /// Products whose name contains every word of `texto`.
    async fn search(&self, texto: &str) -> Result<Vec<Product>, ProductPersistenceError>;

    /// Apply `patch` to the stored product in one step and return the result.
    ///
    /// Columns the patch leaves out keep their stored value, so concurrent
    /// stock reservations are never overwritten. `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductPersistenceError>;

    /// Remove a product. Returns `false` when the id did not resolve.
    async fn delete(&self, id: &ProductId) -> Result<bool, ProductPersistenceError>;
}
