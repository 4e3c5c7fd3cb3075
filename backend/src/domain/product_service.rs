//! Catalogue use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{ProductCommand, ProductQuery, ProductRepository};
use crate::domain::service_support::{PRODUCT_NOT_FOUND_MESSAGE, map_product_error};
use crate::domain::validation::FieldError;
use crate::domain::{DeletionReceipt, Error, NewProduct, Product, ProductId, ProductPatch};

/// Confirmation text for `eliminarProducto`.
pub const PRODUCT_DELETED_MESSAGE: &str = "Producto eliminado";

/// Catalogue service implementing [`ProductCommand`] and [`ProductQuery`].
#[derive(Clone)]
pub struct ProductService<P> {
    products: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> ProductService<P> {
    /// Create the service over a product repository.
    #[must_use]
    pub const fn new(products: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { products, clock }
    }
}

impl<P> ProductService<P>
where
    P: ProductRepository,
{
    async fn existing(&self, id: &ProductId) -> Result<Product, Error> {
        self.products
            .find_by_id(id)
            .await
            .map_err(map_product_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<P> ProductCommand for ProductService<P>
where
    P: ProductRepository,
{
    async fn create(&self, input: NewProduct) -> Result<Product, Error> {
        let product = input.into_product(ProductId::random(), self.clock.utc());
        self.products
            .insert(&product)
            .await
            .map_err(map_product_error)?;
        info!(product_id = %product.id, existencia = product.existencia, "product created");
        Ok(product)
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, Error> {
        let product = self
            .products
            .update(id, &patch)
            .await
            .map_err(map_product_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND_MESSAGE))?;
        info!(
            product_id = %product.id,
            restocked = patch.existencia.is_some(),
            "product updated"
        );
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<DeletionReceipt, Error> {
        if !self.products.delete(id).await.map_err(map_product_error)? {
            return Err(Error::not_found(PRODUCT_NOT_FOUND_MESSAGE));
        }
        info!(product_id = %id, "product deleted");
        Ok(DeletionReceipt::new(id, PRODUCT_DELETED_MESSAGE))
    }
}

#[async_trait]
impl<P> ProductQuery for ProductService<P>
where
    P: ProductRepository,
{
    async fn list(&self) -> Result<Vec<Product>, Error> {
        self.products.list_all().await.map_err(map_product_error)
    }

    async fn get(&self, id: &ProductId) -> Result<Product, Error> {
        self.existing(id).await
    }

    async fn search(&self, texto: &str) -> Result<Vec<Product>, Error> {
        let words = texto.trim();
        if words.is_empty() {
            return Err(FieldError::Required { field: "texto" }.into());
        }
        self.products
            .search(words)
            .await
            .map_err(map_product_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockProductRepository, ProductPersistenceError};
    use chrono::Utc;
    use mockable::DefaultClock;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn make_service(repo: MockProductRepository) -> ProductService<MockProductRepository> {
        ProductService::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    fn teclado() -> Product {
        NewProduct::try_from_parts("Teclado", dec!(25), 4)
            .expect("valid product")
            .into_product(ProductId::random(), Utc::now())
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));

        let err = make_service(repo)
            .get(&ProductId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), PRODUCT_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn update_hands_the_patch_to_the_store() {
        let product = teclado();
        let id = product.id;
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().times(0);
        repo.expect_update()
            .withf(move |target, patch| {
                *target == id && patch.existencia == Some(10) && patch.precio.is_none()
            })
            .return_once(move |_, patch| {
                let mut updated = product;
                updated.apply(patch);
                Ok(Some(updated))
            });

        let patch = ProductPatch::try_from_parts(None, None, Some(10)).expect("patch");
        let updated = make_service(repo).update(&id, patch).await.expect("updated");
        assert_eq!(updated.existencia, 10);
        assert_eq!(updated.precio, dec!(25));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().return_once(|_, _| Ok(None));

        let patch = ProductPatch::try_from_parts(None, Some(dec!(1)), None).expect("patch");
        let err = make_service(repo)
            .update(&ProductId::random(), patch)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn search_rejects_blank_text(#[case] texto: &str) {
        let mut repo = MockProductRepository::new();
        repo.expect_search().times(0);

        let err = make_service(repo).search(texto).await.expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn search_passes_trimmed_text() {
        let mut repo = MockProductRepository::new();
        repo.expect_search()
            .withf(|texto: &str| texto == "teclado")
            .return_once(|_| Ok(vec![teclado()]));

        let found = make_service(repo).search("  teclado ").await.expect("results");
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_store_is_service_unavailable() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_all()
            .return_once(|| Err(ProductPersistenceError::connection("pool timed out")));

        let err = make_service(repo).list().await.expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_receipt() {
        let id = ProductId::random();
        let mut repo = MockProductRepository::new();
        repo.expect_delete().return_once(|_| Ok(true));

        let receipt = make_service(repo).delete(&id).await.expect("deleted");
        assert_eq!(receipt.mensaje, PRODUCT_DELETED_MESSAGE);
        assert_eq!(receipt.id, id.to_string());
    }
}
