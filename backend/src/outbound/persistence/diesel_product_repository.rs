//! PostgreSQL-backed `ProductRepository`.
//!
//! Search uses the `simple` text-search configuration over `nombre`, so
//! matching is by whole word, case-insensitive, and every word must appear.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{Product, ProductId, ProductPatch};

use super::error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ProductChanges, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::productos;

const SEARCH_SQL: &str = "SELECT id, nombre, existencia, precio, creado FROM productos \
     WHERE to_tsvector('simple', nombre) @@ plainto_tsquery('simple', $1) \
     ORDER BY creado, id";

/// Diesel-backed implementation of [`ProductRepository`].
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a repository over a connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductPersistenceError {
    map_basic_pool_error(error, ProductPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProductPersistenceError {
    map_basic_diesel_error(
        error,
        ProductPersistenceError::query,
        ProductPersistenceError::connection,
    )
}

fn rows_to_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, ProductPersistenceError> {
    rows.into_iter()
        .map(Product::try_from)
        .collect::<Result<_, _>>()
        .map_err(ProductPersistenceError::query)
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError> {
        let row = ProductRow::try_from(product).map_err(ProductPersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(productos::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = productos::table
            .find(id.as_uuid())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Product::try_from)
            .transpose()
            .map_err(ProductPersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = productos::table
            .select(ProductRow::as_select())
            .order_by((productos::creado.asc(), productos::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_products(rows)
    }

    async fn search(&self, texto: &str) -> Result<Vec<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = diesel::sql_query(SEARCH_SQL)
            .bind::<Text, _>(texto)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_products(rows)
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        // Diesel rejects a changeset with no columns.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let changes = ProductChanges::try_from(patch).map_err(ProductPersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = diesel::update(productos::table.find(id.as_uuid()))
            .set(&changes)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Product::try_from)
            .transpose()
            .map_err(ProductPersistenceError::query)
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(productos::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
