//! PostgreSQL-backed `ClientRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ClientPersistenceError, ClientRepository};
use crate::domain::{Client, ClientId, Email, UserId};

use super::error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{ClientChanges, ClientRow};
use super::pool::{DbPool, PoolError};
use super::schema::clientes;

/// Diesel-backed implementation of [`ClientRepository`].
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a repository over a connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ClientPersistenceError {
    map_basic_pool_error(error, ClientPersistenceError::connection)
}

/// Unique violations on `email` become [`ClientPersistenceError::DuplicateEmail`].
fn map_write_error(error: diesel::result::Error, email: &Email) -> ClientPersistenceError {
    if is_unique_violation(&error, "email") {
        return ClientPersistenceError::duplicate_email(email.to_string());
    }
    map_diesel_error(error)
}

fn map_diesel_error(error: diesel::result::Error) -> ClientPersistenceError {
    map_basic_diesel_error(
        error,
        ClientPersistenceError::query,
        ClientPersistenceError::connection,
    )
}

fn rows_to_clients(rows: Vec<ClientRow>) -> Result<Vec<Client>, ClientPersistenceError> {
    rows.into_iter()
        .map(Client::try_from)
        .collect::<Result<_, _>>()
        .map_err(ClientPersistenceError::query)
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn insert(&self, client: &Client) -> Result<(), ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(clientes::table)
            .values(ClientRow::from(client))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &client.email))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ClientRow> = clientes::table
            .find(id.as_uuid())
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Client::try_from)
            .transpose()
            .map_err(ClientPersistenceError::query)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ClientRow> = clientes::table
            .filter(clientes::email.eq(email.as_ref()))
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Client::try_from)
            .transpose()
            .map_err(ClientPersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = clientes::table
            .select(ClientRow::as_select())
            .order_by((clientes::creado.asc(), clientes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_clients(rows)
    }

    async fn list_by_seller(
        &self,
        vendedor: &UserId,
    ) -> Result<Vec<Client>, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = clientes::table
            .filter(clientes::vendedor.eq(vendedor.as_uuid()))
            .select(ClientRow::as_select())
            .order_by((clientes::creado.asc(), clientes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_clients(rows)
    }

    async fn update(&self, client: &Client) -> Result<bool, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(clientes::table.find(client.id.as_uuid()))
            .set(ClientChanges::from(client))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &client.email))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &ClientId) -> Result<bool, ClientPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(clientes::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
