//! [`MemoryStore`]: repository ports over mutex-guarded vectors.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::ports::{
    ClientPersistenceError, ClientRepository, OrderPersistenceError, OrderRepository,
    ProductPersistenceError, ProductRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Client, ClientId, Email, Order, OrderId, OrderPatch, OrderPlacement, OrderStatus, Product,
    ProductId, ProductPatch, RevenueGroup, User, UserAccount, UserId, finalize, order_total,
    price_lines, release_lines, reserve_lines,
};

const POISONED: &str = "memory store lock poisoned";

#[derive(Debug, Default)]
struct State {
    users: Vec<UserAccount>,
    clients: Vec<Client>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl State {
    fn stock(&self) -> BTreeMap<ProductId, Product> {
        self.products
            .iter()
            .map(|product| (product.id, product.clone()))
            .collect()
    }

    fn commit_stock(&mut self, stock: &BTreeMap<ProductId, Product>) {
        for product in &mut self.products {
            if let Some(updated) = stock.get(&product.id) {
                product.existencia = updated.existencia;
            }
        }
    }
}

/// Thread-safe in-memory implementation of every repository port.
///
/// Collections keep insertion order, so listings are oldest first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state.lock().map_err(|_| POISONED.to_owned())
    }
}

fn revenue_groups<K: Ord + Copy>(
    orders: &[Order],
    key: impl Fn(&Order) -> K,
) -> Vec<RevenueGroup<K>> {
    let mut totals: BTreeMap<K, Decimal> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|order| order.estado == OrderStatus::Completado)
    {
        *totals.entry(key(order)).or_default() += order.total;
    }
    totals
        .into_iter()
        .map(|(key, total)| RevenueGroup { key, total })
        .collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state
            .users
            .iter()
            .any(|existing| existing.user.email == account.user.email)
        {
            return Err(UserPersistenceError::duplicate_email(
                account.user.email.to_string(),
            ));
        }
        state.users.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|account| account.user.id == *id)
            .map(|account| account.user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .iter()
            .find(|account| account.user.email.as_ref() == email)
            .cloned())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn insert(&self, client: &Client) -> Result<(), ClientPersistenceError> {
        let mut state = self.lock().map_err(ClientPersistenceError::query)?;
        if state.clients.iter().any(|existing| existing.email == client.email) {
            return Err(ClientPersistenceError::duplicate_email(
                client.email.to_string(),
            ));
        }
        state.clients.push(client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientPersistenceError> {
        let state = self.lock().map_err(ClientPersistenceError::query)?;
        Ok(state.clients.iter().find(|client| client.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>, ClientPersistenceError> {
        let state = self.lock().map_err(ClientPersistenceError::query)?;
        Ok(state
            .clients
            .iter()
            .find(|client| client.email == *email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Client>, ClientPersistenceError> {
        let state = self.lock().map_err(ClientPersistenceError::query)?;
        Ok(state.clients.clone())
    }

    async fn list_by_seller(
        &self,
        vendedor: &UserId,
    ) -> Result<Vec<Client>, ClientPersistenceError> {
        let state = self.lock().map_err(ClientPersistenceError::query)?;
        Ok(state
            .clients
            .iter()
            .filter(|client| client.vendedor == *vendedor)
            .cloned()
            .collect())
    }

    async fn update(&self, client: &Client) -> Result<bool, ClientPersistenceError> {
        let mut state = self.lock().map_err(ClientPersistenceError::query)?;
        if state
            .clients
            .iter()
            .any(|other| other.id != client.id && other.email == client.email)
        {
            return Err(ClientPersistenceError::duplicate_email(
                client.email.to_string(),
            ));
        }
        let Some(stored) = state.clients.iter_mut().find(|stored| stored.id == client.id) else {
            return Ok(false);
        };
        let vendedor = stored.vendedor;
        *stored = Client {
            vendedor,
            ..client.clone()
        };
        Ok(true)
    }

    async fn delete(&self, id: &ClientId) -> Result<bool, ClientPersistenceError> {
        let mut state = self.lock().map_err(ClientPersistenceError::query)?;
        let before = state.clients.len();
        state.clients.retain(|client| client.id != *id);
        Ok(state.clients.len() != before)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn insert(&self, product: &Product) -> Result<(), ProductPersistenceError> {
        let mut state = self.lock().map_err(ProductPersistenceError::query)?;
        state.products.push(product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        let state = self.lock().map_err(ProductPersistenceError::query)?;
        Ok(state.products.iter().find(|product| product.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        let state = self.lock().map_err(ProductPersistenceError::query)?;
        Ok(state.products.clone())
    }

    async fn search(&self, texto: &str) -> Result<Vec<Product>, ProductPersistenceError> {
        let state = self.lock().map_err(ProductPersistenceError::query)?;
        Ok(state
            .products
            .iter()
            .filter(|product| product.matches_words(texto))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        let mut state = self.lock().map_err(ProductPersistenceError::query)?;
        Ok(state
            .products
            .iter_mut()
            .find(|stored| stored.id == *id)
            .map(|stored| {
                stored.apply(patch);
                stored.clone()
            }))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, ProductPersistenceError> {
        let mut state = self.lock().map_err(ProductPersistenceError::query)?;
        let before = state.products.len();
        state.products.retain(|product| product.id != *id);
        Ok(state.products.len() != before)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn place(&self, placement: OrderPlacement) -> Result<Order, OrderPersistenceError> {
        let mut state = self.lock().map_err(OrderPersistenceError::query)?;
        let mut stock = state.stock();
        reserve_lines(&placement.lines, &mut stock)?;
        let order = finalize(placement, &stock)
            .map_err(|id| OrderPersistenceError::product_not_found(id.to_string()))?;
        state.commit_stock(&stock);
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderPersistenceError> {
        let state = self.lock().map_err(OrderPersistenceError::query)?;
        Ok(state.orders.iter().find(|order| order.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        let state = self.lock().map_err(OrderPersistenceError::query)?;
        Ok(state.orders.clone())
    }

    async fn list_by_seller(
        &self,
        vendedor: &UserId,
        estado: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderPersistenceError> {
        let state = self.lock().map_err(OrderPersistenceError::query)?;
        Ok(state
            .orders
            .iter()
            .filter(|order| order.vendedor == *vendedor)
            .filter(|order| estado.is_none_or(|estado| order.estado == estado))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &OrderId,
        patch: OrderPatch,
    ) -> Result<Order, OrderPersistenceError> {
        let mut state = self.lock().map_err(OrderPersistenceError::query)?;
        let mut order = state
            .orders
            .iter()
            .find(|order| order.id == *id)
            .cloned()
            .ok_or_else(|| OrderPersistenceError::order_not_found(id.to_string()))?;

        if let Some(cliente) = patch.cliente {
            order.cliente = cliente;
        }
        if let Some(estado) = patch.estado {
            order.estado = estado;
        }
        if let Some(lines) = patch.pedido {
            let mut stock = state.stock();
            release_lines(&order.pedido, &mut stock);
            reserve_lines(&lines, &mut stock)?;
            order.pedido = price_lines(&lines, &stock)
                .map_err(|id| OrderPersistenceError::product_not_found(id.to_string()))?;
            order.total = order_total(&order.pedido);
            state.commit_stock(&stock);
        }

        if let Some(stored) = state.orders.iter_mut().find(|stored| stored.id == *id) {
            *stored = order.clone();
        }
        Ok(order)
    }

    async fn delete(&self, id: &OrderId) -> Result<bool, OrderPersistenceError> {
        let mut state = self.lock().map_err(OrderPersistenceError::query)?;
        let before = state.orders.len();
        state.orders.retain(|order| order.id != *id);
        Ok(state.orders.len() != before)
    }

    async fn revenue_by_client(
        &self,
    ) -> Result<Vec<RevenueGroup<ClientId>>, OrderPersistenceError> {
        let state = self.lock().map_err(OrderPersistenceError::query)?;
        Ok(revenue_groups(&state.orders, |order| order.cliente))
    }

    async fn revenue_by_seller(&self) -> Result<Vec<RevenueGroup<UserId>>, OrderPersistenceError> {
        let state = self.lock().map_err(OrderPersistenceError::query)?;
        Ok(revenue_groups(&state.orders, |order| order.vendedor))
    }
}
