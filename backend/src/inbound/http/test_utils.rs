//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::web;

use crate::domain::ports::{
    MockClientCommand, MockClientQuery, MockLoginService, MockOrderCommand, MockOrderQuery,
    MockProductCommand, MockProductQuery, MockRegistrationService, MockSalesRankingQuery,
    MockSessionTokens,
};
use crate::domain::{AuthenticatedUser, Email, UserId};

use super::state::HttpState;

/// Token accepted by [`StateBuilder::with_actor`].
pub const TEST_TOKEN: &str = "test-token";

/// `Authorization` header carrying `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Seller identity used by handler tests.
pub fn seller(id: UserId) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        email: Email::parse("email", "vendedor@example.com").expect("email"),
        nombre: "Vera".to_owned(),
        apellido: "Díaz".to_owned(),
    }
}

/// Assembles an [`HttpState`] from mocks.
///
/// Ports that a test does not configure get a mock with no expectations, so
/// any unexpected call fails the test.
#[derive(Default)]
pub struct StateBuilder {
    registration: Option<MockRegistrationService>,
    login: Option<MockLoginService>,
    tokens: Option<MockSessionTokens>,
    clients: Option<MockClientCommand>,
    clients_query: Option<MockClientQuery>,
    products: Option<MockProductCommand>,
    products_query: Option<MockProductQuery>,
    orders: Option<MockOrderCommand>,
    orders_query: Option<MockOrderQuery>,
    rankings: Option<MockSalesRankingQuery>,
}

impl StateBuilder {
    /// Use `mock` for the `registration` port.
    pub fn registration(mut self, mock: MockRegistrationService) -> Self {
        self.registration = Some(mock);
        self
    }

    /// Use `mock` for the `login` port.
    pub fn login(mut self, mock: MockLoginService) -> Self {
        self.login = Some(mock);
        self
    }

    /// Use `mock` for the `tokens` port.
    pub fn tokens(mut self, mock: MockSessionTokens) -> Self {
        self.tokens = Some(mock);
        self
    }

    /// Accept [`TEST_TOKEN`] as `actor` and reject every other token.
    pub fn with_actor(self, actor: AuthenticatedUser) -> Self {
        let mut tokens = MockSessionTokens::new();
        tokens.expect_decode().returning(move |token| {
            if token == TEST_TOKEN {
                Ok(actor.clone())
            } else {
                Err(crate::domain::ports::SessionTokenError::invalid("unknown token"))
            }
        });
        self.tokens(tokens)
    }

    /// Use `mock` for the `clients` port.
    pub fn clients(mut self, mock: MockClientCommand) -> Self {
        self.clients = Some(mock);
        self
    }

    /// Use `mock` for the `clients_query` port.
    pub fn clients_query(mut self, mock: MockClientQuery) -> Self {
        self.clients_query = Some(mock);
        self
    }

    /// Use `mock` for the `products` port.
    pub fn products(mut self, mock: MockProductCommand) -> Self {
        self.products = Some(mock);
        self
    }

    /// Use `mock` for the `products_query` port.
    pub fn products_query(mut self, mock: MockProductQuery) -> Self {
        self.products_query = Some(mock);
        self
    }

    /// Use `mock` for the `orders` port.
    pub fn orders(mut self, mock: MockOrderCommand) -> Self {
        self.orders = Some(mock);
        self
    }

    /// Use `mock` for the `orders_query` port.
    pub fn orders_query(mut self, mock: MockOrderQuery) -> Self {
        self.orders_query = Some(mock);
        self
    }

    /// Use `mock` for the `rankings` port.
    pub fn rankings(mut self, mock: MockSalesRankingQuery) -> Self {
        self.rankings = Some(mock);
        self
    }

    /// Assemble the state, defaulting every unset port to an empty mock.
    pub fn build(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            registration: Arc::new(self.registration.unwrap_or_default()),
            login: Arc::new(self.login.unwrap_or_default()),
            tokens: Arc::new(self.tokens.unwrap_or_default()),
            clients: Arc::new(self.clients.unwrap_or_default()),
            clients_query: Arc::new(self.clients_query.unwrap_or_default()),
            products: Arc::new(self.products.unwrap_or_default()),
            products_query: Arc::new(self.products_query.unwrap_or_default()),
            orders: Arc::new(self.orders.unwrap_or_default()),
            orders_query: Arc::new(self.orders_query.unwrap_or_default()),
            rankings: Arc::new(self.rankings.unwrap_or_default()),
        })
    }
}

/// In-memory sink for log lines emitted while a test runs.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<std::sync::Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's events into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut captured) = self.0.lock() {
            captured.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
