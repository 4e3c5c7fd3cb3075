//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`SessionTokens`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`,
//! [`LoginService`], [`RegistrationService`]) are implemented by the domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod client_command;
mod client_query;
mod client_repository;
mod login_service;
mod order_command;
mod order_query;
mod order_repository;
mod password_hasher;
mod product_command;
mod product_query;
mod product_repository;
mod registration_service;
mod sales_ranking_query;
mod session_tokens;
mod user_repository;

pub use client_command::ClientCommand;
#[cfg(test)]
pub use client_command::MockClientCommand;
pub use client_query::ClientQuery;
#[cfg(test)]
pub use client_query::MockClientQuery;
#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientPersistenceError, ClientRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, UNKNOWN_USER_MESSAGE, WRONG_PASSWORD_MESSAGE};
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::OrderCommand;
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderPersistenceError, OrderRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use product_command::MockProductCommand;
pub use product_command::ProductCommand;
#[cfg(test)]
pub use product_query::MockProductQuery;
pub use product_query::ProductQuery;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductPersistenceError, ProductRepository};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::{DUPLICATE_USER_MESSAGE, RegistrationService};
#[cfg(test)]
pub use sales_ranking_query::MockSalesRankingQuery;
pub use sales_ranking_query::SalesRankingQuery;
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokenError, SessionTokens};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
