//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data<HttpState>` and only see the
//! driving ports, so they can be exercised against mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClientCommand, ClientQuery, LoginService, OrderCommand, OrderQuery, ProductCommand,
    ProductQuery, RegistrationService, SalesRankingQuery, SessionTokens,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Seller sign-up.
    pub registration: Arc<dyn RegistrationService>,
    /// Credential exchange for session tokens.
    pub login: Arc<dyn LoginService>,
    /// Decodes bearer tokens into the request actor.
    pub tokens: Arc<dyn SessionTokens>,
    /// Client mutations.
    pub clients: Arc<dyn ClientCommand>,
    /// Client reads.
    pub clients_query: Arc<dyn ClientQuery>,
    /// Catalogue mutations.
    pub products: Arc<dyn ProductCommand>,
    /// Catalogue reads and search.
    pub products_query: Arc<dyn ProductQuery>,
    /// Order placement and edits.
    pub orders: Arc<dyn OrderCommand>,
    /// Order reads.
    pub orders_query: Arc<dyn OrderQuery>,
    /// Top client and seller rankings.
    pub rankings: Arc<dyn SalesRankingQuery>,
}
