//! Domain primitives, ports and services.
//!
//! Purpose: define the CRM entities (sellers, clients, products, orders), the
//! ownership guard and the order placement rules independently of HTTP and
//! storage. Inbound adapters talk to the driving ports in [`ports`]; outbound
//! adapters implement its driven ports.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`): API error payload.
//! - ErrorCode: stable error identifier.
//! - User, Client, Product, Order and their validated inputs.
//! - OwnershipGuard: seller ownership checks.
//! - The services implementing the driving ports.

pub mod authorization;
pub mod client;
pub mod error;
pub mod ids;
pub mod order;
pub mod ports;
pub mod product;
pub mod ranking;
pub mod receipt;
pub(crate) mod service_support;
pub mod trace_id;
pub mod user;
pub mod validation;

mod auth;
mod client_service;
mod order_service;
mod product_service;
mod report_service;
mod user_service;

pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError, SessionToken};
pub use self::authorization::{FORBIDDEN_MESSAGE, Owned, OwnershipGuard};
pub use self::client::{Client, ClientPatch, NewClient};
pub use self::client_service::{CLIENT_DELETED_MESSAGE, ClientService};
pub use self::error::{DomainError as Error, ErrorCode, ErrorValidationError};
pub use self::ids::{ClientId, IdValidationError, OrderId, ProductId, UserId};
pub use self::order::{
    LineItem, Order, OrderLine, OrderLineRequest, OrderPatch, OrderPlacement, OrderStatus,
    ReservationError, SellerOrder, UnknownOrderStatus, finalize, order_total, price_lines,
    release_lines, reserve_lines, validate_lines,
};
pub use self::order_service::{ORDER_DELETED_MESSAGE, OrderService};
pub use self::product::{NewProduct, Product, ProductPatch};
pub use self::product_service::{PRODUCT_DELETED_MESSAGE, ProductService};
pub use self::ranking::{
    ClientRanking, DEFAULT_RANKING_LIMIT, MAX_RANKING_LIMIT, RankingLimit, RevenueGroup,
    SellerRanking, rank_by_revenue,
};
pub use self::receipt::DeletionReceipt;
pub use self::report_service::SalesRankingService;
pub use self::service_support::{DUPLICATE_CLIENT_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserAccount, UserRegistration};
pub use self::user_service::UserAccountService;
pub use self::validation::{Email, FieldError, PASSWORD_MIN_LEN};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use crm_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("No tienes las credenciales"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
