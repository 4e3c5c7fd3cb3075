//! Ownership checks for seller-scoped records.
//!
//! Clients and orders belong to the seller recorded in `vendedor`. Every
//! single-record read, update or delete of either goes through
//! [`OwnershipGuard::authorize`].

use tracing::debug;

use super::{Client, Error, Order, UserId};

/// Message returned when the actor does not own the record.
pub const FORBIDDEN_MESSAGE: &str = "No tienes las credenciales";

/// A record scoped to one seller.
pub trait Owned {
    /// Message used when the record id does not resolve.
    const NOT_FOUND: &'static str;

    /// Seller that owns the record.
    fn owner(&self) -> UserId;
}

impl Owned for Client {
    const NOT_FOUND: &'static str = "Cliente no encontrado";

    fn owner(&self) -> UserId {
        self.vendedor
    }
}

impl Owned for Order {
    const NOT_FOUND: &'static str = "Pedido no encontrado";

    fn owner(&self) -> UserId {
        self.vendedor
    }
}

/// Decides whether an actor may touch a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipGuard;

impl OwnershipGuard {
    /// Return the record when `actor` owns it.
    ///
    /// Fails `NotFound` when `resource` is `None` and `Forbidden` when the
    /// record belongs to another seller.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use crm_backend::domain::{Client, ClientId, ErrorCode, NewClient, OwnershipGuard, UserId};
    ///
    /// let owner = UserId::random();
    /// let client = NewClient::try_from_parts("Luis", "Pérez", "ACME", "luis@example.com", None)
    ///     .unwrap()
    ///     .into_client(ClientId::random(), owner, Utc::now());
    ///
    /// assert!(OwnershipGuard::authorize(&owner, Some(client.clone())).is_ok());
    /// let err = OwnershipGuard::authorize(&UserId::random(), Some(client)).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn authorize<R: Owned>(actor: &UserId, resource: Option<R>) -> Result<R, Error> {
        let record = resource.ok_or_else(|| Error::not_found(R::NOT_FOUND))?;
        if record.owner() != *actor {
            debug!(%actor, owner = %record.owner(), "ownership check rejected");
            return Err(Error::forbidden(FORBIDDEN_MESSAGE));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, ErrorCode, NewClient, OrderId, OrderStatus};
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn seller_a() -> UserId {
        UserId::random()
    }

    fn client_of(owner: UserId) -> Client {
        NewClient::try_from_parts("Luis", "Pérez", "ACME", "luis@example.com", None)
            .expect("valid client")
            .into_client(ClientId::random(), owner, Utc::now())
    }

    fn order_of(owner: UserId) -> Order {
        Order {
            id: OrderId::random(),
            cliente: ClientId::random(),
            vendedor: owner,
            pedido: Vec::new(),
            total: Decimal::ZERO,
            estado: OrderStatus::Pendiente,
            creado: Utc::now(),
        }
    }

    #[rstest]
    fn owner_is_authorized(seller_a: UserId) {
        let client = client_of(seller_a);
        let authorized = OwnershipGuard::authorize(&seller_a, Some(client.clone()));
        assert_eq!(authorized, Ok(client));
    }

    #[rstest]
    fn other_seller_is_forbidden(seller_a: UserId) {
        let err = OwnershipGuard::authorize(&UserId::random(), Some(order_of(seller_a)))
            .expect_err("foreign order");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), FORBIDDEN_MESSAGE);
    }

    #[rstest]
    #[case::client(OwnershipGuard::authorize::<Client>(&UserId::random(), None).map(|_| ()), "Cliente no encontrado")]
    #[case::order(OwnershipGuard::authorize::<Order>(&UserId::random(), None).map(|_| ()), "Pedido no encontrado")]
    fn missing_record_is_not_found(#[case] result: Result<(), Error>, #[case] message: &str) {
        let err = result.expect_err("missing record");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), message);
    }
}
