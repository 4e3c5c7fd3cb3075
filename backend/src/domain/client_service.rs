//! Client use-cases, all scoped to the owning seller except the global list.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{ClientCommand, ClientQuery, ClientRepository};
use crate::domain::service_support::{DUPLICATE_CLIENT_MESSAGE, map_client_error};
use crate::domain::{
    Client, ClientId, ClientPatch, DeletionReceipt, Error, NewClient, Owned, OwnershipGuard,
    UserId,
};

/// Confirmation text for `eliminarCliente`.
pub const CLIENT_DELETED_MESSAGE: &str = "Cliente Eliminado";

/// Client service implementing [`ClientCommand`] and [`ClientQuery`].
#[derive(Clone)]
pub struct ClientService<C> {
    clients: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> ClientService<C> {
    /// Create the service over a client repository.
    #[must_use]
    pub const fn new(clients: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { clients, clock }
    }
}

impl<C> ClientService<C>
where
    C: ClientRepository,
{
    async fn owned_client(&self, actor: &UserId, id: &ClientId) -> Result<Client, Error> {
        let client = self.clients.find_by_id(id).await.map_err(map_client_error)?;
        OwnershipGuard::authorize(actor, client)
    }
}

#[async_trait]
impl<C> ClientCommand for ClientService<C>
where
    C: ClientRepository,
{
    async fn create(&self, actor: &UserId, input: NewClient) -> Result<Client, Error> {
        let taken = self
            .clients
            .find_by_email(&input.email)
            .await
            .map_err(map_client_error)?;
        if taken.is_some() {
            debug!(email = %input.email, "client rejected: email taken");
            return Err(Error::conflict(DUPLICATE_CLIENT_MESSAGE));
        }

        let client = input.into_client(ClientId::random(), *actor, self.clock.utc());
        self.clients.insert(&client).await.map_err(map_client_error)?;
        info!(client_id = %client.id, vendedor = %actor, "client created");
        Ok(client)
    }

    async fn update(
        &self,
        actor: &UserId,
        id: &ClientId,
        patch: ClientPatch,
    ) -> Result<Client, Error> {
        let mut client = self.owned_client(actor, id).await?;

        if let Some(email) = patch.email.as_ref().filter(|email| **email != client.email) {
            let taken = self
                .clients
                .find_by_email(email)
                .await
                .map_err(map_client_error)?;
            if taken.is_some_and(|other| other.id != client.id) {
                return Err(Error::conflict(DUPLICATE_CLIENT_MESSAGE));
            }
        }

        client.apply(patch);
        if !self.clients.update(&client).await.map_err(map_client_error)? {
            return Err(Error::not_found(Client::NOT_FOUND));
        }
        info!(client_id = %client.id, "client updated");
        Ok(client)
    }

    async fn delete(&self, actor: &UserId, id: &ClientId) -> Result<DeletionReceipt, Error> {
        self.owned_client(actor, id).await?;
        if !self.clients.delete(id).await.map_err(map_client_error)? {
            return Err(Error::not_found(Client::NOT_FOUND));
        }
        info!(client_id = %id, "client deleted");
        Ok(DeletionReceipt::new(id, CLIENT_DELETED_MESSAGE))
    }
}

#[async_trait]
impl<C> ClientQuery for ClientService<C>
where
    C: ClientRepository,
{
    async fn list_all(&self) -> Result<Vec<Client>, Error> {
        self.clients.list_all().await.map_err(map_client_error)
    }

    async fn list_for_seller(&self, actor: &UserId) -> Result<Vec<Client>, Error> {
        self.clients
            .list_by_seller(actor)
            .await
            .map_err(map_client_error)
    }

    async fn get(&self, actor: &UserId, id: &ClientId) -> Result<Client, Error> {
        self.owned_client(actor, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockClientRepository;
    use chrono::Utc;
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn seller() -> UserId {
        UserId::random()
    }

    fn client_of(owner: UserId, email: &str) -> Client {
        NewClient::try_from_parts("Luis", "Pérez", "ACME", email, None)
            .expect("valid client")
            .into_client(ClientId::random(), owner, Utc::now())
    }

    fn make_service(repo: MockClientRepository) -> ClientService<MockClientRepository> {
        ClientService::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn create_assigns_the_actor_as_seller(seller: UserId) {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_email().return_once(|_| Ok(None));
        repo.expect_insert()
            .withf(move |client: &Client| client.vendedor == seller)
            .times(1)
            .return_once(|_| Ok(()));

        let input = NewClient::try_from_parts("Luis", "Pérez", "ACME", "luis@example.com", None)
            .expect("valid client");
        let client = make_service(repo)
            .create(&seller, input)
            .await
            .expect("created");
        assert_eq!(client.vendedor, seller);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_duplicate_email(seller: UserId) {
        let existing = client_of(UserId::random(), "luis@example.com");
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_insert().times(0);

        let input = NewClient::try_from_parts("Otro", "Pérez", "ACME", "luis@example.com", None)
            .expect("valid client");
        let err = make_service(repo)
            .create(&seller, input)
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), DUPLICATE_CLIENT_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn get_forbids_other_sellers(seller: UserId) {
        let client = client_of(seller, "luis@example.com");
        let id = client.id;
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(client)));

        let err = make_service(repo)
            .get(&UserId::random(), &id)
            .await
            .expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn update_merges_patch_and_keeps_seller(seller: UserId) {
        let client = client_of(seller, "luis@example.com");
        let id = client.id;
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(client)));
        repo.expect_find_by_email().times(0);
        repo.expect_update()
            .withf(move |client: &Client| client.empresa == "Nueva SA" && client.vendedor == seller)
            .return_once(|_| Ok(true));

        let patch = ClientPatch::try_from_parts(None, None, Some("Nueva SA"), None, None)
            .expect("valid patch");
        let updated = make_service(repo)
            .update(&seller, &id, patch)
            .await
            .expect("updated");
        assert_eq!(updated.empresa, "Nueva SA");
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_email_of_another_client(seller: UserId) {
        let client = client_of(seller, "luis@example.com");
        let other = client_of(UserId::random(), "marta@example.com");
        let id = client.id;
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(client)));
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(other)));
        repo.expect_update().times(0);

        let patch = ClientPatch::try_from_parts(None, None, None, Some("marta@example.com"), None)
            .expect("valid patch");
        let err = make_service(repo)
            .update(&seller, &id, patch)
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_receipt(seller: UserId) {
        let client = client_of(seller, "luis@example.com");
        let id = client.id;
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().return_once(move |_| Ok(Some(client)));
        repo.expect_delete().return_once(|_| Ok(true));

        let receipt = make_service(repo)
            .delete(&seller, &id)
            .await
            .expect("deleted");
        assert_eq!(receipt, DeletionReceipt::new(id, CLIENT_DELETED_MESSAGE));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_missing_client_is_not_found(seller: UserId) {
        let mut repo = MockClientRepository::new();
        repo.expect_find_by_id().return_once(|_| Ok(None));
        repo.expect_delete().times(0);

        let err = make_service(repo)
            .delete(&seller, &ClientId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
