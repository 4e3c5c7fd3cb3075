//! Seller registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::task;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    DUPLICATE_USER_MESSAGE, LoginService, PasswordHasher, RegistrationService, SessionTokens,
    UNKNOWN_USER_MESSAGE, UserRepository, WRONG_PASSWORD_MESSAGE,
};
use crate::domain::service_support::map_user_error;
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, SessionToken, User, UserId, UserRegistration,
};

/// Account service implementing [`RegistrationService`] and [`LoginService`].
#[derive(Clone)]
pub struct UserAccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn SessionTokens>,
    clock: Arc<dyn Clock>,
}

impl<U> UserAccountService<U> {
    /// Create the service over its repository and credential adapters.
    #[must_use]
    pub const fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn SessionTokens>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    /// Hash `plain` on the blocking pool; Argon2 is CPU-bound.
    async fn hash_password(&self, plain: &str) -> Result<String, Error> {
        let hasher = Arc::clone(&self.hasher);
        let secret = Zeroizing::new(plain.to_owned());
        task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }

    /// Verify `plain` against `hash` on the blocking pool.
    async fn verify_password(&self, plain: &str, hash: &str) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let secret = Zeroizing::new(plain.to_owned());
        let stored = hash.to_owned();
        task::spawn_blocking(move || hasher.verify(&secret, &stored))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }
}

#[async_trait]
impl<U> RegistrationService for UserAccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: UserRegistration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email().as_ref())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            debug!(email = %registration.email(), "registration rejected: email taken");
            return Err(Error::conflict(DUPLICATE_USER_MESSAGE));
        }

        let password_hash = self.hash_password(registration.password()).await?;
        let account = registration.into_account(UserId::random(), password_hash, self.clock.utc());
        self.users.insert(&account).await.map_err(map_user_error)?;

        info!(user_id = %account.user.id, "seller registered");
        Ok(account.user)
    }
}

#[async_trait]
impl<U> LoginService for UserAccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credentials(UNKNOWN_USER_MESSAGE));
        };

        let verified = self
            .verify_password(credentials.password(), &account.password_hash)
            .await?;
        if !verified {
            debug!(user_id = %account.user.id, "login rejected: wrong password");
            return Err(Error::invalid_credentials(WRONG_PASSWORD_MESSAGE));
        }

        self.tokens
            .issue(&AuthenticatedUser::from(&account.user))
            .map_err(|err| Error::internal(err.to_string()))
    }
}
