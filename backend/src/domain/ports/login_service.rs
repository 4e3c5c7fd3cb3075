//! Driving port for `autenticarUsuario`.
//!
//! Inbound adapters call it to exchange credentials for a session token
//! without importing the account store or the token signer.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SessionToken};

/// Message for an unknown email.
pub const UNKNOWN_USER_MESSAGE: &str = "El usuario no existe";
/// Message for a wrong password.
pub const WRONG_PASSWORD_MESSAGE: &str = "El password es incorrecto";

/// Driving port for `autenticarUsuario`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a signed token for the account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<SessionToken, Error>;
}
