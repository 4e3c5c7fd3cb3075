//! Driving port for `nuevoUsuario`.

use async_trait::async_trait;

use crate::domain::{Error, User, UserRegistration};

/// Message returned when the email already belongs to an account.
pub const DUPLICATE_USER_MESSAGE: &str = "El usuario ya esta registrado";

/// Driving port for `nuevoUsuario`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Hash the password and store a new account.
    async fn register(&self, registration: UserRegistration) -> Result<User, Error>;
}
