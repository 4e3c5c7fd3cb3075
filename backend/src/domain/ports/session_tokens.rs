//! Port for signed session tokens.

use crate::domain::{AuthenticatedUser, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum SessionTokenError {
        /// Signing the claims failed.
        Signing { message: String } => "session token signing failed: {message}",
        /// Token was malformed, tampered with or expired.
        Invalid { message: String } => "session token rejected: {message}",
    }
}

/// Issues and decodes the tokens that carry the request actor.
#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Sign a token for `user`.
    fn issue(&self, user: &AuthenticatedUser) -> Result<SessionToken, SessionTokenError>;

    /// Verify a token and return the identity it carries.
    fn decode(&self, token: &str) -> Result<AuthenticatedUser, SessionTokenError>;
}
