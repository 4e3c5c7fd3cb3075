//! HS256 JSON Web Tokens carrying the seller identity.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokenError, SessionTokens};
use crate::domain::{AuthenticatedUser, Email, SessionToken, UserId};

/// Claims signed into every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Seller id.
    pub id: UserId,
    /// Seller email.
    pub email: Email,
    /// Seller first name.
    pub nombre: String,
    /// Seller surname.
    pub apellido: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            nombre: claims.nombre,
            apellido: claims.apellido,
        }
    }
}

/// [`SessionTokens`] signing HS256 tokens with a shared secret.
///
/// Expiry is checked against the system time on decode, with no leeway.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtSessionTokens {
    /// Build a signer from the raw secret and token lifetime.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user: &AuthenticatedUser) -> Result<SessionToken, SessionTokenError> {
        let issued = self.clock.utc();
        let claims = TokenClaims {
            id: user.id,
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            apellido: user.apellido.clone(),
            iat: issued.timestamp(),
            exp: issued
                .checked_add_signed(self.ttl)
                .ok_or_else(|| SessionTokenError::signing("token expiry is out of range"))?
                .timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(|token| SessionToken { token })
            .map_err(|err| SessionTokenError::signing(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<AuthenticatedUser, SessionTokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &Self::validation())
            .map_err(|err| SessionTokenError::invalid(err.to_string()))?;
        Ok(data.claims.into())
    }
}
