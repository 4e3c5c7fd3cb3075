//! Authentication primitives: login credentials and the request actor.
//!
//! Inbound adapters build these from raw payloads and bearer tokens before
//! talking to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Email, User, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "El email es obligatorio"),
            Self::EmptyPassword => write!(f, "El password es obligatorio"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials (`autenticarUsuario`).
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. It is not checked for
///   shape; an unknown address simply fails to authenticate.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use crm_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ana@Example.com", "secreto").unwrap();
/// assert_eq!(creds.email(), "ana@example.com");
/// assert_eq!(creds.password(), "secreto");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalised.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity carried by a session token and attached to each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Seller id.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Login address.
    #[schema(value_type = String, example = "ana@example.com")]
    pub email: Email,
    /// Given name.
    #[schema(example = "Ana")]
    pub nombre: String,
    /// Family name.
    #[schema(example = "García")]
    pub apellido: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            apellido: user.apellido.clone(),
        }
    }
}

/// Signed session token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionToken {
    /// Signed bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.e30.c2ln")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ana@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ANA@example.com  ", " secreto ")]
    #[case("luis@example.com", "correct horse battery staple")]
    fn valid_credentials_normalise_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim().to_lowercase());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn authenticated_user_mirrors_public_fields() {
        let user = User {
            id: UserId::random(),
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: Email::parse("email", "ana@example.com").expect("email"),
            creado: Utc::now(),
        };
        let actor = AuthenticatedUser::from(&user);
        assert_eq!(actor.id, user.id);
        assert_eq!(actor.email, user.email);
        assert_eq!(actor.nombre, "Ana");
    }
}
