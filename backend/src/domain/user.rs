//! Seller accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::validation::{FieldError, PASSWORD_MIN_LEN, required_text};
use super::{Email, UserId};

/// Registered seller as exposed by the API.
///
/// The password hash is deliberately absent; see [`UserAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Given name.
    #[schema(example = "Ana")]
    pub nombre: String,
    /// Family name.
    #[schema(example = "García")]
    pub apellido: String,
    /// Login address, stored lower-cased.
    #[schema(value_type = String, example = "ana@example.com")]
    pub email: Email,
    /// Registration time.
    pub creado: DateTime<Utc>,
}

/// Stored account: the public user plus its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public part of the account.
    pub user: User,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Validated registration input (`nuevoUsuario`).
///
/// ## Invariants
/// - `nombre` and `apellido` are trimmed and non-empty.
/// - `password` has at least [`PASSWORD_MIN_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    nombre: String,
    apellido: String,
    email: Email,
    password: Zeroizing<String>,
}

impl UserRegistration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use crm_backend::domain::UserRegistration;
    ///
    /// let reg = UserRegistration::try_from_parts("Ana", "García", "ana@example.com", "secreto")
    ///     .unwrap();
    /// assert_eq!(reg.email().as_ref(), "ana@example.com");
    /// assert!(UserRegistration::try_from_parts("Ana", "García", "ana@example.com", "123").is_err());
    /// ```
    pub fn try_from_parts(
        nombre: &str,
        apellido: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, FieldError> {
        let given = required_text("nombre", nombre)?;
        let family = required_text("apellido", apellido)?;
        let address = Email::parse("email", email)?;
        if password.is_empty() {
            return Err(FieldError::Required { field: "password" });
        }
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(FieldError::PasswordTooShort {
                field: "password",
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self {
            nombre: given,
            apellido: family,
            email: address,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Given name.
    #[must_use]
    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    /// Family name.
    #[must_use]
    pub fn apellido(&self) -> &str {
        &self.apellido
    }

    /// Normalised email.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password, only held until it is hashed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Build the account to persist once the password has been hashed.
    #[must_use]
    pub fn into_account(self, id: UserId, password_hash: String, creado: DateTime<Utc>) -> UserAccount {
        UserAccount {
            user: User {
                id,
                nombre: self.nombre,
                apellido: self.apellido,
                email: self.email,
                creado,
            },
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" ", "García", "ana@example.com", "secreto", FieldError::Required { field: "nombre" })]
    #[case("Ana", "", "ana@example.com", "secreto", FieldError::Required { field: "apellido" })]
    #[case("Ana", "García", "ana", "secreto", FieldError::InvalidEmail { field: "email" })]
    #[case("Ana", "García", "ana@example.com", "", FieldError::Required { field: "password" })]
    #[case(
        "Ana",
        "García",
        "ana@example.com",
        "12345",
        FieldError::PasswordTooShort { field: "password", min: PASSWORD_MIN_LEN }
    )]
    fn registration_rejects_invalid_fields(
        #[case] nombre: &str,
        #[case] apellido: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: FieldError,
    ) {
        let err = UserRegistration::try_from_parts(nombre, apellido, email, password)
            .expect_err("invalid registration");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn into_account_keeps_hash_out_of_public_user() {
        let registration =
            UserRegistration::try_from_parts(" Ana ", "García", "ANA@example.com", "secreto")
                .expect("valid registration");
        let account = registration.into_account(UserId::random(), "$argon2id$hash".to_owned(), Utc::now());

        assert_eq!(account.user.nombre, "Ana");
        assert_eq!(account.user.email.as_ref(), "ana@example.com");
        let json = serde_json::to_value(&account.user).expect("serialise user");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
