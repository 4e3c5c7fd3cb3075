//! Client records owned by a seller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{FieldError, optional_text, required_text};
use super::{ClientId, Email, UserId};

/// Client as stored and returned by the API.
///
/// `vendedor` is fixed at creation; [`Client::apply`] never touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Record identifier.
    #[schema(value_type = String)]
    pub id: ClientId,
    /// Given name.
    #[schema(example = "Luis")]
    pub nombre: String,
    /// Family name.
    #[schema(example = "Pérez")]
    pub apellido: String,
    /// Company the client works for.
    #[schema(example = "Ferretería Pérez")]
    pub empresa: String,
    /// Unique contact address.
    #[schema(value_type = String, example = "luis@ferreteria.example")]
    pub email: Email,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    /// Owning seller.
    #[schema(value_type = String)]
    pub vendedor: UserId,
    /// Creation time.
    pub creado: DateTime<Utc>,
}

impl Client {
    /// Merge a validated patch into this record.
    pub fn apply(&mut self, patch: ClientPatch) {
        let ClientPatch {
            nombre,
            apellido,
            empresa,
            email,
            telefono,
        } = patch;
        if let Some(value) = nombre {
            self.nombre = value;
        }
        if let Some(value) = apellido {
            self.apellido = value;
        }
        if let Some(value) = empresa {
            self.empresa = value;
        }
        if let Some(value) = email {
            self.email = value;
        }
        if telefono.is_some() {
            self.telefono = telefono;
        }
    }
}

/// Validated input for `nuevoCliente`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Company.
    pub empresa: String,
    /// Contact address; must be unique.
    pub email: Email,
    /// Optional phone number.
    pub telefono: Option<String>,
}

impl NewClient {
    /// Validate raw client fields.
    pub fn try_from_parts(
        nombre: &str,
        apellido: &str,
        empresa: &str,
        email: &str,
        telefono: Option<&str>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            nombre: required_text("nombre", nombre)?,
            apellido: required_text("apellido", apellido)?,
            empresa: required_text("empresa", empresa)?,
            email: Email::parse("email", email)?,
            telefono: optional_text(telefono),
        })
    }

    /// Attach the owning seller and identity.
    #[must_use]
    pub fn into_client(self, id: ClientId, vendedor: UserId, creado: DateTime<Utc>) -> Client {
        Client {
            id,
            nombre: self.nombre,
            apellido: self.apellido,
            empresa: self.empresa,
            email: self.email,
            telefono: self.telefono,
            vendedor,
            creado,
        }
    }
}

/// Partial update for `actualizarCliente`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    /// New given name.
    pub nombre: Option<String>,
    /// New family name.
    pub apellido: Option<String>,
    /// New company.
    pub empresa: Option<String>,
    /// New contact address.
    pub email: Option<Email>,
    /// New phone number.
    pub telefono: Option<String>,
}

impl ClientPatch {
    /// Validate the fields that are present.
    pub fn try_from_parts(
        nombre: Option<&str>,
        apellido: Option<&str>,
        empresa: Option<&str>,
        email: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            nombre: nombre.map(|v| required_text("nombre", v)).transpose()?,
            apellido: apellido.map(|v| required_text("apellido", v)).transpose()?,
            empresa: empresa.map(|v| required_text("empresa", v)).transpose()?,
            email: email.map(|v| Email::parse("email", v)).transpose()?,
            telefono: optional_text(telefono),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn client() -> Client {
        NewClient::try_from_parts("Luis", "Pérez", "Ferretería", "luis@example.com", None)
            .expect("valid client")
            .into_client(ClientId::random(), UserId::random(), Utc::now())
    }

    #[rstest]
    #[case("", "Pérez", "Ferretería", "luis@example.com", "nombre")]
    #[case("Luis", " ", "Ferretería", "luis@example.com", "apellido")]
    #[case("Luis", "Pérez", "", "luis@example.com", "empresa")]
    #[case("Luis", "Pérez", "Ferretería", "luis", "email")]
    fn new_client_rejects_invalid_fields(
        #[case] nombre: &str,
        #[case] apellido: &str,
        #[case] empresa: &str,
        #[case] email: &str,
        #[case] field: &str,
    ) {
        let err = NewClient::try_from_parts(nombre, apellido, empresa, email, None)
            .expect_err("invalid client");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn apply_merges_present_fields_and_keeps_seller(client: Client) {
        let mut updated = client.clone();
        let patch =
            ClientPatch::try_from_parts(None, None, Some("Nueva SA"), None, Some(" 555-1234 "))
                .expect("valid patch");
        updated.apply(patch);

        assert_eq!(updated.empresa, "Nueva SA");
        assert_eq!(updated.telefono.as_deref(), Some("555-1234"));
        assert_eq!(updated.nombre, client.nombre);
        assert_eq!(updated.vendedor, client.vendedor);
    }

    #[rstest]
    fn patch_rejects_blank_required_field() {
        let err = ClientPatch::try_from_parts(Some("  "), None, None, None, None)
            .expect_err("blank nombre");
        assert_eq!(err, FieldError::Required { field: "nombre" });
    }
}
