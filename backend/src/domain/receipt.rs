//! Confirmation returned by delete operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured confirmation of a deletion: the removed id and the message
/// shown to the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletionReceipt {
    /// Identifier of the removed record.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Confirmation message.
    #[schema(example = "Producto eliminado")]
    pub mensaje: String,
}

impl DeletionReceipt {
    /// Receipt for the record `id`.
    #[must_use]
    pub fn new(id: impl ToString, mensaje: &str) -> Self {
        Self {
            id: id.to_string(),
            mensaje: mensaje.to_owned(),
        }
    }
}
