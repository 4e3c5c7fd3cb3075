//! Domain-level error type.
//!
//! Transport agnostic: services raise [`DomainError`] and the inbound adapters map
//! the [`ErrorCode`] onto a status code and JSON envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The operation needs an authenticated seller and none was supplied.
    Unauthorized,
    /// Login failed: unknown email or wrong password.
    InvalidCredentials,
    /// Authenticated but not the owner of the resource.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with stored state (duplicate email).
    Conflict,
    /// An order line asks for more units than are in stock.
    InsufficientStock,
    /// A backing store is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Validation errors emitted by [`DomainError::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
///
/// # Examples
/// ```
/// use crm_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Producto no encontrado");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "Producto no encontrado");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct DomainError {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "Producto no encontrado")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error, falling back to a generic message when `message`
    /// is blank.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(error) => error,
            Err(ErrorValidationError::EmptyMessage) => Self::build(code, "Error".to_owned()),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let text = message.into();
        if text.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::build(code, text))
    }

    fn build(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation id captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Stock shortfall for the named product.
    ///
    /// ```
    /// use crm_backend::domain::{Error, ErrorCode};
    ///
    /// let err = Error::insufficient_stock("Teclado");
    /// assert_eq!(err.code(), ErrorCode::InsufficientStock);
    /// assert_eq!(err.message(), "El articulo: Teclado excede la cantidad disponible");
    /// ```
    #[must_use]
    pub fn insufficient_stock(product_name: &str) -> Self {
        Self::new(
            ErrorCode::InsufficientStock,
            format!("El articulo: {product_name} excede la cantidad disponible"),
        )
        .with_details(json!({ "producto": product_name }))
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for ErrorDto {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for DomainError {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
        } = value;
        let mut error = Self::try_new(code, message)?;
        // A decoded payload carries its own trace id, never the ambient one.
        error.trace_id = trace_id;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(DomainError::unauthorized("login"), ErrorCode::Unauthorized)]
    #[case(DomainError::invalid_credentials("nope"), ErrorCode::InvalidCredentials)]
    #[case(DomainError::forbidden("mine"), ErrorCode::Forbidden)]
    #[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
    #[case(DomainError::conflict("dup"), ErrorCode::Conflict)]
    #[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
    #[case(DomainError::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[rstest]
    fn try_new_rejects_blank_messages() {
        let result = DomainError::try_new(ErrorCode::NotFound, "   ");
        assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
    }

    #[rstest]
    fn insufficient_stock_names_product_in_details() {
        let err = DomainError::insufficient_stock("Monitor");
        assert_eq!(err.details(), Some(&json!({ "producto": "Monitor" })));
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { DomainError::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[rstest]
    fn serialises_camel_case_without_empty_fields() {
        let value = serde_json::to_value(DomainError::forbidden("No tienes las credenciales"))
            .expect("serialise error");
        assert_eq!(
            value,
            json!({ "code": "forbidden", "message": "No tienes las credenciales" })
        );
    }

    #[rstest]
    fn deserialising_rejects_blank_message() {
        let result = serde_json::from_value::<DomainError>(json!({ "code": "not_found", "message": " " }));
        assert!(result.is_err());
    }
}
