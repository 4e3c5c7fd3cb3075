//! Shared request parsing helpers for inbound HTTP adapters.

use std::str::FromStr;

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, FieldError, OrderStatus, RankingLimit};

/// Parse an identifier taken from the path or the body.
///
/// Malformed values surface as `400` with `{field, code: "invalid_id",
/// value}` details so callers can tell a bad id from a missing record.
pub(crate) fn parse_id<T>(field: &'static str, value: &str) -> Result<T, Error>
where
    T: FromStr,
{
    value.trim().parse::<T>().map_err(|_| {
        let err = FieldError::InvalidId { field };
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "code": err.reason(),
            "value": value,
        }))
    })
}

/// Parse the `{estado}` path segment of `obtenerPedidosEstado`.
pub(crate) fn parse_status(value: &str) -> Result<OrderStatus, Error> {
    value.parse::<OrderStatus>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "estado",
            "code": "invalid_status",
            "value": value,
        }))
    })
}

/// Resolve the optional `limite` query parameter of the ranking reports.
pub(crate) fn parse_limit(value: Option<i64>) -> Result<RankingLimit, Error> {
    Ok(RankingLimit::try_from_query(value)?)
}

/// JSON body extractor settings: malformed bodies render as domain errors.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "invalid_body" }))
            .into()
    })
}

/// Query string extractor settings matching [`json_config`].
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "invalid_query" }))
            .into()
    })
}
