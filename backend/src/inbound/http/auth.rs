//! Bearer-token authentication context.
//!
//! Every request may carry `Authorization: Bearer <token>`; a bare token is
//! accepted too. A missing, malformed or expired token never fails the
//! request by itself. It leaves the actor empty and handlers that need one
//! call [`Actor::require`].

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{AuthenticatedUser, Error, UserId};

use super::state::HttpState;

/// Message for operations attempted without a valid token.
pub const UNAUTHENTICATED_MESSAGE: &str = "No autenticado";

const BEARER_SCHEME: &str = "bearer";

/// Actor decoded from the request's token, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor(Option<AuthenticatedUser>);

impl Actor {
    /// Wrap the identity decoded from a token; `None` for anonymous requests.
    #[must_use]
    pub const fn new(user: Option<AuthenticatedUser>) -> Self {
        Self(user)
    }

    /// The decoded identity, when the token was valid.
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        self.0.as_ref()
    }

    /// The actor's id or `401 Unauthorized`.
    pub fn require(&self) -> Result<&UserId, Error> {
        self.0
            .as_ref()
            .map(|user| &user.id)
            .ok_or_else(|| Error::unauthorized(UNAUTHENTICATED_MESSAGE))
    }

    /// Give up the decoded identity.
    #[must_use]
    pub fn into_user(self) -> Option<AuthenticatedUser> {
        self.0
    }
}

/// Token text from an `Authorization` header value, with or without the
/// `Bearer` scheme.
fn token_from_header(raw: &str) -> Option<&str> {
    let value = raw.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
        _ if value.eq_ignore_ascii_case(BEARER_SCHEME) => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

fn actor_from_request(req: &HttpRequest) -> Result<Actor, Error> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(Actor::default());
    };
    let Some(token) = header.to_str().ok().and_then(token_from_header) else {
        debug!("ignoring unreadable authorization header");
        return Ok(Actor::default());
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    match state.tokens.decode(token) {
        Ok(user) => Ok(Actor::new(Some(user))),
        Err(error) => {
            debug!(%error, "request token rejected");
            Ok(Actor::default())
        }
    }
}

impl FromRequest for Actor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(actor_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer   abc.def.ghi ", Some("abc.def.ghi"))]
    #[case("abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Bearer ", None)]
    #[case("   ", None)]
    fn extracts_token_text(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(token_from_header(header), expected);
    }

    #[rstest]
    fn empty_actor_is_unauthorized() {
        let err = Actor::default().require().expect_err("no actor");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), UNAUTHENTICATED_MESSAGE);
    }
}
