//! Shared helpers for the end-to-end API tests.
//!
//! Each test builds the real application over a fresh in-memory store with
//! the production credential adapters, then drives it through
//! `actix_web::test`.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{test, web};
use chrono::Duration;
use crm_backend::app::{Credentials, Repositories, build_http_state};
use crm_backend::inbound::http::health::HealthState;
use crm_backend::inbound::http::state::HttpState;
use crm_backend::outbound::memory::MemoryStore;
use crm_backend::outbound::security::{Argon2PasswordHasher, JwtSessionTokens};
use mockable::DefaultClock;
use serde_json::{Value, json};

pub const TOKEN_SECRET: &[u8] = b"integration-test-secret";
pub const PASSWORD: &str = "secreto123";

/// Fresh health and handler state over an empty in-memory store.
pub fn app_state() -> (web::Data<HealthState>, web::Data<HttpState>) {
    let clock = Arc::new(DefaultClock);
    let credentials = Credentials {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtSessionTokens::new(
            TOKEN_SECRET,
            Duration::hours(1),
            clock.clone(),
        )),
        clock,
    };
    let state = build_http_state(
        Repositories::shared(Arc::new(MemoryStore::new())),
        credentials,
    );
    (web::Data::new(HealthState::new()), web::Data::new(state))
}

pub fn register_request(nombre: &str, email: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/usuarios").set_json(json!({
        "nombre": nombre,
        "apellido": "Prueba",
        "email": email,
        "password": PASSWORD,
    }))
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/usuarios/autenticar")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn authed(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

pub fn new_client_request(email: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/clientes").set_json(json!({
        "nombre": "Luis",
        "apellido": "Pérez",
        "empresa": "Ferretería Pérez",
        "email": email,
    }))
}

pub fn new_product_request(nombre: &str, precio: f64, existencia: i64) -> test::TestRequest {
    test::TestRequest::post().uri("/api/v1/productos").set_json(json!({
        "nombre": nombre,
        "precio": precio,
        "existencia": existencia,
    }))
}

pub fn new_order_request(cliente: &str, lines: &[(&str, i64)]) -> test::TestRequest {
    let pedido: Vec<Value> = lines
        .iter()
        .map(|(id, cantidad)| json!({ "id": id, "cantidad": cantidad }))
        .collect();
    test::TestRequest::post()
        .uri("/api/v1/pedidos")
        .set_json(json!({ "cliente": cliente, "pedido": pedido }))
}

/// String field of a JSON body.
pub fn text(body: &Value, field: &str) -> String {
    body.get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {field} in {body}"))
        .to_owned()
}

/// Build the application under test.
#[macro_export]
macro_rules! spawn_app {
    () => {{
        let (health, state) = $crate::crm_support::app_state();
        actix_web::test::init_service(crm_backend::app::build_app(health, state)).await
    }};
}

/// Send a request and return the status with the decoded JSON body.
#[macro_export]
macro_rules! send {
    ($app:expr, $request:expr) => {{
        let response = actix_web::test::call_service($app, $request.to_request()).await;
        let status = response.status();
        let body: serde_json::Value = actix_web::test::read_body_json(response).await;
        (status, body)
    }};
}

/// Register a seller and return `(user id, session token)`.
#[macro_export]
macro_rules! signup {
    ($app:expr, $nombre:expr, $email:expr) => {{
        let (status, user) = $crate::send!($app, $crate::crm_support::register_request($nombre, $email));
        assert_eq!(status, actix_web::http::StatusCode::CREATED, "{user}");
        let (status, token) = $crate::send!(
            $app,
            $crate::crm_support::login_request($email, $crate::crm_support::PASSWORD)
        );
        assert_eq!(status, actix_web::http::StatusCode::OK, "{token}");
        (
            $crate::crm_support::text(&user, "id"),
            $crate::crm_support::text(&token, "token"),
        )
    }};
}
