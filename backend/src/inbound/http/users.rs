//! Account handlers: registration, login and the current actor.
//!
//! ```text
//! POST /api/v1/usuarios            {"nombre":"Ana","apellido":"García","email":"ana@example.com","password":"secreto"}
//! POST /api/v1/usuarios/autenticar {"email":"ana@example.com","password":"secreto"}
//! GET  /api/v1/usuarios/actual
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroize;

use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, LoginValidationError, SessionToken, User,
    UserRegistration,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Actor;
use crate::inbound::http::state::HttpState;

/// Body of `nuevoUsuario`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewUserRequest {
    /// First name.
    #[schema(example = "Ana")]
    pub nombre: String,
    /// Surname.
    #[schema(example = "García")]
    pub apellido: String,
    /// Login email, unique across accounts.
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Plaintext password; hashed before storage.
    #[schema(example = "secreto")]
    pub password: String,
}

/// Body of `autenticarUsuario`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Plaintext password.
    #[schema(example = "secreto")]
    pub password: String,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a seller account (`nuevoUsuario`). The response never includes
/// the password hash.
#[utoipa::path(
    post,
    path = "/api/v1/usuarios",
    request_body = NewUserRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "nuevoUsuario",
    security([])
)]
#[post("/usuarios")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<NewUserRequest>,
) -> ApiResult<HttpResponse> {
    let mut body = payload.into_inner();
    let registration = UserRegistration::try_from_parts(
        &body.nombre,
        &body.apellido,
        &body.email,
        &body.password,
    );
    body.password.zeroize();
    let user = state.registration.register(registration?).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a session token (`autenticarUsuario`).
#[utoipa::path(
    post,
    path = "/api/v1/usuarios/autenticar",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed session token", body = SessionToken),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown email or wrong password", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "autenticarUsuario",
    security([])
)]
#[post("/usuarios/autenticar")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionToken>> {
    let mut body = payload.into_inner();
    let parsed = LoginCredentials::try_from_parts(&body.email, &body.password);
    body.password.zeroize();
    let credentials = parsed.map_err(|err| map_login_validation_error(&err))?;
    let token = state.login.authenticate(&credentials).await?;
    Ok(web::Json(token))
}

/// Identity decoded from the request token, or `null` (`obtenerUsuario`).
#[utoipa::path(
    get,
    path = "/api/v1/usuarios/actual",
    responses(
        (status = 200, description = "Current actor or null", body = Option<AuthenticatedUser>)
    ),
    tags = ["usuarios"],
    operation_id = "obtenerUsuario"
)]
#[get("/usuarios/actual")]
pub async fn current_user(actor: Actor) -> web::Json<Option<AuthenticatedUser>> {
    web::Json(actor.into_user())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockRegistrationService, MockSessionTokens};
    use crate::domain::{Email, ErrorCode, UserId};
    use crate::inbound::http::test_utils::{StateBuilder, bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn ana() -> User {
        User {
            id: UserId::random(),
            nombre: "Ana".into(),
            apellido: "García".into(),
            email: Email::parse("email", "ana@example.com").expect("email"),
            creado: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn register_returns_created_user_without_password() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .withf(|reg: &UserRegistration| reg.email().as_ref() == "ana@example.com")
            .return_once(|_| Ok(ana()));
        let state = StateBuilder::default().registration(registration).build();
        let app = test::init_service(App::new().app_data(state).service(register)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios")
                .set_json(json!({
                    "nombre": "Ana",
                    "apellido": "García",
                    "email": "Ana@Example.com",
                    "password": "secreto"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["email"], "ana@example.com");
        assert!(body.get("password").is_none());
    }

    #[rstest]
    #[case(json!({"nombre": "Ana", "apellido": "García", "email": "ana@example.com", "password": "123"}))]
    #[case(json!({"nombre": " ", "apellido": "García", "email": "ana@example.com", "password": "secreto"}))]
    #[case(json!({"nombre": "Ana", "apellido": "García", "email": "ana.example.com", "password": "secreto"}))]
    #[actix_web::test]
    async fn register_rejects_invalid_fields(#[case] body: Value) {
        let mut registration = MockRegistrationService::new();
        registration.expect_register().times(0);
        let state = StateBuilder::default().registration(registration).build();
        let app = test::init_service(App::new().app_data(state).service(register)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios")
                .set_json(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn login_returns_token() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .withf(|creds: &LoginCredentials| creds.email() == "ana@example.com")
            .return_once(|_| {
                Ok(SessionToken {
                    token: "signed".into(),
                })
            });
        let state = StateBuilder::default().login(login_service).build();
        let app = test::init_service(App::new().app_data(state).service(login)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios/autenticar")
                .set_json(json!({"email": "ana@example.com", "password": "secreto"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: SessionToken = test::read_body_json(res).await;
        assert_eq!(body.token, "signed");
    }

    #[actix_web::test]
    async fn login_with_blank_password_is_bad_request() {
        let state = StateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(login)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/usuarios/autenticar")
                .set_json(json!({"email": "ana@example.com", "password": ""}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::InvalidRequest);
        assert_eq!(body.details(), Some(&json!({"field": "password", "code": "empty_password"})));
    }

    #[actix_web::test]
    async fn current_user_is_null_without_token() {
        let state = StateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(current_user)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/usuarios/actual").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert!(body.is_null());
    }

    #[actix_web::test]
    async fn current_user_is_null_for_rejected_token() {
        let mut tokens = MockSessionTokens::new();
        tokens
            .expect_decode()
            .return_once(|_| Err(crate::domain::ports::SessionTokenError::invalid("expired")));
        let state = StateBuilder::default().tokens(tokens).build();
        let app = test::init_service(App::new().app_data(state).service(current_user)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/usuarios/actual")
                .insert_header(bearer("stale"))
                .to_request(),
        )
        .await;

        let body: Value = test::read_body_json(res).await;
        assert!(body.is_null());
    }

    #[actix_web::test]
    async fn current_user_echoes_decoded_identity() {
        let user = ana();
        let actor = AuthenticatedUser::from(&user);
        let expected = actor.clone();
        let mut tokens = MockSessionTokens::new();
        tokens
            .expect_decode()
            .withf(|token| token == "good")
            .return_once(move |_| Ok(actor));
        let state = StateBuilder::default().tokens(tokens).build();
        let app = test::init_service(App::new().app_data(state).service(current_user)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/usuarios/actual")
                .insert_header(bearer("good"))
                .to_request(),
        )
        .await;

        let body: Option<AuthenticatedUser> = test::read_body_json(res).await;
        assert_eq!(body, Some(expected));
    }
}
