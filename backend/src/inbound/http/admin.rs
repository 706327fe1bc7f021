//! Admin session handlers.
//!
//! ```text
//! POST /api/admin/login {"username":"admin","password":"..."}
//! POST /api/admin/logout
//! GET  /api/admin/check
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::games::SuccessResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
}

/// Session status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Verify credentials and start an admin session.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "login",
    security([])
)]
#[post("/admin/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let admin = state.login.authenticate(&credentials).await?;
    session.persist_admin(&admin)?;
    info!(admin_id = %admin.id(), "admin signed in");
    Ok(web::Json(LoginResponse {
        success: true,
        username: admin.username().to_owned(),
    }))
}

/// End the admin session. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses((status = 200, description = "Session cleared", body = SuccessResponse)),
    tags = ["admin"],
    operation_id = "logout",
    security([])
)]
#[post("/admin/logout")]
pub async fn logout(session: SessionContext) -> web::Json<SuccessResponse> {
    session.purge();
    SuccessResponse::ok()
}

/// Report whether the caller holds an admin session.
#[utoipa::path(
    get,
    path = "/api/admin/check",
    responses(
        (status = 200, description = "Session status", body = SessionStatus),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "checkSession",
    security([])
)]
#[get("/admin/check")]
pub async fn check(session: SessionContext) -> ApiResult<web::Json<SessionStatus>> {
    let status = match session.admin()? {
        Some(admin) => SessionStatus {
            authenticated: true,
            username: Some(admin.username().to_owned()),
        },
        None => SessionStatus {
            authenticated: false,
            username: None,
        },
    };
    Ok(web::Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::{AdminId, AdminIdentity};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_app};

    fn accepting_login() -> MockPorts {
        let mut ports = MockPorts::new();
        ports
            .login
            .expect_authenticate()
            .withf(|creds| creds.username() == "admin" && creds.password() == "admin123")
            .returning(|creds| Ok(AdminIdentity::new(AdminId::new(1), creds.username())));
        ports
    }

    fn login_request(username: &str, password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "username": username, "password": password }))
    }

    #[actix_web::test]
    async fn login_then_check_then_logout() {
        let app = test::init_service(test_app(accepting_login().into_state())).await;

        let res = test::call_service(&app, login_request(" admin ", "admin123").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": true, "username": "admin" }));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/check")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "authenticated": true, "username": "admin" }));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/admin/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = session_cookie(&res);
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn check_without_session_is_unauthenticated() {
        let app = test::init_service(test_app(MockPorts::new().into_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/admin/check").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[actix_web::test]
    async fn rejected_credentials_are_unauthorised() {
        let mut ports = MockPorts::new();
        ports
            .login
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = test::init_service(test_app(ports.into_state())).await;

        let res = test::call_service(&app, login_request("admin", "wrong").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != "session"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid credentials");
    }

    #[rstest]
    #[case("   ", "admin123", "username")]
    #[case("admin", "", "password")]
    #[actix_web::test]
    async fn blank_credentials_are_bad_requests(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let app = test::init_service(test_app(MockPorts::new().into_state())).await;

        let res = test::call_service(&app, login_request(username, password).to_request()).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], "missing_field");
    }
}
