//! Site content HTTP handlers.
//!
//! ```text
//! GET /api/content
//! PUT /api/content/{key} {"value":"..."}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::games::SuccessResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_content_key};

/// Request body for `PUT /api/content/{key}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateContentRequest {
    /// New text; may be empty but must be present.
    pub value: Option<String>,
}

/// All site text as a key to value map.
#[utoipa::path(
    get,
    path = "/api/content",
    responses(
        (status = 200, description = "Site content", body = BTreeMap<String, String>),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["content"],
    operation_id = "getContent",
    security([])
)]
#[get("/content")]
pub async fn get_content(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<BTreeMap<String, String>>> {
    let entries = state.content_query.all_content().await?;
    Ok(web::Json(
        entries
            .into_iter()
            .map(|entry| (entry.key.as_str().to_owned(), entry.value))
            .collect(),
    ))
}

/// Replace the value of an existing content key.
#[utoipa::path(
    put,
    path = "/api/content/{key}",
    params(("key" = String, Path, description = "Content key, e.g. hero_title")),
    request_body = UpdateContentRequest,
    responses(
        (status = 200, description = "Content updated", body = SuccessResponse),
        (status = 400, description = "Missing value", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown key", body = Error)
    ),
    tags = ["content"],
    operation_id = "updateContent",
    security(("SessionCookie" = []))
)]
#[put("/content/{key}")]
pub async fn update_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateContentRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    session.require_admin()?;
    let key = parse_content_key(&path.into_inner())?;
    let value = payload
        .into_inner()
        .value
        .ok_or_else(|| missing_field_error("value"))?;
    state.content.update_content(key, value).await?;
    Ok(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::{ContentKey, SiteContentEntry};
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie, sign_in_request, test_app,
    };

    fn entry(key: &str, value: &str) -> SiteContentEntry {
        SiteContentEntry::text(ContentKey::new(key).expect("valid key"), value)
    }

    #[actix_web::test]
    async fn content_is_a_public_map() {
        let mut ports = MockPorts::new();
        ports.content_query.expect_all_content().returning(|| {
            Ok(vec![
                entry("hero_title", "Create Manage Matches"),
                entry("countdown_days", "10"),
            ])
        });
        let app = test::init_service(test_app(ports.into_state())).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/content").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "hero_title": "Create Manage Matches", "countdown_days": "10" })
        );
    }

    #[actix_web::test]
    async fn update_forwards_key_and_value() {
        let mut ports = MockPorts::new();
        ports
            .content
            .expect_update_content()
            .withf(|key, value| key.as_str() == "hero_title" && value.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));
        let app = test::init_service(test_app(ports.into_state())).await;
        let cookie =
            session_cookie(&test::call_service(&app, sign_in_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/content/hero_title")
                .cookie(cookie)
                .set_json(json!({ "value": "" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "success": true }));
    }

    #[rstest]
    #[case(json!({}), StatusCode::BAD_REQUEST)]
    #[case(json!({ "value": null }), StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn update_requires_a_value(#[case] payload: Value, #[case] expected: StatusCode) {
        let app = test::init_service(test_app(MockPorts::new().into_state())).await;
        let cookie =
            session_cookie(&test::call_service(&app, sign_in_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/content/hero_title")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "value");
    }

    #[actix_web::test]
    async fn unknown_key_is_not_found() {
        let mut ports = MockPorts::new();
        ports
            .content
            .expect_update_content()
            .returning(|key, _| Err(Error::not_found(format!("content key {key} not found"))));
        let app = test::init_service(test_app(ports.into_state())).await;
        let cookie =
            session_cookie(&test::call_service(&app, sign_in_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/content/nope")
                .cookie(cookie)
                .set_json(json!({ "value": "x" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_requires_login() {
        let app = test::init_service(test_app(MockPorts::new().into_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/api/content/hero_title")
                .set_json(json!({ "value": "x" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
