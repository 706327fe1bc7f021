//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler, the response schemas and the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::admin::{LoginRequest, LoginResponse, SessionStatus};
use crate::inbound::http::content::UpdateContentRequest;
use crate::inbound::http::games::{GameCreatedResponse, GameDto, GameFormSchema, SuccessResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Admin session cookie issued by POST /api/admin/login.",
            ))),
        );
    }
}

/// OpenAPI document for the catalog API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gamics catalog API",
        description = "Games, site content and admin sessions for the Gamics website."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::admin::login,
        crate::inbound::http::admin::logout,
        crate::inbound::http::admin::check,
        crate::inbound::http::games::list_games,
        crate::inbound::http::games::get_game,
        crate::inbound::http::games::create_game,
        crate::inbound::http::games::update_game,
        crate::inbound::http::games::delete_game,
        crate::inbound::http::content::get_content,
        crate::inbound::http::content::update_content,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        GameDto,
        GameFormSchema,
        GameCreatedResponse,
        SuccessResponse,
        LoginRequest,
        LoginResponse,
        SessionStatus,
        UpdateContentRequest,
    )),
    tags(
        (name = "games", description = "Catalog entries and their images"),
        (name = "content", description = "Editable site text"),
        (name = "admin", description = "Admin session management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
