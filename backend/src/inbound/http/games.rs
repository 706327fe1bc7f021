//! Game catalog HTTP handlers.
//!
//! ```text
//! GET    /api/games
//! GET    /api/games/{id}
//! POST   /api/games        (multipart/form-data)
//! PUT    /api/games/{id}   (multipart/form-data)
//! DELETE /api/games/{id}
//! ```

use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Game};
use crate::inbound::http::ApiResult;
use crate::inbound::http::game_form::GameForm;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_game_id;

/// Game as returned to clients. Keys match the table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameDto {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub description: String,
    /// Stored image reference: `./assets/images/...` or `/uploads/...`.
    #[schema(example = "/uploads/1700000000000-123456789.png")]
    pub image: String,
    pub category: String,
    pub cta_text: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Game> for GameDto {
    fn from(game: Game) -> Self {
        let Game {
            id,
            fields,
            image,
            created_at,
            updated_at,
        } = game;
        Self {
            id: id.get(),
            title: fields.title().to_owned(),
            genre: fields.genre().to_owned(),
            description: fields.description().to_owned(),
            image,
            category: fields.category().to_owned(),
            cta_text: fields.cta_text().to_owned(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Multipart body accepted by create and update.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GameFormSchema {
    title: String,
    genre: String,
    description: String,
    category: String,
    cta_text: String,
    /// Reference to keep when no new image is uploaded.
    existing_image: Option<String>,
    /// jpeg, jpg, png, gif or webp; at most 5 MiB by default.
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

/// Response for a successful create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameCreatedResponse {
    pub success: bool,
    pub id: i32,
}

/// Response for a successful mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> web::Json<Self> {
        web::Json(Self { success: true })
    }
}

/// List every game, newest first.
#[utoipa::path(
    get,
    path = "/api/games",
    responses(
        (status = 200, description = "Games", body = [GameDto]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["games"],
    operation_id = "listGames",
    security([])
)]
#[get("/games")]
pub async fn list_games(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GameDto>>> {
    let games = state.games_query.list_games().await?;
    Ok(web::Json(games.into_iter().map(GameDto::from).collect()))
}

/// Fetch one game for editing.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    params(("id" = i32, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game", body = GameDto),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Game not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "getGame",
    security(("SessionCookie" = []))
)]
#[get("/games/{id}")]
pub async fn get_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<GameDto>> {
    session.require_admin()?;
    let id = parse_game_id(&path.into_inner())?;
    let game = state.games_query.get_game(id).await?;
    Ok(web::Json(game.into()))
}

/// Create a game from a multipart form.
#[utoipa::path(
    post,
    path = "/api/games",
    request_body(content = GameFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Game created", body = GameCreatedResponse),
        (status = 400, description = "Invalid form or image", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["games"],
    operation_id = "createGame",
    security(("SessionCookie" = []))
)]
#[post("/games")]
pub async fn create_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> ApiResult<web::Json<GameCreatedResponse>> {
    session.require_admin()?;
    let form = GameForm::read(payload, state.upload_limits).await?;
    let id = state.games.create_game(form.into_create_request()).await?;
    Ok(web::Json(GameCreatedResponse {
        success: true,
        id: id.get(),
    }))
}

/// Replace every field of a game, optionally with a new image.
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    params(("id" = i32, Path, description = "Game id")),
    request_body(content = GameFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Game updated", body = SuccessResponse),
        (status = 400, description = "Invalid form or image", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Game not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["games"],
    operation_id = "updateGame",
    security(("SessionCookie" = []))
)]
#[put("/games/{id}")]
pub async fn update_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Multipart,
) -> ApiResult<web::Json<SuccessResponse>> {
    session.require_admin()?;
    let id = parse_game_id(&path.into_inner())?;
    let form = GameForm::read(payload, state.upload_limits).await?;
    state.games.update_game(form.into_update_request(id)).await?;
    Ok(SuccessResponse::ok())
}

/// Delete a game and reclaim its uploaded image.
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    params(("id" = i32, Path, description = "Game id")),
    responses(
        (status = 200, description = "Game deleted", body = SuccessResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Game not found", body = Error)
    ),
    tags = ["games"],
    operation_id = "deleteGame",
    security(("SessionCookie" = []))
)]
#[delete("/games/{id}")]
pub async fn delete_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SuccessResponse>> {
    session.require_admin()?;
    let id = parse_game_id(&path.into_inner())?;
    state.games.delete_game(id).await?;
    Ok(SuccessResponse::ok())
}

#[cfg(test)]
#[path = "games_tests.rs"]
mod tests;
