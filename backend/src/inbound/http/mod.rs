//! HTTP inbound adapter exposing the REST API.

pub mod admin;
pub mod cache_control;
pub mod content;
pub mod error;
pub mod game_form;
pub mod games;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON extractor settings: malformed bodies become `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("invalid JSON body: {err}")).into()
        })
}

/// Register every `/api` endpoint on a scope.
///
/// The caller mounts the scope and wraps it with the session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(admin::login)
        .service(admin::logout)
        .service(admin::check)
        .service(games::list_games)
        .service(games::get_game)
        .service(games::create_game)
        .service(games::update_game)
        .service(games::delete_game)
        .service(content::get_content)
        .service(content::update_content);
}
