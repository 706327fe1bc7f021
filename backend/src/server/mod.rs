//! HTTP server assembly.
//!
//! The app is shared by `main` and the end-to-end tests: `/api` sits behind
//! the cookie session, the probes and Swagger UI do not, and every response
//! goes through [`Trace`] and the no-cache headers.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::cache_control::no_cache_headers;
use crate::inbound::http::configure_api;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;

/// Everything one worker needs to assemble the application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
}

/// Private (encrypted) `session` cookie that expires after the configured TTL.
fn session_middleware(session: SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    } = session;

    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(ttl))
        .build()
}

/// Assemble the application: `/api` behind the session middleware, health
/// probes outside it and Swagger UI in debug builds.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api")
        .wrap(session_middleware(session))
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(no_cache_headers())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Bind the catalog server. Readiness flips once the socket is bound; the
/// returned [`Server`] must be awaited to serve requests.
///
/// # Errors
/// Fails when the uploads directory cannot be opened or the address is
/// already taken.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        db_pool,
        uploads_dir,
        upload_limits,
    } = config;

    let http_state = build_http_state(&db_pool, &uploads_dir, upload_limits)
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        session,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
