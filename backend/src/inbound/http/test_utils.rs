//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use std::sync::Arc;

use crate::domain::ports::{
    MockGamesCommand, MockGamesQuery, MockLoginService, MockSiteContentCommand,
    MockSiteContentQuery,
};
use crate::domain::{AdminId, AdminIdentity, Error};
use crate::inbound::http::game_form::UploadLimits;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Path of the sign-in shortcut mounted by handler tests.
pub const TEST_SIGN_IN_PATH: &str = "/test/sign-in";

/// Session middleware for tests: fresh key, cookie named `session`, no
/// `Secure` flag so plain HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Signs in as admin #1 without touching the login port.
pub async fn test_sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_admin(&AdminIdentity::new(AdminId::new(1), "admin"))?;
    Ok(HttpResponse::Ok().finish())
}

pub fn sign_in_request() -> test::TestRequest {
    test::TestRequest::post().uri(TEST_SIGN_IN_PATH)
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports. Unconfigured mocks panic when called.
pub struct MockPorts {
    pub login: MockLoginService,
    pub games: MockGamesCommand,
    pub games_query: MockGamesQuery,
    pub content: MockSiteContentCommand,
    pub content_query: MockSiteContentQuery,
}

impl MockPorts {
    pub fn new() -> Self {
        Self {
            login: MockLoginService::new(),
            games: MockGamesCommand::new(),
            games_query: MockGamesQuery::new(),
            content: MockSiteContentCommand::new(),
            content_query: MockSiteContentQuery::new(),
        }
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                games: Arc::new(self.games),
                games_query: Arc::new(self.games_query),
                content: Arc::new(self.content),
                content_query: Arc::new(self.content_query),
            },
            UploadLimits::default(),
        )
    }
}

/// App with the `/api` scope, test sessions and the sign-in shortcut.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .route(TEST_SIGN_IN_PATH, web::post().to(test_sign_in))
        .service(web::scope("/api").configure(configure_api))
}
