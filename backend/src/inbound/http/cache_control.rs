//! Response caching policy.
//!
//! Catalog data changes whenever an admin edits it, so every API response is
//! marked uncacheable unless a handler sets its own `Cache-Control`.

use actix_web::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use actix_web::middleware::DefaultHeaders;

pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Middleware adding the no-cache header set to responses lacking it.
pub fn no_cache_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((CACHE_CONTROL, NO_CACHE))
        .add((PRAGMA, "no-cache"))
        .add((EXPIRES, "0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[case("/plain", NO_CACHE)]
    #[case("/custom", "no-store")]
    #[actix_web::test]
    async fn adds_headers_without_overriding(#[case] path: &str, #[case] expected: &str) {
        let app = test::init_service(
            App::new()
                .wrap(no_cache_headers())
                .route(
                    "/plain",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                )
                .route(
                    "/custom",
                    web::get().to(|| async {
                        HttpResponse::Ok()
                            .insert_header((CACHE_CONTROL, "no-store"))
                            .finish()
                    }),
                ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        let header = |name| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header(CACHE_CONTROL).as_deref(), Some(expected));
        assert_eq!(header(PRAGMA).as_deref(), Some("no-cache"));
        assert_eq!(header(EXPIRES).as_deref(), Some("0"));
    }
}
