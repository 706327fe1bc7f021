//! Request correlation and access logging.
//!
//! [`Trace`] gives every request its own [`TraceId`], runs the rest of the
//! stack inside a `request` span carrying it, stamps the `trace-id` response
//! header and logs one completion line with status and latency.

use std::future::Future;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, Span, error, field, info, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap it outermost so every response is stamped.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use gamics::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, inner: S) -> Self::Future {
        ready(Ok(TraceService { inner }))
    }
}

pub struct TraceService<S> {
    inner: S,
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = TraceId::generate();
        let span = info_span!(
            "request",
            trace_id = %id,
            method = %req.method(),
            path = %req.path(),
            status = field::Empty,
        );
        let handled = self.inner.call(req);
        Box::pin(TraceId::scope(id, finish(id, handled)).instrument(span))
    }
}

async fn finish<F, B>(id: TraceId, handled: F) -> Result<ServiceResponse<B>, Error>
where
    F: Future<Output = Result<ServiceResponse<B>, Error>>,
{
    let started = Instant::now();
    let mut res = handled.await?;
    stamp(&mut res, id);

    let status = res.status();
    Span::current().record("status", status.as_u16());
    info!(
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request finished"
    );
    Ok(res)
}

fn stamp<B>(res: &mut ServiceResponse<B>, id: TraceId) {
    match HeaderValue::from_str(&id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => error!(error = %err, trace_id = %id, "trace id is not a valid header value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn header(res: &ServiceResponse) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("trace-id header present")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn handlers_see_the_header_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                HttpResponse::Ok().body(id)
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let id = header(&res);
        assert_eq!(test::read_body(res).await, id.as_bytes());
    }

    #[rstest]
    #[actix_web::test]
    async fn error_bodies_carry_the_header_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/games/9",
            web::get().to(|| async {
                Err::<HttpResponse, _>(DomainError::not_found("game 9 not found"))
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/games/9").to_request()).await;
        let id = header(&res);
        let body: DomainError = test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(id.as_str()));
    }

    #[rstest]
    #[actix_web::test]
    async fn each_request_gets_its_own_id() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::NoContent() })),
        )
        .await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_ne!(header(&first), header(&second));
    }
}
