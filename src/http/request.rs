//! Request ID middleware.
//!
//! # Responsibilities
//! - Ensure every request carries an `x-request-id` header
//! - Expose the ID as a request extension for handlers and logs
//!
//! # Design Decisions
//! - A well-formed incoming ID is kept, so upstream correlation survives
//! - Anything else is replaced with a fresh UUID v4

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Per-request correlation ID, readable via `Extension<RequestId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

/// Layer applying [`RequestIdService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware that stamps requests with an ID before the inner service
/// sees them.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .unwrap_or_else(Uuid::new_v4);

        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            req.headers_mut()
                .insert(HeaderName::from_static(X_REQUEST_ID), value);
        }
        req.extensions_mut().insert(RequestId(id));

        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn echo_app() -> Router {
        Router::new()
            .route(
                "/",
                get(
                    |headers: HeaderMap, Extension(id): Extension<RequestId>| async move {
                        let header = headers
                            .get(X_REQUEST_ID)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_owned();
                        format!("{header}|{}", id.0)
                    },
                ),
            )
            .layer(RequestIdLayer)
    }

    async fn body_of(app: Router, req: Request<Body>) -> String {
        let response = app.oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn generates_an_id_when_missing() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let body = body_of(echo_app(), req).await;

        let (header, extension) = body.split_once('|').unwrap();
        assert_eq!(header, extension);
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn keeps_a_well_formed_incoming_id() {
        let incoming = Uuid::new_v4();
        let req = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, incoming.to_string())
            .body(Body::empty())
            .unwrap();
        let body = body_of(echo_app(), req).await;

        let (header, extension) = body.split_once('|').unwrap();
        assert_eq!(header, incoming.to_string());
        assert_eq!(extension, incoming.to_string());
    }

    #[tokio::test]
    async fn replaces_a_malformed_incoming_id() {
        let req = Request::builder()
            .uri("/")
            .header(X_REQUEST_ID, "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let body = body_of(echo_app(), req).await;

        let (header, _) = body.split_once('|').unwrap();
        assert_ne!(header, "not-a-uuid");
        assert!(Uuid::parse_str(header).is_ok());
    }
}
