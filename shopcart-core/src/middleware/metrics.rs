//! Request observability as a Tower layer
//!
//! Every request gets an `x-request-id` (reused from the client when sent),
//! a tracing span carrying it, and the `shopcart_http_*` metrics.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = ObservabilityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObservabilityMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware<S> {
    inner: S,
}

/// Reuse a well-formed client request id, otherwise mint one
fn request_id(request: &Request<Body>) -> HeaderValue {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| !v.is_empty() && v.to_str().is_ok())
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        })
}

impl<S> Service<Request<Body>> for ObservabilityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let method = request.method().to_string();
        let path = normalize_path(request.uri().path());
        let request_id = request_id(&request);
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, request_id.clone());

        let span = tracing::info_span!(
            "http",
            request_id = request_id.to_str().unwrap_or_default()
        );

        // The clone may not be ready, keep the one that poll_ready drove
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                gauge!("shopcart_http_requests_in_flight").increment(1.0);
                let start = Instant::now();

                let result = inner.call(request).await;
                gauge!("shopcart_http_requests_in_flight").decrement(1.0);

                let mut response = result?;
                let status = response.status().as_u16().to_string();
                counter!(
                    "shopcart_http_requests_total",
                    "method" => method.clone(),
                    "path" => path.clone(),
                    "status" => status
                )
                .increment(1);
                histogram!(
                    "shopcart_http_request_duration_seconds",
                    "method" => method,
                    "path" => path
                )
                .record(start.elapsed().as_secs_f64());

                response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
                Ok(response)
            }
            .instrument(span),
        )
    }
}

/// Collapse numeric id segments to `{id}` to keep label cardinality bounded
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|seg| if looks_like_id(seg) { "{id}" } else { seg })
        .collect::<Vec<_>>()
        .join("/")
}

fn looks_like_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
