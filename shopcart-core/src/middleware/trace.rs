//! TraceLayer span maker that keeps credentials out of request logs

use axum::http::{Request, Uri};
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values are redacted in logs
const SENSITIVE_PARAMS: &[&str] = &["access_token", "token", "password"];

/// A `MakeSpan` that logs the request URI with sensitive query values redacted
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %sanitize_uri(request.uri()),
            version = ?request.version(),
        )
    }
}

/// `/api/products?token=abc&skip=0` becomes `/api/products?token=[REDACTED]&skip=0`
fn sanitize_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), pairs.join("&"))
}
