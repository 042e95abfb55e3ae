//! Per-request correlation ids.
//!
//! A reverse proxy in front of the kitchen server may already stamp requests
//! with `x-request-id`. That value is kept when it looks like an id; anything
//! else is replaced by a fresh UUID so log lines and Sentry tags stay short
//! and printable.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted as-is.
const MAX_UPSTREAM_LEN: usize = 128;

/// Tag the request span and Sentry scope with a correlation id and echo it.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = upstream_id(request.headers())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    Span::current().record("request_id", id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn upstream_id(headers: &HeaderMap) -> Option<&str> {
    let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let well_formed = !id.is_empty()
        && id.len() <= MAX_UPSTREAM_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    well_formed.then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        headers
    }

    #[test]
    fn test_upstream_id_kept_when_well_formed() {
        let headers = headers_with("cf-7d1e.abc_42");
        assert_eq!(upstream_id(&headers), Some("cf-7d1e.abc_42"));
    }

    #[test]
    fn test_upstream_id_rejected() {
        assert_eq!(upstream_id(&HeaderMap::new()), None);
        assert_eq!(upstream_id(&headers_with("")), None);
        assert_eq!(upstream_id(&headers_with("two words")), None);
        assert_eq!(upstream_id(&headers_with(&"a".repeat(129))), None);
    }
}
