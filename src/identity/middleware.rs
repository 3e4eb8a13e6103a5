use axum::{
    body::Body,
    http::{header::COOKIE, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use percent_encoding::percent_decode_str;
use tracing::{debug, warn};

use super::extractor::{extract_visitor_identity, VisitorIdentity};

/// Makes the visitor identity of the inbound request available to handlers.
///
/// The identity is stored as a request extension only when a visitor cookie
/// is present; extract it with `Option<Extension<VisitorIdentity>>`.
pub async fn record_visitor_identity(mut request: Request<Body>, next: Next) -> Response {
    let identity = identity_from_headers(request.headers());
    debug!(?identity, "piwik visitor identity");

    if let Some(identity) = identity {
        request.extensions_mut().insert(identity);
    }
    next.run(request).await
}

/// Run the extractor over every `Cookie` header, in header order.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<VisitorIdentity> {
    let cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(raw) => Some(parse_cookies(raw)),
            Err(_) => {
                warn!("ignoring Cookie header that is not valid ASCII");
                None
            }
        })
        .flatten();

    extract_visitor_identity(cookies)
}

/// Split a `Cookie` header into name-value pairs, percent-decoding values.
pub fn parse_cookies(cookie_header: &str) -> Vec<(String, String)> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|cookie| {
            let (name, value) = cookie.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim()).decode_utf8_lossy().into_owned();
            Some((name.to_string(), value))
        })
        .collect()
}
