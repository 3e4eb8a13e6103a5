use serde::{Deserialize, Serialize};

/// Prefix of the visitor cookie set by the browser tracker:
/// `_pk_id.<site id>.<suffix>`.
pub const VISITOR_COOKIE_PREFIX: &str = "_pk_id.";

/// Site and visitor of an existing browser-side session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorIdentity {
    pub site_id: u32,
    /// Raw id from the cookie, not length checked
    pub visitor_id: String,
}

/// Find the visitor cookie among `cookies` and return its identity.
///
/// The first cookie named `_pk_id.<digits>.<suffix>` wins, in the iteration
/// order of `cookies`. With several visitor cookies and an unordered map the
/// winner is unspecified, pass the cookies in header order when that
/// matters. The visitor id is the cookie value up to its first `.`.
pub fn extract_visitor_identity<I, K, V>(cookies: I) -> Option<VisitorIdentity>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    cookies.into_iter().find_map(|(name, value)| {
        let site_id = parse_visitor_cookie_name(name.as_ref())?;
        let value = value.as_ref();
        let visitor_id = value.split_once('.').map_or(value, |(id, _)| id);
        Some(VisitorIdentity {
            site_id,
            visitor_id: visitor_id.to_string(),
        })
    })
}

/// Site id of a visitor cookie name, `None` for any other cookie.
fn parse_visitor_cookie_name(name: &str) -> Option<u32> {
    let rest = name.strip_prefix(VISITOR_COOKIE_PREFIX)?;
    let (digits, suffix) = rest.split_once('.')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    digits.parse().ok()
}
