//! Visitor identity from inbound request cookies
//!
//! Lets server-side tracking hits be correlated with the visitor's
//! browser-side session: the browser tracker stores the site id and visitor
//! id in a `_pk_id.<site id>.<suffix>` cookie.

pub mod extractor;
pub mod middleware;

pub use extractor::{extract_visitor_identity, VisitorIdentity, VISITOR_COOKIE_PREFIX};
pub use middleware::record_visitor_identity;
