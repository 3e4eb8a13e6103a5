//! Tracking client: merges system parameters, encodes and dispatches hits.

pub mod client;
pub mod query;
pub mod transport;

pub use client::{PreparedHit, TrackingClient, MAX_NONCE, TRACKING_PATH};
pub use query::{decode_query, encode_query};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
