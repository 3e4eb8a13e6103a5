//! Client for the Piwik/Matomo HTTP tracking API.
//!
//! ```no_run
//! # async fn run() -> piwik_tracker::Result<()> {
//! use piwik_tracker::TrackingClient;
//!
//! let piwik = TrackingClient::new("http://yoursite.com/piwik", 6)?;
//! piwik
//!     .request(None)
//!     .url("http://yoursite.com/some-page.html")
//!     .custom_variable(1, "foobar", "value")?
//!     .track_pageview("Page Title")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod request;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use identity::{extract_visitor_identity, VisitorIdentity};
pub use models::{ActionType, AttributionInfo, ParameterSet, VisitorId};
pub use request::RequestBuilder;
pub use tracker::{HttpTransport, Transport, TrackingClient};
