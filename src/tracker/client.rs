use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::query::encode_query;
use super::transport::{normalize_base_url, HttpTransport, Transport};
use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::models::ParameterSet;
use crate::request::RequestBuilder;

/// Tracking endpoint, relative to the collector base address.
pub const TRACKING_PATH: &str = "piwik.php";

/// Upper bound (exclusive) of the `rand` cache-busting nonce.
pub const MAX_NONCE: i64 = i64::MAX;

/// A tracking hit ready for the transport.
#[derive(Debug, Clone)]
pub struct PreparedHit {
    /// `piwik.php?<query>`, relative to the collector base
    pub path_and_query: String,
    pub headers: HeaderMap,
}

/// Client bound to one collector and one site.
///
/// Cheap to clone; clones share the transport.
pub struct TrackingClient<T: Transport = HttpTransport> {
    base_url: String,
    site_id: u32,
    transport: Arc<T>,
}

impl<T: Transport> Clone for TrackingClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            site_id: self.site_id,
            transport: Arc::clone(&self.transport),
        }
    }
}

impl TrackingClient<HttpTransport> {
    /// Create a client over the default HTTP transport.
    ///
    /// `base_url` is the location of the collector installation, eg.
    /// `http://yoursite.com/piwik`.
    pub fn new(base_url: &str, site_id: u32) -> Result<Self> {
        let transport = HttpTransport::new(base_url)?;
        Self::with_transport(base_url, site_id, transport)
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self> {
        let transport = HttpTransport::with_options(
            &config.collector.base_url,
            &config.collector.user_agent,
            Duration::from_secs(config.collector.timeout_secs),
        )?;
        Self::with_transport(&config.collector.base_url, config.site_id, transport)
    }
}

impl<T: Transport> TrackingClient<T> {
    pub fn with_transport(base_url: &str, site_id: u32, transport: T) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            site_id,
            transport: Arc::new(transport),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn site_id(&self) -> u32 {
        self.site_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a new tracking request.
    ///
    /// Forcing the visitor ip, hit time or visitor id requires `auth_token`
    /// to belong to a super user or a user with admin access to the site.
    pub fn request(&self, auth_token: Option<&str>) -> RequestBuilder<T> {
        RequestBuilder::new(self.clone(), auth_token)
    }

    /// Send one tracking hit and return the raw transport response.
    pub async fn track(&self, params: ParameterSet) -> Result<T::Response> {
        let hit = self.prepare(&params)?;

        debug!(
            site_id = self.site_id,
            url = %hit.path_and_query,
            headers = ?hit.headers.keys().collect::<Vec<_>>(),
            "sending tracking request"
        );

        self.transport
            .get(&hit.path_and_query, hit.headers)
            .await
            .map_err(TrackerError::transport)
    }

    /// Merge the system parameters into `params` and encode the hit.
    ///
    /// A fresh nonce is drawn on every call.
    pub fn prepare(&self, params: &ParameterSet) -> Result<PreparedHit> {
        let mut headers = HeaderMap::new();
        if let Some(lang) = &params.browser_language {
            headers.insert(ACCEPT_LANGUAGE, header_value("Accept-Language", lang)?);
        }
        if let Some(agent) = &params.user_agent {
            headers.insert(USER_AGENT, header_value("User-Agent", agent)?);
        }

        let nonce: i64 = rand::random_range(0..MAX_NONCE);
        let mut pairs = vec![
            ("idsite", self.site_id.to_string()),
            ("rec", "1".to_string()),
            ("rand", nonce.to_string()),
        ];
        pairs.extend(params.query_pairs()?);

        Ok(PreparedHit {
            path_and_query: format!("{TRACKING_PATH}?{}", encode_query(pairs)),
            headers,
        })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| TrackerError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}
