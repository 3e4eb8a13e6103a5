use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::tracker::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub collector: CollectorConfig,
    /// Id of the site to be tracked
    pub site_id: u32,
    /// Token for parameters that need admin access (forced ip, time, visitor id)
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Location of the collector installation, eg. http://yoursite.com/piwik
    pub base_url: String,
    #[serde(default = "CollectorConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "CollectorConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CollectorConfig {
    fn default_user_agent() -> String {
        DEFAULT_USER_AGENT.to_string()
    }

    const fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT.as_secs()
    }
}

impl TrackerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = var("PIWIK_URL").context("PIWIK_URL must be set")?;

        let site_id = var("PIWIK_SITE_ID")
            .context("PIWIK_SITE_ID must be set")?
            .parse::<u32>()
            .context("PIWIK_SITE_ID must be a positive integer")?;

        let auth_token = var("PIWIK_AUTH_TOKEN").filter(|token| !token.is_empty());

        let timeout_secs = match var("PIWIK_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("PIWIK_TIMEOUT_SECS must be a number of seconds, got '{raw}'"))?,
            None => CollectorConfig::default_timeout_secs(),
        };

        let user_agent =
            var("PIWIK_USER_AGENT").unwrap_or_else(CollectorConfig::default_user_agent);

        Ok(TrackerConfig {
            collector: CollectorConfig {
                base_url,
                user_agent,
                timeout_secs,
            },
            site_id,
            auth_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<TrackerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrackerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn minimal_configuration_uses_defaults() {
        let config = load(&[("PIWIK_URL", "http://example.com/piwik"), ("PIWIK_SITE_ID", "6")]).unwrap();

        assert_eq!(config.collector.base_url, "http://example.com/piwik");
        assert_eq!(config.site_id, 6);
        assert_eq!(config.collector.timeout_secs, 20);
        assert_eq!(config.collector.user_agent, DEFAULT_USER_AGENT);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn optional_values_are_read() {
        let config = load(&[
            ("PIWIK_URL", "http://example.com/piwik"),
            ("PIWIK_SITE_ID", "3"),
            ("PIWIK_AUTH_TOKEN", "abc123"),
            ("PIWIK_TIMEOUT_SECS", "5"),
            ("PIWIK_USER_AGENT", "shop-backend/2.1"),
        ])
        .unwrap();

        assert_eq!(config.auth_token.as_deref(), Some("abc123"));
        assert_eq!(config.collector.timeout_secs, 5);
        assert_eq!(config.collector.user_agent, "shop-backend/2.1");
    }

    #[test]
    fn missing_or_invalid_values_are_errors() {
        assert!(load(&[("PIWIK_SITE_ID", "6")]).is_err());
        assert!(load(&[("PIWIK_URL", "http://example.com")]).is_err());

        let err = load(&[("PIWIK_URL", "http://example.com"), ("PIWIK_SITE_ID", "six")]).unwrap_err();
        assert!(err.to_string().contains("PIWIK_SITE_ID"));

        let err = load(&[
            ("PIWIK_URL", "http://example.com"),
            ("PIWIK_SITE_ID", "6"),
            ("PIWIK_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PIWIK_TIMEOUT_SECS"));
    }

    #[test]
    fn empty_auth_token_is_ignored() {
        let config = load(&[
            ("PIWIK_URL", "http://example.com"),
            ("PIWIK_SITE_ID", "6"),
            ("PIWIK_AUTH_TOKEN", ""),
        ])
        .unwrap();
        assert!(config.auth_token.is_none());
    }
}
