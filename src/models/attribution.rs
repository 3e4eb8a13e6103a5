use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, TrackerError};

/// Referrer attribution of a visit, so that later goal conversions are
/// credited to the right campaign and referrer.
///
/// The browser tracker exposes this as a JSON array
/// `[campaign name, campaign keyword, referrer timestamp, referrer url]`,
/// which is also the serialized form of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, i64, String)", into = "(String, String, i64, String)")]
pub struct AttributionInfo {
    pub campaign_name: String,
    pub campaign_keyword: String,
    /// Unix timestamp at which the referrer was set
    pub referrer_timestamp: i64,
    pub referrer_url: String,
}

impl AttributionInfo {
    pub fn new(
        campaign_name: impl Into<String>,
        campaign_keyword: impl Into<String>,
        referrer_timestamp: i64,
        referrer_url: impl Into<String>,
    ) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            campaign_keyword: campaign_keyword.into(),
            referrer_timestamp,
            referrer_url: referrer_url.into(),
        }
    }

    /// Parse the JSON array form produced by the browser tracker.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TrackerError::InvalidAttribution(e.to_string()))
    }
}

impl From<(String, String, i64, String)> for AttributionInfo {
    fn from((campaign_name, campaign_keyword, referrer_timestamp, referrer_url): (String, String, i64, String)) -> Self {
        Self {
            campaign_name,
            campaign_keyword,
            referrer_timestamp,
            referrer_url,
        }
    }
}

impl From<(&str, &str, i64, &str)> for AttributionInfo {
    fn from((name, keyword, timestamp, url): (&str, &str, i64, &str)) -> Self {
        Self::new(name, keyword, timestamp, url)
    }
}

impl From<AttributionInfo> for (String, String, i64, String) {
    fn from(info: AttributionInfo) -> Self {
        (
            info.campaign_name,
            info.campaign_keyword,
            info.referrer_timestamp,
            info.referrer_url,
        )
    }
}

impl FromStr for AttributionInfo {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_and_tuple_forms_agree() {
        let parsed: AttributionInfo = r#"["campaign","keyword",1000,"http://ref"]"#.parse().unwrap();
        let tuple = AttributionInfo::from(("campaign", "keyword", 1000, "http://ref"));
        assert_eq!(parsed, tuple);
        assert_eq!(parsed.referrer_timestamp, 1000);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = AttributionInfo::from_json("[\"campaign\",").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidAttribution(_)));
    }

    #[test]
    fn rejects_wrong_arity() {
        for json in [
            r#"["campaign","keyword",1000]"#,
            r#"["campaign","keyword",1000,"http://ref","extra"]"#,
            r#"{"campaign":"x"}"#,
        ] {
            assert!(
                matches!(AttributionInfo::from_json(json), Err(TrackerError::InvalidAttribution(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_wrong_element_types() {
        let err = AttributionInfo::from_json(r#"["campaign","keyword","soon","http://ref"]"#);
        assert!(matches!(err, Err(TrackerError::InvalidAttribution(_))));
    }
}
