use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrackerError};
use crate::models::{AttributionInfo, CustomVariables, VisitorId};

/// Kind of outbound action tracked by `track_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Download,
    Link,
}

impl ActionType {
    /// Query parameter key carrying the action url.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionType::Download => "download",
            ActionType::Link => "link",
        }
    }
}

impl FromStr for ActionType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "download" => Ok(ActionType::Download),
            "link" => Ok(ActionType::Link),
            other => Err(TrackerError::InvalidActionType(other.to_string())),
        }
    }
}

impl AsRef<str> for ActionType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The terminal part of a hit. Exactly one is attached per send, so keys of
/// different actions (eg. `download` and `link`) never appear together.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingAction {
    Pageview { title: String },
    Goal { goal_id: u32, revenue: Option<f64> },
    Outlink { action_type: ActionType, url: String },
}

/// Parameters of a single tracking hit.
///
/// `browser_language` and `user_agent` travel as request headers and are
/// never part of the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    pub token_auth: Option<String>,
    pub url: Option<String>,
    pub referrer: Option<String>,
    pub attribution: Option<AttributionInfo>,
    pub custom_variables: CustomVariables,
    /// Forced hit time, UTC epoch seconds
    pub forced_date_time: Option<i64>,
    pub ip: Option<String>,
    pub visitor_id: Option<VisitorId>,
    pub browser_language: Option<String>,
    pub user_agent: Option<String>,
    pub action: Option<TrackingAction>,
}

impl ParameterSet {
    /// Query parameters in wire order. Header-routed values are excluded.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = Vec::with_capacity(16);

        if let Some(token) = &self.token_auth {
            pairs.push(("token_auth", token.clone()));
        }
        if let Some(url) = &self.url {
            pairs.push(("url", url.clone()));
        }
        if let Some(referrer) = &self.referrer {
            pairs.push(("urlref", referrer.clone()));
        }
        if let Some(info) = &self.attribution {
            pairs.push(("_rcn", info.campaign_name.clone()));
            pairs.push(("_rck", info.campaign_keyword.clone()));
            pairs.push(("_refts", info.referrer_timestamp.to_string()));
            pairs.push(("_ref", info.referrer_url.clone()));
        }
        if let Some(cvar) = self.custom_variables.to_json()? {
            pairs.push(("_cvar", cvar));
        }
        if let Some(cdt) = self.forced_date_time {
            pairs.push(("cdt", cdt.to_string()));
        }
        if let Some(ip) = &self.ip {
            pairs.push(("cip", ip.clone()));
        }
        if let Some(cid) = &self.visitor_id {
            pairs.push(("cid", cid.to_string()));
        }

        match &self.action {
            Some(TrackingAction::Pageview { title }) => {
                pairs.push(("action_name", title.clone()));
            }
            Some(TrackingAction::Goal { goal_id, revenue }) => {
                pairs.push(("idgoal", goal_id.to_string()));
                if let Some(revenue) = revenue {
                    pairs.push(("revenue", revenue.to_string()));
                }
            }
            Some(TrackingAction::Outlink { action_type, url }) => {
                pairs.push((action_type.as_str(), url.clone()));
                pairs.push(("redirect", "0".to_string()));
            }
            None => {}
        }

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &ParameterSet) -> Vec<&'static str> {
        params.query_pairs().unwrap().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn empty_set_has_no_pairs() {
        assert!(ParameterSet::default().query_pairs().unwrap().is_empty());
    }

    #[test]
    fn header_values_stay_out_of_the_query() {
        let params = ParameterSet {
            url: Some("http://test.com".into()),
            browser_language: Some("de-DE".into()),
            user_agent: Some("Mozilla/5.0".into()),
            ..Default::default()
        };
        assert_eq!(keys(&params), vec!["url"]);
    }

    #[test]
    fn attribution_expands_to_four_keys() {
        let params = ParameterSet {
            attribution: Some(AttributionInfo::new("spring", "shoes", 1000, "http://ref")),
            ..Default::default()
        };
        let pairs = params.query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("_rcn", "spring".to_string()),
                ("_rck", "shoes".to_string()),
                ("_refts", "1000".to_string()),
                ("_ref", "http://ref".to_string()),
            ]
        );
    }

    #[test]
    fn goal_revenue_is_optional() {
        let mut params = ParameterSet {
            action: Some(TrackingAction::Goal { goal_id: 1, revenue: None }),
            ..Default::default()
        };
        assert_eq!(keys(&params), vec!["idgoal"]);

        params.action = Some(TrackingAction::Goal { goal_id: 1, revenue: Some(99.0) });
        let pairs = params.query_pairs().unwrap();
        assert_eq!(pairs[1], ("revenue", "99".to_string()));

        params.action = Some(TrackingAction::Goal { goal_id: 1, revenue: Some(12.5) });
        assert_eq!(params.query_pairs().unwrap()[1].1, "12.5");
    }

    #[test]
    fn outlink_uses_action_type_as_key() {
        let params = ParameterSet {
            action: Some(TrackingAction::Outlink {
                action_type: ActionType::Link,
                url: "http://target.com".into(),
            }),
            ..Default::default()
        };
        assert_eq!(keys(&params), vec!["link", "redirect"]);
    }

    #[test]
    fn action_type_parsing() {
        assert_eq!("download".parse::<ActionType>().unwrap(), ActionType::Download);
        assert_eq!("link".parse::<ActionType>().unwrap(), ActionType::Link);
        assert!(matches!(
            "Download".parse::<ActionType>(),
            Err(TrackerError::InvalidActionType(ref t)) if t == "Download"
        ));
    }
}
