use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{ActionType, AttributionInfo, ParameterSet, TrackingAction, VisitorId};
use crate::tracker::{HttpTransport, Transport, TrackingClient};

/// Accumulates the parameters of one tracking hit.
///
/// Setters consume and return the builder, the last write for a key wins.
/// Each `track_*` action consumes the builder and sends exactly one hit, so a
/// builder can never be sent twice.
///
/// ```no_run
/// # async fn run() -> piwik_tracker::Result<()> {
/// let client = piwik_tracker::TrackingClient::new("http://yoursite.com/piwik", 6)?;
/// client
///     .request(None)
///     .url("http://yoursite.com/some-page.html")
///     .custom_variable(1, "plan", "pro")?
///     .track_pageview("Page Title")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RequestBuilder<T: Transport = HttpTransport> {
    client: TrackingClient<T>,
    params: ParameterSet,
}

impl<T: Transport> RequestBuilder<T> {
    pub fn new(client: TrackingClient<T>, auth_token: Option<&str>) -> Self {
        let params = ParameterSet {
            token_auth: auth_token.map(str::to_string),
            ..Default::default()
        };
        Self { client, params }
    }

    /// Parameters accumulated so far.
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Sets the current URL being tracked.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.params.url = Some(url.into());
        self
    }

    /// Sets the referrer URL used for the referrer details of new visits.
    pub fn referrer(mut self, url: impl Into<String>) -> Self {
        self.params.referrer = Some(url.into());
        self
    }

    /// Sets the referrer attribution of the visit, so that later goal
    /// conversions are credited to the right campaign and referrer.
    pub fn attribution_info(mut self, info: impl Into<AttributionInfo>) -> Self {
        self.params.attribution = Some(info.into());
        self
    }

    /// Same as [`attribution_info`](Self::attribution_info), from the JSON
    /// array form `["name","keyword",timestamp,"url"]`.
    pub fn attribution_info_json(self, json: &str) -> Result<Self> {
        let info = AttributionInfo::from_json(json)?;
        Ok(self.attribution_info(info))
    }

    /// Sets a visit custom variable in slot 1 to 5.
    pub fn custom_variable(
        mut self,
        slot_id: u8,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        self.params.custom_variables.set(slot_id, name, value)?;
        Ok(self)
    }

    /// Sent as the `Accept-Language` header.
    pub fn browser_language(mut self, lang: impl Into<String>) -> Self {
        self.params.browser_language = Some(lang.into());
        self
    }

    /// Sent as the `User-Agent` header, replacing the transport default.
    pub fn user_agent(mut self, name: impl Into<String>) -> Self {
        self.params.user_agent = Some(name.into());
        self
    }

    /// Records the hit at `time` instead of the current time.
    pub fn forced_date_time(mut self, time: DateTime<Utc>) -> Self {
        self.params.forced_date_time = Some(time.timestamp());
        self
    }

    /// Overrides the client IP recorded by the collector.
    pub fn ip(mut self, client_ip: impl Into<String>) -> Self {
        self.params.ip = Some(client_ip.into());
        self
    }

    /// Records the hit for this visitor instead of the collector's own
    /// visitor matching. The id must be exactly 16 characters.
    pub fn visitor_id(mut self, id: impl Into<String>) -> Result<Self> {
        self.params.visitor_id = Some(VisitorId::new(id)?);
        Ok(self)
    }

    /// Final parameters of a page view, without sending them.
    pub fn into_pageview(self, document_title: impl Into<String>) -> ParameterSet {
        self.finish(TrackingAction::Pageview {
            title: document_title.into(),
        })
    }

    /// Final parameters of a goal conversion, without sending them.
    pub fn into_goal(self, goal_id: u32, revenue: Option<f64>) -> ParameterSet {
        self.finish(TrackingAction::Goal { goal_id, revenue })
    }

    /// Final parameters of a download or outlink, without sending them.
    pub fn into_action(
        self,
        action_url: impl Into<String>,
        action_type: impl AsRef<str>,
    ) -> Result<ParameterSet> {
        let action_type: ActionType = action_type.as_ref().parse()?;
        Ok(self.finish(TrackingAction::Outlink {
            action_type,
            url: action_url.into(),
        }))
    }

    /// Tracks a page view. `document_title` is the title shown in the page
    /// titles report.
    pub async fn track_pageview(self, document_title: impl Into<String>) -> Result<T::Response> {
        let client = self.client.clone();
        client.track(self.into_pageview(document_title)).await
    }

    /// Records a goal conversion, with optional revenue.
    pub async fn track_goal(self, goal_id: u32, revenue: Option<f64>) -> Result<T::Response> {
        let client = self.client.clone();
        client.track(self.into_goal(goal_id, revenue)).await
    }

    /// Tracks a download or outlink. `action_type` must be `download` or
    /// `link`; anything else fails before a request is made.
    pub async fn track_action(
        self,
        action_url: impl Into<String>,
        action_type: impl AsRef<str>,
    ) -> Result<T::Response> {
        let client = self.client.clone();
        client.track(self.into_action(action_url, action_type)?).await
    }

    fn finish(mut self, action: TrackingAction) -> ParameterSet {
        self.params.action = Some(action);
        self.params
    }
}
