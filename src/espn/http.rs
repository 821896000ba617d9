//! HTTP client for the ESPN Fantasy v3 API.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT},
    Client,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    cli::types::{ids::LeagueId, time::ScoringPeriod},
    config::EspnCredentials,
    Result,
};


/// Base path for ESPN Fantasy v3 API.
pub const ESPN_API_BASE: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const ESPN_REFERER: &str = "https://www.espn.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client over a single GET endpoint. Does not retry.
#[derive(Debug, Clone)]
pub struct EspnClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
}

impl EspnClient {
    pub fn new(credentials: &EspnCredentials) -> Result<Self> {
        Self::with_base_url(ESPN_API_BASE, credentials)
    }

    /// Build a client against another base URL (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>, credentials: &EspnCredentials) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: build_headers(credentials)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every season snapshot ESPN has for a league.
    ///
    /// A bare object is normalized to a one-element list; any other non-array
    /// body yields an empty list.
    pub async fn get_league_history(
        &self,
        league_id: LeagueId,
        scoring_period: Option<ScoringPeriod>,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/games/ffl/leagueHistory/{}", self.base_url, league_id);
        let mut request = self.http.get(&url).headers(self.headers.clone());
        if let Some(period) = scoring_period {
            request = request.query(&[("scoringPeriodId", period.as_u16())]);
        }

        debug!(%url, ?scoring_period, "requesting league history");

        let body = request
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(normalize_history(body))
    }
}

fn normalize_history(body: Value) -> Vec<Value> {
    match body {
        Value::Array(entries) => entries,
        Value::Object(_) => vec![body],
        _ => Vec::new(),
    }
}

/// Fixed headers plus the `SWID`/`espn_s2` cookie for whichever tokens are set.
pub fn build_headers(credentials: &EspnCredentials) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    h.insert(REFERER, HeaderValue::from_static(ESPN_REFERER));

    let mut cookies = Vec::new();
    if let Some(swid) = credentials.swid.as_deref().filter(|s| !s.is_empty()) {
        cookies.push(format!("SWID={swid}"));
    }
    if let Some(s2) = credentials.espn_s2.as_deref().filter(|s| !s.is_empty()) {
        cookies.push(format!("espn_s2={s2}"));
    }
    if !cookies.is_empty() {
        h.insert(COOKIE, HeaderValue::from_str(&cookies.join("; "))?);
    }

    Ok(h)
}
