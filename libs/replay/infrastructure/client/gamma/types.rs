use crate::domain::{parse_event_time, EventInfo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event as returned by `GET /events/slug/{slug}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<Market>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// JSON-encoded array, e.g. "[\"Up\", \"Down\"]"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<String>,
    /// JSON-encoded array of token IDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clob_token_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Market {
    /// Decode the outcome labels
    pub fn parse_outcomes(&self) -> Result<Vec<String>, serde_json::Error> {
        match &self.outcomes {
            Some(outcomes) => serde_json::from_str(outcomes),
            None => Ok(Vec::new()),
        }
    }
}

/// Reasons an event cannot be turned into an [`EventInfo`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventInfoError {
    #[error("event has no startTime or startDate")]
    MissingStartTime,

    #[error("event has no endDate")]
    MissingEndTime,

    #[error("unparsable event time: {0}")]
    InvalidTime(String),

    #[error("event has no markets")]
    NoMarkets,

    #[error("first market has no conditionId")]
    MissingConditionId,
}

impl Event {
    /// Start time string, preferring `startTime` over `startDate`
    pub fn start_time_str(&self) -> Option<&str> {
        self.start_time
            .as_deref()
            .or(self.start_date.as_deref())
    }

    /// Convert to event metadata for the given slug
    pub fn to_event_info(&self, slug: &str) -> Result<EventInfo, EventInfoError> {
        let start_time = self
            .start_time_str()
            .ok_or(EventInfoError::MissingStartTime)?
            .to_string();
        let end_time = self
            .end_date
            .clone()
            .ok_or(EventInfoError::MissingEndTime)?;

        let start_ts = parse_event_time(&start_time)
            .map_err(|_| EventInfoError::InvalidTime(start_time.clone()))?;
        let end_ts = parse_event_time(&end_time)
            .map_err(|_| EventInfoError::InvalidTime(end_time.clone()))?;

        let market = self
            .markets
            .as_ref()
            .and_then(|markets| markets.first())
            .ok_or(EventInfoError::NoMarkets)?;
        let condition_id = market
            .condition_id
            .clone()
            .ok_or(EventInfoError::MissingConditionId)?;

        Ok(EventInfo {
            title: self.title.clone().unwrap_or_default(),
            slug: slug.to_string(),
            start_time,
            end_time,
            start_ts,
            end_ts,
            condition_id,
        })
    }
}
