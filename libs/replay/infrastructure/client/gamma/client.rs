use super::types::{Event, EventInfoError};
use crate::domain::EventInfo;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default Gamma API base URL
pub const GAMMA_API_BASE_URL: &str = "https://gamma-api.polymarket.com";

#[derive(Error, Debug)]
pub enum GammaError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] EventInfoError),
}

pub type Result<T> = std::result::Result<T, GammaError>;

/// Gamma Markets API client
pub struct GammaClient {
    base_url: String,
    client: Client,
}

impl GammaClient {
    /// Create new Gamma API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetch an event by its slug
    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Event> {
        let url = format!("{}/events/slug/{}", self.base_url, slug);

        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == 429 {
            warn!("Rate limit exceeded");
            return Err(GammaError::RateLimitExceeded);
        }

        if status == 404 {
            return Err(GammaError::NotFound(slug.to_string()));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GammaError::ApiError(format!(
                "Failed to fetch event ({}): {}",
                status, error_text
            )));
        }

        let event: Event = response
            .json()
            .await
            .map_err(|e| GammaError::DeserializeFailed(e.to_string()))?;

        Ok(event)
    }

    /// Fetch an event and resolve its time window and condition ID
    pub async fn get_event_info(&self, slug: &str) -> Result<EventInfo> {
        let event = self.get_event_by_slug(slug).await?;
        let info = event.to_event_info(slug)?;

        info!("Event: {}", info.title);
        info!(
            "Event window: {} ~ {} ({} seconds)",
            info.start_time,
            info.end_time,
            info.window().duration_secs()
        );
        info!("ConditionId: {}", info.condition_id);

        Ok(info)
    }
}
