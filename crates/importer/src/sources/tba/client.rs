use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use storage::services::reconciliation::{FetchError, MatchBreakdown, MatchResultSource};
use tracing::debug;

use super::models::{TbaEvent, TbaMatch, TbaMatchSimple, TbaTeam};
use crate::error::{ImporterError, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";
const AUTH_HEADER: &str = "X-TBA-Auth-Key";

#[derive(Debug, Clone)]
pub struct TbaSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for TbaSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct TbaClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TbaClient {
    /// Fails with a configuration error when no API key is set
    pub fn new(settings: &TbaSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ImporterError::ConfigurationError("TBA_API_KEY is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    async fn send(&self, path: &str) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        self.client
            .get(&url)
            .header(AUTH_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(path).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::StatusError {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// One page of the team list; an empty page marks the end
    pub async fn fetch_team_page(&self, page: u32) -> Result<Vec<TbaTeam>> {
        self.get_json(&format!("/teams/{}/simple", page)).await
    }

    pub async fn fetch_events(&self, year: i32) -> Result<Vec<TbaEvent>> {
        self.get_json(&format!("/events/{}", year)).await
    }

    pub async fn fetch_event_teams(&self, event_key: &str) -> Result<Vec<TbaTeam>> {
        self.get_json(&format!("/event/{}/teams/simple", event_key)).await
    }

    pub async fn fetch_event_matches(&self, event_key: &str) -> Result<Vec<TbaMatchSimple>> {
        self.get_json(&format!("/event/{}/matches/simple", event_key)).await
    }
}

#[async_trait]
impl MatchResultSource for TbaClient {
    async fn fetch_match(&self, match_key: &str) -> std::result::Result<MatchBreakdown, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            key: match_key.to_string(),
            message: e.to_string(),
        };

        let response = self
            .send(&format!("/match/{}", match_key))
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(match_key.to_string())),
            status => {
                return Err(FetchError::Status {
                    key: match_key.to_string(),
                    status: status.as_u16(),
                });
            }
        }

        let tba_match = response.json::<TbaMatch>().await.map_err(transport)?;
        Ok(MatchBreakdown {
            key: tba_match.key,
            score_breakdown: tba_match.score_breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let settings = TbaSettings::default();
        assert!(matches!(
            TbaClient::new(&settings),
            Err(ImporterError::ConfigurationError(_))
        ));

        let blank = TbaSettings {
            api_key: Some("  ".to_string()),
            ..TbaSettings::default()
        };
        assert!(TbaClient::new(&blank).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let settings = TbaSettings {
            api_key: Some("key".to_string()),
            base_url: "http://localhost:8080/api/v3/".to_string(),
            timeout: Duration::from_secs(5),
        };
        let client = TbaClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api/v3");
    }
}
