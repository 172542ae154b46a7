//! Zoom REST adapter implementing `MeetingProvider`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ZoomConfig::new(account_id, client_id, client_secret);
//! let zoom = ZoomMeetingAdapter::new(config, token_cache, clock)?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::booking::MeetingDetails;
use crate::ports::{
    CachedToken, Clock, MeetingError, MeetingErrorKind, MeetingProvider, MeetingRequest, TokenCache,
};

/// Tokens are treated as expired this many seconds early.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Clone)]
pub struct ZoomConfig {
    account_id: String,
    client_id: String,
    client_secret: SecretString,
    /// REST API base (default: https://api.zoom.us).
    pub api_base_url: String,
    /// OAuth base (default: https://zoom.us).
    pub oauth_base_url: String,
    pub timeout: Duration,
}

impl ZoomConfig {
    pub fn new(
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            api_base_url: "https://api.zoom.us".to_string(),
            oauth_base_url: "https://zoom.us".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_urls(mut self, api: impl Into<String>, oauth: impl Into<String>) -> Self {
        self.api_base_url = api.into().trim_end_matches('/').to_string();
        self.oauth_base_url = oauth.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn cache_key(&self) -> String {
        format!("zoom:{}", self.account_id)
    }
}

impl std::fmt::Debug for ZoomConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomConfig")
            .field("account_id", &self.account_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("oauth_base_url", &self.oauth_base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Serialize)]
struct CreateMeetingBody<'a> {
    topic: &'a str,
    #[serde(rename = "type")]
    meeting_type: u8,
    start_time: String,
    duration: u32,
    timezone: &'static str,
    settings: MeetingSettings,
}

#[derive(Debug, Serialize)]
struct MeetingSettings {
    host_video: bool,
    participant_video: bool,
    join_before_host: bool,
    mute_upon_entry: bool,
    watermark: bool,
    use_pmi: bool,
    approval_type: u8,
    audio: &'static str,
    auto_recording: &'static str,
    waiting_room: bool,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            host_video: true,
            participant_video: true,
            join_before_host: false,
            mute_upon_entry: false,
            watermark: false,
            use_pmi: false,
            approval_type: 0,
            audio: "both",
            auto_recording: "none",
            waiting_room: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ZoomMeeting {
    /// Numeric in practice; accepted as any JSON scalar.
    id: serde_json::Value,
    join_url: String,
    start_url: String,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ZoomErrorBody {
    message: Option<String>,
    reason: Option<String>,
}

pub struct ZoomMeetingAdapter {
    config: ZoomConfig,
    client: Client,
    tokens: Arc<dyn TokenCache>,
    clock: Arc<dyn Clock>,
}

impl ZoomMeetingAdapter {
    pub fn new(
        config: ZoomConfig,
        tokens: Arc<dyn TokenCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, MeetingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MeetingError::new(MeetingErrorKind::Network, format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            tokens,
            clock,
        })
    }

    /// Returns a cached token or fetches a new one.
    async fn access_token(&self) -> Result<SecretString, MeetingError> {
        let key = self.config.cache_key();
        let now = self.clock.now();

        match self.tokens.get(&key).await {
            Ok(Some(token)) if token.is_fresh(&now) => return Ok(token.value),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Token cache unavailable, fetching a new Zoom token"),
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        if let Err(e) = self.tokens.put(&key, token).await {
            tracing::warn!(error = %e, "Failed to cache Zoom token");
        }
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken, MeetingError> {
        let url = format!("{}/oauth/token", self.config.oauth_base_url);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .basic_auth(&self.config.client_id, Some(self.config.client_secret.expose_secret()))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ZoomErrorBody = response.json().await.unwrap_or_default();
            let detail = body.reason.or(body.message).unwrap_or_else(|| status.to_string());
            return Err(MeetingError::new(
                MeetingErrorKind::Authentication,
                format!("Failed to get Zoom access token: {}", detail),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            MeetingError::new(MeetingErrorKind::InvalidResponse, format!("Token response: {}", e))
        })?;

        let expires_at = self
            .clock
            .now()
            .plus_secs(token.expires_in - TOKEN_REFRESH_MARGIN_SECS);

        tracing::debug!(expires_in = token.expires_in, "Fetched Zoom access token");
        Ok(CachedToken::new(token.access_token, expires_at))
    }

    async fn post_meeting(
        &self,
        token: &SecretString,
        body: &CreateMeetingBody<'_>,
    ) -> Result<reqwest::Response, MeetingError> {
        self.client
            .post(format!("{}/v2/users/me/meetings", self.config.api_base_url))
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(request_error)
    }
}

fn request_error(e: reqwest::Error) -> MeetingError {
    if e.is_timeout() {
        MeetingError::new(MeetingErrorKind::Timeout, e.to_string())
    } else {
        MeetingError::new(MeetingErrorKind::Network, e.to_string())
    }
}

#[async_trait]
impl MeetingProvider for ZoomMeetingAdapter {
    async fn create_meeting(&self, request: &MeetingRequest) -> Result<MeetingDetails, MeetingError> {
        let body = CreateMeetingBody {
            topic: &request.topic,
            meeting_type: 2,
            start_time: request.start_time.to_rfc3339(),
            duration: request.duration_minutes,
            timezone: "UTC",
            settings: MeetingSettings::default(),
        };

        let token = self.access_token().await?;
        let mut response = self.post_meeting(&token, &body).await?;

        // A revoked token is retried once with a fresh one.
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(booking_id = %request.booking_id, "Zoom rejected cached token, refreshing");
            if let Err(e) = self.tokens.invalidate(&self.config.cache_key()).await {
                tracing::warn!(error = %e, "Failed to invalidate Zoom token");
            }
            let token = self.access_token().await?;
            response = self.post_meeting(&token, &body).await?;
        }

        if !response.status().is_success() {
            let status = response.status();
            let body: ZoomErrorBody = response.json().await.unwrap_or_default();
            let kind = if status == StatusCode::UNAUTHORIZED {
                MeetingErrorKind::Authentication
            } else {
                MeetingErrorKind::Provider
            };
            return Err(MeetingError::new(
                kind,
                format!(
                    "Zoom API error ({}): {}",
                    status.as_u16(),
                    body.message.unwrap_or_default()
                ),
            ));
        }

        let meeting: ZoomMeeting = response.json().await.map_err(|e| {
            MeetingError::new(MeetingErrorKind::InvalidResponse, format!("Meeting response: {}", e))
        })?;

        let meeting_id = match meeting.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };

        tracing::info!(
            booking_id = %request.booking_id,
            meeting_id = %meeting_id,
            "Created Zoom meeting"
        );

        Ok(MeetingDetails {
            join_url: meeting.join_url,
            host_url: meeting.start_url,
            meeting_id,
            passcode: meeting.password.filter(|p| !p.is_empty()),
        })
    }
}
