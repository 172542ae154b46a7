//! Resend email adapter.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{Notification, NotificationError, Notifier};

use super::templates::{render, EmailSettings};

#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    /// `Name <address>` sender.
    pub from: String,
    pub api_base_url: String,
    pub settings: EmailSettings,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>, settings: EmailSettings) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from: from.into(),
            api_base_url: "https://api.resend.com".to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

pub struct ResendNotifier {
    config: ResendConfig,
    client: reqwest::Client,
}

impl ResendNotifier {
    pub fn new(config: ResendConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        let emails = render(&notification, &self.config.settings);
        let url = format!("{}/emails", self.config.api_base_url);
        let mut failures = Vec::new();

        // Each recipient is attempted even if an earlier one failed.
        for email in &emails {
            let body = SendEmailBody {
                from: &self.config.from,
                to: [&email.to],
                subject: &email.subject,
                text: &email.text,
            };

            let result = self
                .client
                .post(&url)
                .bearer_auth(self.config.api_key.expose_secret())
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(kind = notification.kind(), subject = %email.subject, "Email sent");
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();
                    tracing::error!(kind = notification.kind(), %status, detail = %detail, "Resend rejected email");
                    failures.push(format!("{}: {}", status, detail));
                }
                Err(e) => {
                    tracing::error!(kind = notification.kind(), error = %e, "Email request failed");
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotificationError(failures.join("; ")))
        }
    }
}
