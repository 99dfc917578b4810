use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{config::Config, models::template::TemplateData};

/// Outcome reported by the SMS manager. The error field is only present
/// when the manager explicitly returned one; it can accompany a
/// successful send.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmsDispatch {
    pub sent: bool,

    #[serde(default)]
    pub error: Option<String>,
}

#[async_trait]
pub trait SmsManager: Send + Sync {
    async fn send_client_notification(
        &self,
        reseller_id: i64,
        client_id: i64,
        event_kind: &str,
        status_code: i64,
        template: &TemplateData,
    ) -> Result<SmsDispatch, Error>;
}

pub struct SmsManagerClient {
    http_client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientNotificationRequest<'a> {
    reseller_id: i64,
    client_id: i64,
    event_kind: &'a str,
    status_code: i64,
    template: &'a TemplateData,
}

impl SmsManagerClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.sms_gateway_url, "SMS manager client initialized");

        Ok(Self {
            http_client,
            base_url: config.sms_gateway_url.clone(),
        })
    }
}

#[async_trait]
impl SmsManager for SmsManagerClient {
    async fn send_client_notification(
        &self,
        reseller_id: i64,
        client_id: i64,
        event_kind: &str,
        status_code: i64,
        template: &TemplateData,
    ) -> Result<SmsDispatch, Error> {
        debug!(reseller_id, client_id, event_kind, "Sending client SMS notification");

        let url = format!("{}/api/v1/notifications/client", self.base_url);
        let request = ClientNotificationRequest {
            reseller_id,
            client_id,
            event_kind,
            status_code,
            template,
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("SMS manager returned status {}", status));
        }

        let dispatch: SmsDispatch = response.json().await?;
        Ok(dispatch)
    }
}
