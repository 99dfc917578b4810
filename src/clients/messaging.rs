use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{config::Config, models::message::OutboundMessage};

/// Extra routing data attached to client-facing dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchContext {
    pub client_id: i64,
    pub status_code: i64,
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Outbound "from" address configured for the reseller; empty when
    /// none is configured.
    async fn reseller_from_address(&self, reseller_id: i64) -> Result<String, Error>;

    /// Employee addresses permitted to receive the given event.
    async fn permitted_employee_emails(
        &self,
        reseller_id: i64,
        event_key: &str,
    ) -> Result<Vec<String>, Error>;

    async fn dispatch_messages(
        &self,
        messages: &[OutboundMessage],
        reseller_id: i64,
        event_kind: &str,
        context: Option<DispatchContext>,
    ) -> Result<(), Error>;
}

pub struct MessagingGatewayClient {
    http_client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct FromAddress {
    address: String,
}

#[derive(Deserialize)]
struct PermittedEmails {
    emails: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DispatchRequest<'a> {
    messages: &'a [OutboundMessage],
    reseller_id: i64,
    event_kind: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<DispatchContext>,
}

impl MessagingGatewayClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.messaging_gateway_url, "Messaging gateway client initialized");

        Ok(Self {
            http_client,
            base_url: config.messaging_gateway_url.clone(),
        })
    }
}

#[async_trait]
impl MessagingGateway for MessagingGatewayClient {
    async fn reseller_from_address(&self, reseller_id: i64) -> Result<String, Error> {
        debug!(reseller_id, "Fetching reseller from-address");

        let url = format!(
            "{}/api/v1/resellers/{}/from-address",
            self.base_url, reseller_id
        );

        let response = self.http_client.get(&url).send().await?;

        match response.status() {
            // An unconfigured sender is not an error, it just disables email
            StatusCode::NOT_FOUND => Ok(String::new()),
            status if status.is_success() => {
                let from: FromAddress = response.json().await?;
                Ok(from.address)
            }
            status => Err(anyhow!("Messaging gateway returned status {}", status)),
        }
    }

    async fn permitted_employee_emails(
        &self,
        reseller_id: i64,
        event_key: &str,
    ) -> Result<Vec<String>, Error> {
        debug!(reseller_id, event_key, "Fetching permitted employee emails");

        let url = format!(
            "{}/api/v1/resellers/{}/permitted-emails",
            self.base_url, reseller_id
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("event", event_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Messaging gateway returned status {}", status));
        }

        let permitted: PermittedEmails = response.json().await?;
        Ok(permitted.emails)
    }

    async fn dispatch_messages(
        &self,
        messages: &[OutboundMessage],
        reseller_id: i64,
        event_kind: &str,
        context: Option<DispatchContext>,
    ) -> Result<(), Error> {
        debug!(
            reseller_id,
            event_kind,
            message_count = messages.len(),
            "Dispatching messages"
        );

        let url = format!("{}/api/v1/messages/dispatch", self.base_url);
        let request = DispatchRequest {
            messages,
            reseller_id,
            event_kind,
            context,
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Message dispatch failed: {} {}", status, error_text));
        }

        Ok(())
    }
}
