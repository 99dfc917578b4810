use std::{collections::HashMap, time::Duration};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;

#[async_trait]
pub trait Localizer: Send + Sync {
    /// Renders the localized text for a template key in the reseller's
    /// configured language.
    async fn translate(
        &self,
        template_key: &str,
        params: &HashMap<String, Value>,
        reseller_id: i64,
    ) -> Result<String, Error>;

    async fn status_name_for(&self, code: i64) -> Result<String, Error>;
}

pub struct LocalizationClient {
    http_client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    template_key: &'a str,
    params: &'a HashMap<String, Value>,
    reseller_id: i64,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
}

#[derive(Deserialize)]
struct StatusName {
    name: String,
}

impl LocalizationClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.localization_service_url, "Localization client initialized");

        Ok(Self {
            http_client,
            base_url: config.localization_service_url.clone(),
        })
    }
}

#[async_trait]
impl Localizer for LocalizationClient {
    async fn translate(
        &self,
        template_key: &str,
        params: &HashMap<String, Value>,
        reseller_id: i64,
    ) -> Result<String, Error> {
        debug!(template_key, reseller_id, "Translating template key");

        let url = format!("{}/api/v1/translations", self.base_url);
        let request = TranslateRequest {
            template_key,
            params,
            reseller_id,
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Localization service returned status {}", status));
        }

        let translated: TranslatedText = response.json().await?;
        Ok(translated.text)
    }

    async fn status_name_for(&self, code: i64) -> Result<String, Error> {
        debug!(status_code = code, "Resolving status name");

        let url = format!("{}/api/v1/return-statuses/{}", self.base_url, code);

        let response = self.http_client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Localization service returned status {}", status));
        }

        let status_name: StatusName = response.json().await?;
        Ok(status_name.name)
    }
}
