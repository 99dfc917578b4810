use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    config::Config,
    models::entities::{Contractor, Employee, Seller},
};

#[async_trait]
pub trait Directory: Send + Sync {
    async fn find_seller_by_id(&self, id: i64) -> Result<Option<Seller>, Error>;

    async fn find_contractor_by_id(&self, id: i64) -> Result<Option<Contractor>, Error>;

    async fn find_employee_by_id(&self, id: i64) -> Result<Option<Employee>, Error>;
}

pub struct DirectoryClient {
    http_client: Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %config.directory_service_url, "Directory client initialized");

        Ok(Self {
            http_client,
            base_url: config.directory_service_url.clone(),
        })
    }

    async fn fetch_optional<T: DeserializeOwned>(&self, url: String) -> Result<Option<T>, Error> {
        let response = self.http_client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(anyhow!("Directory service returned status {}", status)),
        }
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn find_seller_by_id(&self, id: i64) -> Result<Option<Seller>, Error> {
        debug!(seller_id = id, "Looking up seller");

        self.fetch_optional(format!("{}/api/v1/sellers/{}", self.base_url, id))
            .await
    }

    async fn find_contractor_by_id(&self, id: i64) -> Result<Option<Contractor>, Error> {
        debug!(contractor_id = id, "Looking up contractor");

        self.fetch_optional(format!("{}/api/v1/contractors/{}", self.base_url, id))
            .await
    }

    async fn find_employee_by_id(&self, id: i64) -> Result<Option<Employee>, Error> {
        debug!(employee_id = id, "Looking up employee");

        self.fetch_optional(format!("{}/api/v1/employees/{}", self.base_url, id))
            .await
    }
}
