//! City lookup from the caller's public IP address.
//!
//! Any JSON endpoint returning a `city` field works (ipinfo.io, ipapi.co).

use super::LocationDetector;
use crate::config::GeolocationConfig;
use crate::error::{Result, SmartFarmError};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("smartfarm/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    city: Option<String>,
}

pub struct IpLocationClient {
    client: reqwest::Client,
    url: String,
}

impl IpLocationClient {
    pub fn new(config: &GeolocationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub async fn detect_city(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SmartFarmError::LocationUnavailable(format!("IP lookup: {}", e)))?;

        if !response.status().is_success() {
            return Err(SmartFarmError::LocationUnavailable(format!(
                "IP lookup returned {}",
                response.status()
            )));
        }

        let body: IpLocationResponse = response.json().await.map_err(|e| {
            SmartFarmError::LocationUnavailable(format!("Failed to parse IP lookup: {}", e))
        })?;

        match body.city.map(|c| c.trim().to_string()) {
            Some(city) if !city.is_empty() => {
                tracing::info!("Detected city: {}", city);
                Ok(city)
            }
            _ => Err(SmartFarmError::LocationUnavailable(
                "IP lookup did not return a city".into(),
            )),
        }
    }

    pub async fn test_connection(&self) -> bool {
        self.detect_city().await.is_ok()
    }
}

impl LocationDetector for IpLocationClient {
    async fn detect_city(&self) -> Result<String> {
        IpLocationClient::detect_city(self).await
    }
}
