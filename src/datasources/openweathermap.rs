use super::WeatherSource;
use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, SmartFarmError};
use crate::models::WeatherReading;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self, city: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/weather", self.config.base_url.trim_end_matches('/')),
            &[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| SmartFarmError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    /// Fetch current conditions in metric units
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherReading> {
        let url = self.current_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                SmartFarmError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => SmartFarmError::DataSourceUnavailable(format!(
                    "OpenWeatherMap could not find city '{}'",
                    city
                )),
                StatusCode::UNAUTHORIZED => SmartFarmError::DataSourceUnavailable(
                    "OpenWeatherMap rejected the API key".into(),
                ),
                _ => SmartFarmError::DataSourceUnavailable(format!(
                    "OpenWeatherMap returned {}: {}",
                    status, body
                )),
            });
        }

        let owm: OwmCurrentResponse = response.json().await.map_err(|e| {
            SmartFarmError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        tracing::debug!(
            city = %owm.name,
            temp = owm.main.temp,
            humidity = owm.main.humidity,
            "Fetched current weather"
        );

        Ok(WeatherReading::new(owm.name, owm.main.temp, owm.main.humidity))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, city: &str) -> Result<bool> {
        let url = self.current_url(city)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                SmartFarmError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

impl WeatherSource for OpenWeatherMapClient {
    async fn fetch_current(&self, city: &str) -> Result<WeatherReading> {
        OpenWeatherMapClient::fetch_current(self, city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenWeatherMapClient {
        OpenWeatherMapClient::new(OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn fetch_current_parses_metric_reading() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "São Paulo"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "São Paulo",
                "main": { "temp": 27.4, "feels_like": 29.0, "humidity": 62 },
                "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds" }]
            })))
            .mount(&server)
            .await;

        let reading = client_for(&server).fetch_current("São Paulo").await.unwrap();

        assert_eq!(reading.city, "São Paulo");
        assert_eq!(reading.temperature_c, 27.4);
        assert_eq!(reading.humidity_percent, 62.0);
        assert_eq!(reading.rainfall_mm, None);
    }

    #[tokio::test]
    async fn unknown_city_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current("Atlantis").await.unwrap_err();
        match err {
            SmartFarmError::DataSourceUnavailable(msg) => assert!(msg.contains("Atlantis")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_api_key_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current("Lima").await.unwrap_err();
        assert!(matches!(err, SmartFarmError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current("Lima").await.unwrap_err();
        assert!(matches!(err, SmartFarmError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_connection_reflects_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "London",
                "main": { "temp": 11.0, "humidity": 80 }
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).test_connection("London").await.unwrap());
    }
}
