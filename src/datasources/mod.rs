pub mod geolocation;
pub mod openweathermap;

pub use geolocation::IpLocationClient;
pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::WeatherReading;

/// Source of current conditions for a named city
pub trait WeatherSource {
    async fn fetch_current(&self, city: &str) -> Result<WeatherReading>;
}

/// Best-effort lookup of the user's city
pub trait LocationDetector {
    async fn detect_city(&self) -> Result<String>;
}
