use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one query, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl WeatherReading {
    pub fn new(city: impl Into<String>, temperature_c: f64, humidity_percent: f64) -> Self {
        Self {
            city: city.into(),
            temperature_c,
            humidity_percent,
            rainfall_mm: None,
            observed_at: Utc::now(),
        }
    }

    pub fn with_rainfall(mut self, rainfall_mm: Option<f64>) -> Self {
        self.rainfall_mm = rainfall_mm;
        self
    }
}

/// Daily weather category predicted by the weather classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherLabel {
    Clear,
    Clouds,
    Rain,
}

impl WeatherLabel {
    pub const ALL: [WeatherLabel; 3] = [WeatherLabel::Clear, WeatherLabel::Clouds, WeatherLabel::Rain];

    /// Class index as encoded when the weather model was trained.
    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WeatherLabel::Clear),
            1 => Some(WeatherLabel::Clouds),
            2 => Some(WeatherLabel::Rain),
            _ => None,
        }
    }

    /// Accepts label names or the numeric class ids a model may carry.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_class_index(index);
        }
        match s.as_str() {
            "clear" => Some(WeatherLabel::Clear),
            "clouds" | "cloudy" => Some(WeatherLabel::Clouds),
            "rain" | "rainy" => Some(WeatherLabel::Rain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherLabel::Clear => "clear",
            WeatherLabel::Clouds => "clouds",
            WeatherLabel::Rain => "rain",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherLabel::Clear => "☀",
            WeatherLabel::Clouds => "☁",
            WeatherLabel::Rain => "🌧",
        }
    }
}

impl std::fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
