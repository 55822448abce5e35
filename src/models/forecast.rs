use super::weather::WeatherLabel;
use serde::{Deserialize, Serialize};

/// Number of days synthesized per forecast
pub const FORECAST_DAYS: u32 = 30;

/// Rainfall credited to each day predicted as rain
pub const RAIN_MM_PER_DAY: f64 = 8.0;

/// A forecast candidate before the weather classifier has labelled it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDay {
    pub day: u32,
    pub month: u32,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

impl SyntheticDay {
    /// Feature vector in the order the weather model was trained on:
    /// `[temperature, humidity, month, day]`.
    pub fn features(&self) -> [f64; 4] {
        [
            self.temperature_c,
            self.humidity_percent,
            self.month as f64,
            self.day as f64,
        ]
    }

    pub fn labelled(self, label: WeatherLabel) -> ForecastDay {
        ForecastDay {
            day: self.day,
            month: self.month,
            temperature_c: self.temperature_c,
            humidity_percent: self.humidity_percent,
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: u32,
    pub month: u32,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub label: WeatherLabel,
}

/// Scalar features derived from a labelled forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub clear_days: u32,
    pub clouds_days: u32,
    pub rain_days: u32,
    pub mean_temperature_c: f64,
    pub mean_humidity_percent: f64,
    pub estimated_rainfall_mm: f64,
}

impl ForecastSummary {
    pub fn total_days(&self) -> u32 {
        self.clear_days + self.clouds_days + self.rain_days
    }

    pub fn count(&self, label: WeatherLabel) -> u32 {
        match label {
            WeatherLabel::Clear => self.clear_days,
            WeatherLabel::Clouds => self.clouds_days,
            WeatherLabel::Rain => self.rain_days,
        }
    }

    /// Label with the most days; ties resolve to the wetter label.
    pub fn dominant_label(&self) -> WeatherLabel {
        WeatherLabel::ALL
            .into_iter()
            .max_by_key(|label| self.count(*label))
            .unwrap_or(WeatherLabel::Clear)
    }
}
