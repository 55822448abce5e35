use super::forecast::ForecastSummary;
use super::soil::SoilProfile;
use serde::{Deserialize, Serialize};

/// Input row for the crop classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropFeatures {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub ph: f64,
    pub rainfall_mm: f64,
}

impl CropFeatures {
    pub fn from_forecast(soil: &SoilProfile, summary: &ForecastSummary) -> Self {
        Self {
            nitrogen: soil.nitrogen,
            phosphorus: soil.phosphorus,
            potassium: soil.potassium,
            temperature_c: summary.mean_temperature_c,
            humidity_percent: summary.mean_humidity_percent,
            ph: soil.ph,
            rainfall_mm: summary.estimated_rainfall_mm,
        }
    }

    /// `[N, P, K, temperature, humidity, pH, rainfall]`, the crop model's
    /// training column order.
    pub fn to_vector(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature_c,
            self.humidity_percent,
            self.ph,
            self.rainfall_mm,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum CropOutcome {
    Recommended(String),
    PredictionFailed(String),
}

/// Crop families suggested from the forecast tallies alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalSuggestion {
    WetSeason,
    CloudySeason,
    DrySeason,
}

impl SeasonalSuggestion {
    pub fn crops(&self) -> &'static str {
        match self {
            SeasonalSuggestion::WetSeason => "Rice, Leafy Vegetables",
            SeasonalSuggestion::CloudySeason => "Maize, Tomatoes",
            SeasonalSuggestion::DrySeason => "Millet, Sorghum (dry-season crops)",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            SeasonalSuggestion::WetSeason => "🌾",
            SeasonalSuggestion::CloudySeason => "🌽",
            SeasonalSuggestion::DrySeason => "🍠",
        }
    }
}

impl std::fmt::Display for SeasonalSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Based on weather: Suggest {}", self.symbol(), self.crops())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_order_is_npk_temp_humidity_ph_rain() {
        let soil = SoilProfile::new("Clay", 50.0, 40.0, 45.0, 6.0);
        let summary = ForecastSummary {
            clear_days: 10,
            clouds_days: 5,
            rain_days: 15,
            mean_temperature_c: 27.5,
            mean_humidity_percent: 68.0,
            estimated_rainfall_mm: 120.0,
        };

        let features = CropFeatures::from_forecast(&soil, &summary);
        assert_eq!(
            features.to_vector(),
            [50.0, 40.0, 45.0, 27.5, 68.0, 6.0, 120.0]
        );
    }

    #[test]
    fn seasonal_display() {
        assert_eq!(
            SeasonalSuggestion::CloudySeason.to_string(),
            "🌽 Based on weather: Suggest Maize, Tomatoes"
        );
    }
}
