use serde::{Deserialize, Serialize};

/// Irrigation advisory category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    VeryHeavyRain,
    ModerateRain,
    LightRain,
    HeavyWatering,
    ModerateWatering,
    LightWatering,
    InsufficientInformation,
}

impl Advisory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advisory::VeryHeavyRain => "very_heavy_rain",
            Advisory::ModerateRain => "moderate_rain",
            Advisory::LightRain => "light_rain",
            Advisory::HeavyWatering => "heavy_watering",
            Advisory::ModerateWatering => "moderate_watering",
            Advisory::LightWatering => "light_watering",
            Advisory::InsufficientInformation => "insufficient_information",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Advisory::VeryHeavyRain => "Very heavy rain. No irrigation needed for the next few days.",
            Advisory::ModerateRain => "Moderate rain. Minimal irrigation needed today.",
            Advisory::LightRain => "Light rain. Reduce watering by 50%.",
            Advisory::HeavyWatering => "High temp and low humidity. Water heavily (25 L/sq.m).",
            Advisory::ModerateWatering => "Moderate temp. Water moderately (15–20 L/sq.m).",
            Advisory::LightWatering => "Cool weather. Light watering (10 L/sq.m).",
            Advisory::InsufficientInformation => "Not enough information. Please check inputs.",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Advisory::VeryHeavyRain => "🌧",
            Advisory::ModerateRain => "🌦",
            Advisory::LightRain => "🌧",
            Advisory::HeavyWatering => "🔥",
            Advisory::ModerateWatering => "☀",
            Advisory::LightWatering => "❄",
            Advisory::InsufficientInformation => "?",
        }
    }

    /// Whether the advisory came from a rainfall band rather than temperature.
    pub fn is_rain_based(&self) -> bool {
        matches!(
            self,
            Advisory::VeryHeavyRain | Advisory::ModerateRain | Advisory::LightRain
        )
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.symbol(), self.message())
    }
}

/// What the user asked for in one interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryMode {
    CropRecommendation,
    IrrigationAdvice,
}

impl AdvisoryMode {
    pub const ALL: [AdvisoryMode; 2] = [
        AdvisoryMode::CropRecommendation,
        AdvisoryMode::IrrigationAdvice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryMode::CropRecommendation => "Crop Recommendation",
            AdvisoryMode::IrrigationAdvice => "Irrigation Advice",
        }
    }

    pub fn needs_soil(&self) -> bool {
        matches!(self, AdvisoryMode::CropRecommendation)
    }
}

impl std::fmt::Display for AdvisoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
