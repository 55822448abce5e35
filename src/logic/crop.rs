use crate::classifiers::CropClassifier;
use crate::models::{CropFeatures, CropOutcome, ForecastSummary, SeasonalSuggestion};

/// Days of one label needed before the forecast counts as wet or cloudy
const DOMINANT_DAYS: u32 = 15;

/// Rule-based crop families from the label tallies alone.
pub fn seasonal_suggestion(summary: &ForecastSummary) -> SeasonalSuggestion {
    if summary.rain_days >= DOMINANT_DAYS {
        SeasonalSuggestion::WetSeason
    } else if summary.clouds_days >= DOMINANT_DAYS {
        SeasonalSuggestion::CloudySeason
    } else {
        SeasonalSuggestion::DrySeason
    }
}

/// Ask the crop model for a recommendation. A failing model never aborts
/// the interaction; it is reported as `PredictionFailed`.
pub fn recommend_crop(classifier: &dyn CropClassifier, features: &CropFeatures) -> CropOutcome {
    match classifier.predict(features) {
        Ok(crop) => {
            tracing::debug!(crop = %crop, features = ?features.to_vector(), "Crop predicted");
            CropOutcome::Recommended(crop)
        }
        Err(e) => {
            tracing::warn!("Crop prediction failed: {}", e);
            CropOutcome::PredictionFailed(e.to_string())
        }
    }
}
