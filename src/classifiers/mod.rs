pub mod tree;

pub use tree::TreeEnsemble;

use crate::config::ModelsConfig;
use crate::error::{Result, SmartFarmError};
use crate::models::{CropFeatures, ForecastDay, SyntheticDay, WeatherLabel};

const WEATHER_FEATURES: usize = 4;
const CROP_FEATURES: usize = 7;

/// Pre-trained model labelling one day as clear, clouds or rain.
///
/// Implementations receive features as `[temperature, humidity, month, day]`
/// via [`SyntheticDay::features`].
pub trait WeatherClassifier: Send + Sync {
    fn classify(&self, day: &SyntheticDay) -> Result<WeatherLabel>;

    /// Label a whole batch. Stops at the first failing day.
    fn classify_days(&self, days: &[SyntheticDay]) -> Result<Vec<ForecastDay>> {
        days.iter()
            .map(|day| Ok(day.labelled(self.classify(day)?)))
            .collect()
    }
}

/// Pre-trained model picking a crop from soil and weather features.
///
/// Implementations receive features as `[N, P, K, temperature, humidity, pH,
/// rainfall]` via [`CropFeatures::to_vector`].
pub trait CropClassifier: Send + Sync {
    fn predict(&self, features: &CropFeatures) -> Result<String>;
}

/// The two pre-trained models a crop recommendation needs
pub struct Models {
    pub weather: Box<dyn WeatherClassifier>,
    pub crop: Box<dyn CropClassifier>,
}

impl Models {
    pub fn new(weather: Box<dyn WeatherClassifier>, crop: Box<dyn CropClassifier>) -> Self {
        Self { weather, crop }
    }

    pub fn load(config: &ModelsConfig) -> Result<Self> {
        let weather = TreeEnsemble::load(&config.weather)?;
        let crop = TreeEnsemble::load(&config.crop)?;

        // Catch swapped or stale model files before the first prediction
        for (name, model, expected) in [
            ("weather", &weather, WEATHER_FEATURES),
            ("crop", &crop, CROP_FEATURES),
        ] {
            if model.n_features() != expected {
                return Err(SmartFarmError::Model(format!(
                    "{} model takes {} features, expected {}",
                    name,
                    model.n_features(),
                    expected
                )));
            }
        }

        tracing::info!(
            "Loaded models: weather={} crop={} ({} crops)",
            config.weather.display(),
            config.crop.display(),
            crop.classes().len()
        );
        Ok(Self::new(Box::new(weather), Box::new(crop)))
    }
}

impl WeatherClassifier for TreeEnsemble {
    fn classify(&self, day: &SyntheticDay) -> Result<WeatherLabel> {
        let class = self.predict(&day.features())?;
        WeatherLabel::from_str(class).ok_or_else(|| {
            SmartFarmError::Prediction(format!("weather model returned unknown class '{}'", class))
        })
    }
}

impl CropClassifier for TreeEnsemble {
    fn predict(&self, features: &CropFeatures) -> Result<String> {
        TreeEnsemble::predict(self, &features.to_vector()).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_model(classes: serde_json::Value) -> TreeEnsemble {
        // humidity <= 70 -> clear, <= 85 -> clouds, else rain
        TreeEnsemble::from_json(
            &json!({
                "n_features": 4,
                "classes": classes,
                "trees": [{ "nodes": [
                    { "feature": 1, "threshold": 70.0, "left": 1, "right": 2 },
                    { "value": [1.0, 0.0, 0.0] },
                    { "feature": 1, "threshold": 85.0, "left": 3, "right": 4 },
                    { "value": [0.0, 1.0, 0.0] },
                    { "value": [0.0, 0.0, 1.0] }
                ]}]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn sample(humidity_percent: f64) -> SyntheticDay {
        SyntheticDay {
            day: 1,
            month: 7,
            temperature_c: 25.0,
            humidity_percent,
        }
    }

    #[test]
    fn tree_weather_classifier_maps_names() {
        let model = weather_model(json!(["clear", "clouds", "rain"]));
        assert_eq!(model.classify(&sample(60.0)).unwrap(), WeatherLabel::Clear);
        assert_eq!(model.classify(&sample(80.0)).unwrap(), WeatherLabel::Clouds);
        assert_eq!(model.classify(&sample(95.0)).unwrap(), WeatherLabel::Rain);
    }

    #[test]
    fn tree_weather_classifier_maps_class_ids() {
        let model = weather_model(json!(["0", "1", "2"]));
        assert_eq!(model.classify(&sample(95.0)).unwrap(), WeatherLabel::Rain);
    }

    #[test]
    fn unknown_weather_class_is_prediction_error() {
        let model = weather_model(json!(["clear", "fog", "rain"]));
        let err = model.classify(&sample(80.0)).unwrap_err();
        assert!(matches!(err, SmartFarmError::Prediction(_)));
    }

    #[test]
    fn classify_days_keeps_order() {
        let model = weather_model(json!(["clear", "clouds", "rain"]));
        let days: Vec<_> = [50.0, 90.0, 75.0]
            .into_iter()
            .enumerate()
            .map(|(i, h)| SyntheticDay {
                day: i as u32 + 1,
                ..sample(h)
            })
            .collect();

        let labelled = model.classify_days(&days).unwrap();
        let labels: Vec<_> = labelled.iter().map(|d| d.label).collect();
        assert_eq!(
            labels,
            vec![WeatherLabel::Clear, WeatherLabel::Rain, WeatherLabel::Clouds]
        );
        assert_eq!(labelled[2].day, 3);
    }

    #[test]
    fn bundled_models_load() {
        let models = Models::load(&ModelsConfig::default()).unwrap();
        let day = sample(90.0);
        assert!(models.weather.classify(&day).is_ok());
    }

    #[test]
    fn swapped_model_paths_are_rejected() {
        let defaults = ModelsConfig::default();
        let swapped = ModelsConfig {
            weather: defaults.crop,
            crop: defaults.weather,
        };
        assert!(matches!(
            Models::load(&swapped),
            Err(SmartFarmError::Model(_))
        ));
    }

    #[test]
    fn weather_model_rejected_as_crop_model() {
        let model = weather_model(json!(["clear", "clouds", "rain"]));
        let features = CropFeatures {
            nitrogen: 60.0,
            phosphorus: 50.0,
            potassium: 50.0,
            temperature_c: 25.0,
            humidity_percent: 70.0,
            ph: 6.5,
            rainfall_mm: 80.0,
        };
        let err = CropClassifier::predict(&model, &features).unwrap_err();
        assert!(matches!(err, SmartFarmError::Prediction(_)));
    }
}
