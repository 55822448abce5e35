use super::crop::{recommend_crop, seasonal_suggestion};
use super::{advise, aggregate, synthesize};
use crate::classifiers::Models;
use crate::datasources::{LocationDetector, WeatherSource};
use crate::error::{Result, SmartFarmError};
use crate::models::{
    Advisory, AdvisoryMode, CropFeatures, CropOutcome, ForecastDay, ForecastSummary,
    SeasonalSuggestion, SoilProfile, SoilTable, WeatherReading,
};
use chrono::{Datelike, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    AutoDetect,
}

#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub mode: AdvisoryMode,
    pub location: LocationQuery,
    pub soil: Option<String>,
    pub rainfall_mm: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IrrigationReport {
    pub reading: WeatherReading,
    pub advisory: Advisory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropReport {
    pub reading: WeatherReading,
    pub soil: SoilProfile,
    pub irrigation: Advisory,
    pub forecast: ForecastOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Predicted {
        days: Vec<ForecastDay>,
        summary: ForecastSummary,
        seasonal: SeasonalSuggestion,
        features: CropFeatures,
        crop: CropOutcome,
    },
    PredictionFailed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AdvisoryReport {
    Irrigation(IrrigationReport),
    Crop(CropReport),
}

/// Owns every collaborator one interaction needs. Built once by `main`.
pub struct Advisor<W, L> {
    weather: W,
    location: Option<L>,
    models: Option<Models>,
    soils: SoilTable,
    seed: Option<u64>,
}

impl<W: WeatherSource, L: LocationDetector> Advisor<W, L> {
    pub fn new(weather: W, soils: SoilTable) -> Self {
        Self {
            weather,
            location: None,
            models: None,
            soils,
            seed: None,
        }
    }

    pub fn with_location(mut self, detector: L) -> Self {
        self.location = Some(detector);
        self
    }

    pub fn with_models(mut self, models: Models) -> Self {
        self.models = Some(models);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn soils(&self) -> &SoilTable {
        &self.soils
    }

    pub fn can_detect_location(&self) -> bool {
        self.location.is_some()
    }

    pub async fn run(&self, request: &AdvisoryRequest) -> Result<AdvisoryReport> {
        tracing::debug!(mode = %request.mode, "Handling advisory request");
        match request.mode {
            AdvisoryMode::IrrigationAdvice => self
                .handle_irrigation(request)
                .await
                .map(AdvisoryReport::Irrigation),
            AdvisoryMode::CropRecommendation => {
                self.handle_crop(request).await.map(AdvisoryReport::Crop)
            }
        }
    }

    async fn handle_irrigation(&self, request: &AdvisoryRequest) -> Result<IrrigationReport> {
        validate_rainfall(request.rainfall_mm)?;

        let reading = self
            .current_reading(&request.location)
            .await?
            .with_rainfall(request.rainfall_mm);
        let advisory = irrigation_advice(&reading);

        Ok(IrrigationReport { reading, advisory })
    }

    async fn handle_crop(&self, request: &AdvisoryRequest) -> Result<CropReport> {
        validate_rainfall(request.rainfall_mm)?;

        let soil_name = request.soil.as_deref().ok_or_else(|| {
            SmartFarmError::InvalidInput(format!(
                "A soil type is required. Available: {}",
                self.soils.names().join(", ")
            ))
        })?;
        let soil = self.soils.require(soil_name)?.clone();

        let models = self.models.as_ref().ok_or_else(|| {
            SmartFarmError::Config("Crop recommendation needs the weather and crop models".into())
        })?;

        let reading = self
            .current_reading(&request.location)
            .await?
            .with_rainfall(request.rainfall_mm);
        let irrigation = irrigation_advice(&reading);
        let forecast = self.forecast(&reading, &soil, models)?;

        Ok(CropReport {
            reading,
            soil,
            irrigation,
            forecast,
        })
    }

    /// Synthesize, label and aggregate the next month, then ask the crop
    /// model. Model failures become `PredictionFailed` outcomes.
    fn forecast(
        &self,
        reading: &WeatherReading,
        soil: &SoilProfile,
        models: &Models,
    ) -> Result<ForecastOutcome> {
        let mut rng = self.rng();
        let month = Local::now().month();

        let synthetic = synthesize(
            reading.temperature_c,
            reading.humidity_percent,
            month,
            &mut rng,
        )?;

        let days = match models.weather.classify_days(&synthetic) {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!("Weather prediction failed: {}", e);
                return Ok(ForecastOutcome::PredictionFailed {
                    reason: e.to_string(),
                });
            }
        };

        let summary = aggregate(&days);
        tracing::debug!(
            clear = summary.clear_days,
            clouds = summary.clouds_days,
            rain = summary.rain_days,
            rainfall_mm = summary.estimated_rainfall_mm,
            "Forecast aggregated"
        );

        let seasonal = seasonal_suggestion(&summary);
        let features = CropFeatures::from_forecast(soil, &summary);
        let crop = recommend_crop(models.crop.as_ref(), &features);

        Ok(ForecastOutcome::Predicted {
            days,
            summary,
            seasonal,
            features,
            crop,
        })
    }

    async fn current_reading(&self, location: &LocationQuery) -> Result<WeatherReading> {
        let city = self.resolve_city(location).await?;
        tracing::info!("Fetching current weather for {}", city);
        self.weather.fetch_current(&city).await
    }

    /// Turn the user's location choice into a city name. An empty city is
    /// rejected before anything leaves the process.
    pub async fn resolve_city(&self, location: &LocationQuery) -> Result<String> {
        match location {
            LocationQuery::City(city) => {
                let city = city.trim();
                if city.is_empty() {
                    return Err(SmartFarmError::InvalidInput(
                        "Please enter a city name".into(),
                    ));
                }
                Ok(city.to_string())
            }
            LocationQuery::AutoDetect => match self.location {
                Some(ref detector) => detector.detect_city().await,
                None => Err(SmartFarmError::LocationUnavailable(
                    "location detection is disabled".into(),
                )),
            },
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn irrigation_advice(reading: &WeatherReading) -> Advisory {
    advise(
        reading.temperature_c,
        reading.humidity_percent,
        reading.rainfall_mm,
    )
}

fn validate_rainfall(rainfall_mm: Option<f64>) -> Result<()> {
    match rainfall_mm {
        Some(r) if !r.is_finite() || r < 0.0 => Err(SmartFarmError::InvalidInput(format!(
            "Rainfall must be a non-negative number of millimetres, got {}",
            r
        ))),
        _ => Ok(()),
    }
}
