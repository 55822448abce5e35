use crate::error::{Result, SmartFarmError};
use serde::{Deserialize, Serialize};

/// Nutrient profile of a soil type. N, P and K are in kg/ha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub name: String,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
}

impl SoilProfile {
    pub fn new(name: &str, nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64) -> Self {
        Self {
            name: name.to_string(),
            nitrogen,
            phosphorus,
            potassium,
            ph,
        }
    }
}

/// Built-in soil catalog used when the config does not override it.
pub fn default_soils() -> Vec<SoilProfile> {
    vec![
        SoilProfile::new("Sand", 20.0, 10.0, 15.0, 6.5),
        SoilProfile::new("Clay", 50.0, 40.0, 45.0, 6.0),
        SoilProfile::new("Loam", 60.0, 50.0, 50.0, 6.5),
        SoilProfile::new("Chalk", 25.0, 15.0, 20.0, 7.5),
        SoilProfile::new("Peat", 80.0, 60.0, 70.0, 5.5),
        SoilProfile::new("Silt", 55.0, 45.0, 40.0, 6.3),
    ]
}

/// Soil lookup keyed by case-insensitive name
#[derive(Debug, Clone)]
pub struct SoilTable {
    profiles: Vec<SoilProfile>,
}

impl SoilTable {
    pub fn new(profiles: Vec<SoilProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(SmartFarmError::Config(
                "Soil table must contain at least one entry".into(),
            ));
        }

        for (i, profile) in profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(SmartFarmError::Config(format!(
                    "Soil entry {} has an empty name",
                    i + 1
                )));
            }

            let values = [
                profile.nitrogen,
                profile.phosphorus,
                profile.potassium,
                profile.ph,
            ];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(SmartFarmError::Config(format!(
                    "Soil '{}' has a non-numeric value",
                    profile.name
                )));
            }

            let duplicate = profiles[..i]
                .iter()
                .any(|p| p.name.eq_ignore_ascii_case(&profile.name));
            if duplicate {
                return Err(SmartFarmError::Config(format!(
                    "Soil '{}' is defined more than once",
                    profile.name
                )));
            }
        }

        Ok(Self { profiles })
    }

    pub fn get(&self, name: &str) -> Option<&SoilProfile> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Look up a soil, failing with the list of known names.
    pub fn require(&self, name: &str) -> Result<&SoilProfile> {
        self.get(name).ok_or_else(|| {
            SmartFarmError::InvalidInput(format!(
                "Unknown soil type '{}'. Available: {}",
                name.trim(),
                self.names().join(", ")
            ))
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn profiles(&self) -> &[SoilProfile] {
        &self.profiles
    }
}

impl Default for SoilTable {
    fn default() -> Self {
        Self {
            profiles: default_soils(),
        }
    }
}
