use super::{
    rainfall::RainfallRule,
    temperature::{CoolWeatherRule, HeatRule, ModerateTemperatureRule},
    Conditions, IrrigationRule,
};
use crate::models::Advisory;

pub struct IrrigationEngine {
    rules: Vec<Box<dyn IrrigationRule>>,
}

impl IrrigationEngine {
    pub fn new() -> Self {
        // Order matters: first match wins
        let rules: Vec<Box<dyn IrrigationRule>> = vec![
            Box::new(RainfallRule),
            Box::new(HeatRule),
            Box::new(ModerateTemperatureRule),
            Box::new(CoolWeatherRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, conditions: &Conditions) -> Advisory {
        self.rules
            .iter()
            .find_map(|rule| {
                let advisory = rule.evaluate(conditions)?;
                tracing::debug!(rule = rule.id(), advisory = advisory.as_str(), "Rule matched");
                Some(advisory)
            })
            // Only reachable above 32°C with humidity >= 40%
            .unwrap_or(Advisory::InsufficientInformation)
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for IrrigationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Irrigation advisory for a single observation.
pub fn advise(temperature_c: f64, humidity_percent: f64, rainfall_mm: Option<f64>) -> Advisory {
    IrrigationEngine::new().evaluate(&Conditions::new(
        temperature_c,
        humidity_percent,
        rainfall_mm,
    ))
}
