use super::{Conditions, IrrigationRule};
use crate::models::Advisory;

/// Hot, dry air: temperature above 32°C with humidity below 40%.
/// Recommends 25 L/sq.m.
pub struct HeatRule;

impl IrrigationRule for HeatRule {
    fn id(&self) -> &'static str {
        "heat"
    }

    fn name(&self) -> &'static str {
        "High Temperature, Low Humidity"
    }

    fn evaluate(&self, conditions: &Conditions) -> Option<Advisory> {
        (conditions.temperature_c > 32.0 && conditions.humidity_percent < 40.0)
            .then_some(Advisory::HeavyWatering)
    }
}

/// 25-32°C inclusive, regardless of humidity. Recommends 15-20 L/sq.m.
pub struct ModerateTemperatureRule;

impl IrrigationRule for ModerateTemperatureRule {
    fn id(&self) -> &'static str {
        "moderate_temperature"
    }

    fn name(&self) -> &'static str {
        "Moderate Temperature"
    }

    fn evaluate(&self, conditions: &Conditions) -> Option<Advisory> {
        (25.0..=32.0)
            .contains(&conditions.temperature_c)
            .then_some(Advisory::ModerateWatering)
    }
}

/// Below 25°C. Recommends 10 L/sq.m.
pub struct CoolWeatherRule;

impl IrrigationRule for CoolWeatherRule {
    fn id(&self) -> &'static str {
        "cool_weather"
    }

    fn name(&self) -> &'static str {
        "Cool Weather"
    }

    fn evaluate(&self, conditions: &Conditions) -> Option<Advisory> {
        (conditions.temperature_c < 25.0).then_some(Advisory::LightWatering)
    }
}
