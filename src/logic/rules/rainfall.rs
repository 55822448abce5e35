use super::{Conditions, IrrigationRule};
use crate::models::Advisory;

/// Rainfall bands, checked before any temperature rule
///
/// Bands (mm):
/// - VeryHeavyRain: > 50
/// - ModerateRain: 20 < r <= 50
/// - LightRain: 5 < r <= 20
///
/// Rainfall of 5 mm or less, or no rainfall figure at all, leaves the
/// decision to the temperature rules.
pub struct RainfallRule;

impl IrrigationRule for RainfallRule {
    fn id(&self) -> &'static str {
        "rainfall"
    }

    fn name(&self) -> &'static str {
        "Recent Rainfall"
    }

    fn evaluate(&self, conditions: &Conditions) -> Option<Advisory> {
        let rainfall = conditions.rainfall_mm?;

        if rainfall > 50.0 {
            Some(Advisory::VeryHeavyRain)
        } else if rainfall > 20.0 {
            Some(Advisory::ModerateRain)
        } else if rainfall > 5.0 {
            Some(Advisory::LightRain)
        } else {
            // Negligible rain: fall through
            None
        }
    }
}
