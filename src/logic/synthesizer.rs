use crate::error::{Result, SmartFarmError};
use crate::models::{SyntheticDay, FORECAST_DAYS};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Spread of synthetic temperatures around the current reading (°C)
pub const TEMPERATURE_STDDEV: f64 = 2.0;

/// Spread of synthetic humidity around the current reading (%)
pub const HUMIDITY_STDDEV: f64 = 5.0;

/// Generate `FORECAST_DAYS` synthetic days centred on the current reading.
///
/// Temperature ~ N(current, 2) and humidity ~ N(current, 5). Values are not
/// clamped, so humidity can land outside 0-100 at the tails.
pub fn synthesize<R: Rng + ?Sized>(
    current_temp_c: f64,
    current_humidity_percent: f64,
    month: u32,
    rng: &mut R,
) -> Result<Vec<SyntheticDay>> {
    let temperature = Normal::new(current_temp_c, TEMPERATURE_STDDEV).map_err(|e| {
        SmartFarmError::InvalidInput(format!("temperature {}: {}", current_temp_c, e))
    })?;
    let humidity = Normal::new(current_humidity_percent, HUMIDITY_STDDEV).map_err(|e| {
        SmartFarmError::InvalidInput(format!("humidity {}: {}", current_humidity_percent, e))
    })?;

    let days = (1..=FORECAST_DAYS)
        .map(|day| SyntheticDay {
            day,
            month,
            temperature_c: temperature.sample(rng),
            humidity_percent: humidity.sample(rng),
        })
        .collect();

    Ok(days)
}
