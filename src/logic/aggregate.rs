use crate::models::{ForecastDay, ForecastSummary, WeatherLabel, RAIN_MM_PER_DAY};

/// Tally labelled days and derive the crop model's weather features.
///
/// Labels that never occur count as zero. Means are taken over the synthetic
/// samples, not the reading they were generated from.
pub fn aggregate(days: &[ForecastDay]) -> ForecastSummary {
    let count = |label: WeatherLabel| days.iter().filter(|d| d.label == label).count() as u32;

    let clear_days = count(WeatherLabel::Clear);
    let clouds_days = count(WeatherLabel::Clouds);
    let rain_days = count(WeatherLabel::Rain);

    let n = days.len().max(1) as f64;
    let mean_temperature_c = days.iter().map(|d| d.temperature_c).sum::<f64>() / n;
    let mean_humidity_percent = days.iter().map(|d| d.humidity_percent).sum::<f64>() / n;

    ForecastSummary {
        clear_days,
        clouds_days,
        rain_days,
        mean_temperature_c,
        mean_humidity_percent,
        estimated_rainfall_mm: estimated_rainfall(rain_days),
    }
}

/// Rainfall heuristic: a fixed amount per predicted rain day
pub fn estimated_rainfall(rain_days: u32) -> f64 {
    rain_days as f64 * RAIN_MM_PER_DAY
}
