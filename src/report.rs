//! Terminal and JSON rendering of advisory reports.

use crate::error::Result;
use crate::logic::advisor::{CropReport, ForecastOutcome, IrrigationReport};
use crate::logic::AdvisoryReport;
use crate::models::{CropOutcome, ForecastDay, SoilTable, WeatherLabel, WeatherReading};
use std::fmt::Write;

/// Output switches for one report
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub json: bool,
    pub show_days: bool,
}

pub fn render(report: &AdvisoryReport, options: RenderOptions) -> Result<String> {
    if options.json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    match report {
        AdvisoryReport::Irrigation(r) => render_irrigation(r),
        AdvisoryReport::Crop(r) => render_crop(r, options.show_days),
    }
}

fn render_irrigation(report: &IrrigationReport) -> Result<String> {
    let mut out = String::new();
    write_reading(&mut out, &report.reading)?;
    writeln!(out)?;
    writeln!(out, "Irrigation advice")?;
    writeln!(out, "  {}", report.advisory)?;
    if report.advisory.is_rain_based() {
        writeln!(out, "  (based on the reported rainfall)")?;
    }
    Ok(out)
}

fn render_crop(report: &CropReport, show_days: bool) -> Result<String> {
    let mut out = String::new();
    write_reading(&mut out, &report.reading)?;
    let soil = &report.soil;
    writeln!(
        out,
        "  Soil:        {} (N {} / P {} / K {}, pH {})",
        soil.name, soil.nitrogen, soil.phosphorus, soil.potassium, soil.ph
    )?;
    writeln!(out)?;
    writeln!(out, "Irrigation advice")?;
    writeln!(out, "  {}", report.irrigation)?;
    writeln!(out)?;

    match &report.forecast {
        ForecastOutcome::PredictionFailed { reason } => {
            writeln!(out, "30-day forecast")?;
            writeln!(out, "  Prediction failed: {}", reason)?;
        }
        ForecastOutcome::Predicted {
            days,
            summary,
            seasonal,
            crop,
            ..
        } => {
            if show_days {
                write_days(&mut out, days)?;
                writeln!(out)?;
            }

            writeln!(
                out,
                "{}-day forecast (mostly {})",
                summary.total_days(),
                summary.dominant_label()
            )?;
            for label in WeatherLabel::ALL {
                writeln!(
                    out,
                    "  {} {:<7} {:>2} days",
                    label.symbol(),
                    label.as_str(),
                    summary.count(label)
                )?;
            }
            writeln!(
                out,
                "  Mean temperature   {:.1}°C",
                summary.mean_temperature_c
            )?;
            writeln!(
                out,
                "  Mean humidity      {:.1}%",
                summary.mean_humidity_percent
            )?;
            writeln!(
                out,
                "  Estimated rainfall {:.0} mm",
                summary.estimated_rainfall_mm
            )?;
            writeln!(out)?;
            writeln!(out, "{}", seasonal)?;

            match crop {
                CropOutcome::Recommended(name) => {
                    writeln!(out, "🌱 Recommended crop: {}", name)?;
                }
                CropOutcome::PredictionFailed(reason) => {
                    writeln!(out, "Crop prediction failed: {}", reason)?;
                }
            }
        }
    }

    Ok(out)
}

fn write_reading(out: &mut String, reading: &WeatherReading) -> Result<()> {
    writeln!(out, "Current weather in {}", reading.city)?;
    writeln!(out, "  Temperature: {:.1}°C", reading.temperature_c)?;
    writeln!(out, "  Humidity:    {:.0}%", reading.humidity_percent)?;
    if let Some(rain) = reading.rainfall_mm {
        writeln!(out, "  Rainfall:    {} mm", rain)?;
    }
    Ok(())
}

fn write_days(out: &mut String, days: &[ForecastDay]) -> Result<()> {
    writeln!(out, "Day  Temp (°C)  Humidity (%)  Weather")?;
    for day in days {
        writeln!(
            out,
            "{:>3}  {:>9.1}  {:>12.1}  {} {}",
            day.day,
            day.temperature_c,
            day.humidity_percent,
            day.label.symbol(),
            day.label
        )?;
    }
    Ok(())
}

pub fn render_soils(soils: &SoilTable) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{:<8} {:>5} {:>5} {:>5} {:>5}", "Soil", "N", "P", "K", "pH")?;
    for soil in soils.profiles() {
        writeln!(
            out,
            "{:<8} {:>5} {:>5} {:>5} {:>5}",
            soil.name, soil.nitrogen, soil.phosphorus, soil.potassium, soil.ph
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Advisory, CropFeatures, ForecastSummary, SeasonalSuggestion, SoilProfile,
    };

    fn crop_report(forecast: ForecastOutcome) -> AdvisoryReport {
        AdvisoryReport::Crop(CropReport {
            reading: WeatherReading::new("Nairobi", 24.3, 61.0),
            soil: SoilProfile::new("Loam", 60.0, 50.0, 50.0, 6.5),
            irrigation: Advisory::LightWatering,
            forecast,
        })
    }

    fn predicted(crop: CropOutcome) -> ForecastOutcome {
        let summary = ForecastSummary {
            clear_days: 10,
            clouds_days: 5,
            rain_days: 15,
            mean_temperature_c: 24.1,
            mean_humidity_percent: 60.2,
            estimated_rainfall_mm: 120.0,
        };
        let days = (1..=30)
            .map(|day| ForecastDay {
                day,
                month: 4,
                temperature_c: 24.0,
                humidity_percent: 60.0,
                label: WeatherLabel::Clear,
            })
            .collect();
        ForecastOutcome::Predicted {
            days,
            summary,
            seasonal: SeasonalSuggestion::WetSeason,
            features: CropFeatures::from_forecast(
                &SoilProfile::new("Loam", 60.0, 50.0, 50.0, 6.5),
                &summary,
            ),
            crop,
        }
    }

    #[test]
    fn irrigation_text_includes_advice() {
        let report = AdvisoryReport::Irrigation(IrrigationReport {
            reading: WeatherReading::new("Jaipur", 33.0, 35.0).with_rainfall(Some(2.0)),
            advisory: Advisory::HeavyWatering,
        });
        let text = render(&report, RenderOptions::default()).unwrap();
        assert!(text.contains("Current weather in Jaipur"));
        assert!(text.contains("Rainfall:    2 mm"));
        assert!(text.contains("Water heavily (25 L/sq.m)"));
        assert!(!text.contains("reported rainfall"));
    }

    #[test]
    fn crop_text_includes_tallies_and_crop() {
        let report = crop_report(predicted(CropOutcome::Recommended("maize".into())));
        let text = render(&report, RenderOptions::default()).unwrap();
        assert!(text.contains("30-day forecast (mostly rain)"));
        assert!(text.contains("rain    15 days"));
        assert!(text.contains("Estimated rainfall 120 mm"));
        assert!(text.contains("Suggest Rice, Leafy Vegetables"));
        assert!(text.contains("Recommended crop: maize"));
        assert!(!text.contains("Day  Temp"));
    }

    #[test]
    fn show_days_prints_table() {
        let report = crop_report(predicted(CropOutcome::Recommended("maize".into())));
        let text = render(
            &report,
            RenderOptions {
                show_days: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(text.contains("Day  Temp"));
        assert_eq!(text.matches("clear").count(), 31);
    }

    #[test]
    fn failures_are_printed() {
        let text = render(
            &crop_report(ForecastOutcome::PredictionFailed {
                reason: "shape mismatch".into(),
            }),
            RenderOptions::default(),
        )
        .unwrap();
        assert!(text.contains("Prediction failed: shape mismatch"));
        assert!(text.contains("Light watering"));

        let text = render(
            &crop_report(predicted(CropOutcome::PredictionFailed("bad model".into()))),
            RenderOptions::default(),
        )
        .unwrap();
        assert!(text.contains("Crop prediction failed: bad model"));
    }

    #[test]
    fn json_output_is_tagged() {
        let report = crop_report(predicted(CropOutcome::Recommended("maize".into())));
        let json = render(
            &report,
            RenderOptions {
                json: true,
                ..Default::default()
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "crop");
        assert_eq!(value["forecast"]["status"], "predicted");
        assert_eq!(value["forecast"]["summary"]["rain_days"], 15);
        assert_eq!(value["forecast"]["features"]["rainfall_mm"], 120.0);
    }

    #[test]
    fn soils_table_lists_every_profile() {
        let text = render_soils(&SoilTable::default()).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("Loam"));
    }
}
