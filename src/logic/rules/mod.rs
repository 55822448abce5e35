pub mod engine;
pub mod rainfall;
pub mod temperature;

pub use engine::{advise, IrrigationEngine};

use crate::models::Advisory;

/// Weather inputs the irrigation rules look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: Option<f64>,
}

impl Conditions {
    pub fn new(temperature_c: f64, humidity_percent: f64, rainfall_mm: Option<f64>) -> Self {
        Self {
            temperature_c,
            humidity_percent,
            rainfall_mm,
        }
    }
}

/// Trait for irrigation rules. Rules are consulted in order and the first
/// one that returns an advisory wins.
pub trait IrrigationRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return an advisory if this rule decides the outcome
    fn evaluate(&self, conditions: &Conditions) -> Option<Advisory>;
}
