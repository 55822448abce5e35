pub mod advisor;
pub mod aggregate;
pub mod crop;
pub mod rules;
pub mod synthesizer;

pub use advisor::{Advisor, AdvisoryReport, AdvisoryRequest, LocationQuery};
pub use aggregate::aggregate;
pub use rules::{advise, IrrigationEngine};
pub use synthesizer::synthesize;
