use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smartfarm",
    version,
    about = "Irrigation advice and weather-driven crop recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watering advice from current conditions
    Irrigate {
        #[command(flatten)]
        location: LocationArgs,

        /// Recent rainfall in millimetres
        #[arg(short, long)]
        rainfall: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Crop recommendation from a synthesized 30-day forecast
    Crop {
        /// Soil type from the soil table (see `smartfarm soils`)
        #[arg(short, long)]
        soil: String,

        #[command(flatten)]
        location: LocationArgs,

        /// Seed for the forecast synthesizer
        #[arg(long)]
        seed: Option<u64>,

        /// Print every synthesized day
        #[arg(long)]
        show_days: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured soil profiles
    Soils,
    /// Re-run interactive setup
    Init,
    /// Validate config, load models and test connections
    Check,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct LocationArgs {
    /// City name
    #[arg(long)]
    pub city: Option<String>,

    /// Detect the city from your IP address
    #[arg(long)]
    pub auto: bool,
}
