mod classifiers;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod report;

use clap::Parser;
use classifiers::Models;
use cli::{Cli, Commands, LocationArgs};
use config::Config;
use datasources::{IpLocationClient, OpenWeatherMapClient};
use dialoguer::{Input, Select};
use error::{Result, SmartFarmError};
use logic::{Advisor, AdvisoryReport, AdvisoryRequest, IrrigationEngine, LocationQuery};
use models::AdvisoryMode;
use report::RenderOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type FarmAdvisor = Advisor<OpenWeatherMapClient, IpLocationClient>;

/// City used by `check` to probe the weather API
const PROBE_CITY: &str = "London";

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for reports
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive(cli.config)?;
            Ok(())
        }
        Some(Commands::Check) => check(cli.config).await,
        Some(Commands::Soils) => {
            let config = Config::load(cli.config)?;
            print!("{}", report::render_soils(&config.soil_table()?)?);
            Ok(())
        }
        Some(Commands::Irrigate {
            location,
            rainfall,
            json,
        }) => {
            let config = Config::load(cli.config)?;
            let advisor = build_advisor(&config, None)?;
            let request = AdvisoryRequest {
                mode: AdvisoryMode::IrrigationAdvice,
                location: location_query(location),
                soil: None,
                rainfall_mm: rainfall,
            };
            let report = advisor.run(&request).await?;
            print_report(
                &report,
                RenderOptions {
                    json,
                    show_days: false,
                },
            )
        }
        Some(Commands::Crop {
            soil,
            location,
            seed,
            show_days,
            json,
        }) => {
            let config = Config::load(cli.config)?;
            let models = Models::load(&config.models)?;
            let advisor =
                build_advisor(&config, Some(models))?.with_seed(seed.or(config.forecast.seed));
            let request = AdvisoryRequest {
                mode: AdvisoryMode::CropRecommendation,
                location: location_query(location),
                soil: Some(soil),
                rainfall_mm: None,
            };
            let report = advisor.run(&request).await?;
            print_report(&report, RenderOptions { json, show_days })
        }
        None => interactive(cli.config).await,
    }
}

fn location_query(args: LocationArgs) -> LocationQuery {
    match args.city {
        Some(city) if !args.auto => LocationQuery::City(city),
        _ => LocationQuery::AutoDetect,
    }
}

fn build_advisor(config: &Config, models: Option<Models>) -> Result<FarmAdvisor> {
    let weather = OpenWeatherMapClient::new(config.openweathermap.clone());
    let mut advisor = Advisor::new(weather, config.soil_table()?).with_seed(config.forecast.seed);

    if config.geolocation.enabled {
        advisor = advisor.with_location(IpLocationClient::new(&config.geolocation)?);
    }
    if let Some(models) = models {
        advisor = advisor.with_models(models);
    }

    Ok(advisor)
}

fn print_report(report: &AdvisoryReport, options: RenderOptions) -> Result<()> {
    println!("{}", report::render(report, options)?);
    Ok(())
}

async fn check(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path)?;
    let soils = config.soil_table()?;
    println!("Config:          OK ({} soil profiles)", soils.profiles().len());

    let rules = IrrigationEngine::new().list_rules();
    println!("Irrigation rules: {}", rules.len());
    for (id, name) in rules {
        println!("  {:<20} {}", id, name);
    }

    match Models::load(&config.models) {
        Ok(_) => println!("Models:          OK"),
        Err(e) => println!("Models:          FAILED ({})", e),
    }

    let weather = OpenWeatherMapClient::new(config.openweathermap.clone());
    match weather.test_connection(PROBE_CITY).await {
        Ok(true) => println!("OpenWeatherMap:  OK"),
        Ok(false) => println!("OpenWeatherMap:  FAILED (check the API key)"),
        Err(e) => println!("OpenWeatherMap:  OFFLINE ({})", e),
    }

    if config.geolocation.enabled {
        let geo = IpLocationClient::new(&config.geolocation)?;
        if geo.test_connection().await {
            println!("Geolocation:     OK");
        } else {
            println!("Geolocation:     OFFLINE");
        }
    } else {
        println!("Geolocation:     disabled");
    }

    Ok(())
}

/// Prompt-driven session used when no subcommand is given.
async fn interactive(config_path: Option<PathBuf>) -> Result<()> {
    let config = if Config::exists(config_path.as_ref()) {
        Config::load(config_path)?
    } else {
        println!("No configuration found.");
        Config::setup_interactive(config_path)?.0
    };

    let mode_labels: Vec<&str> = AdvisoryMode::ALL.iter().map(|m| m.as_str()).collect();
    let mode = AdvisoryMode::ALL[Select::new()
        .with_prompt("What would you like?")
        .items(&mode_labels)
        .default(0)
        .interact()
        .map_err(input_error)?];

    let models = if mode.needs_soil() {
        Some(Models::load(&config.models)?)
    } else {
        None
    };
    let advisor = build_advisor(&config, models)?;

    let soil = if mode.needs_soil() {
        let names = advisor.soils().names();
        let index = Select::new()
            .with_prompt("Soil type")
            .items(&names)
            .default(0)
            .interact()
            .map_err(input_error)?;
        Some(names[index].to_string())
    } else {
        None
    };

    let location = if advisor.can_detect_location() {
        let choice = Select::new()
            .with_prompt("Location")
            .items(&["Detect automatically", "Enter a city"])
            .default(0)
            .interact()
            .map_err(input_error)?;
        if choice == 0 {
            LocationQuery::AutoDetect
        } else {
            prompt_city()?
        }
    } else {
        prompt_city()?
    };

    let mut request = AdvisoryRequest {
        mode,
        location,
        soil,
        rainfall_mm: None,
    };

    let report = match advisor.run(&request).await {
        Err(SmartFarmError::LocationUnavailable(reason)) => {
            println!("Could not detect your location ({}).", reason);
            request.location = prompt_city()?;
            advisor.run(&request).await?
        }
        other => other?,
    };

    print_report(&report, RenderOptions::default())
}

fn prompt_city() -> Result<LocationQuery> {
    let city: String = Input::new()
        .with_prompt("City")
        .interact_text()
        .map_err(input_error)?;
    Ok(LocationQuery::City(city))
}

fn input_error(e: dialoguer::Error) -> SmartFarmError {
    SmartFarmError::Config(format!("Input error: {}", e))
}
