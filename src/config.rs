use crate::error::{Result, SmartFarmError};
use crate::models::{default_soils, SoilProfile, SoilTable};
use dialoguer::{Confirm, Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `SMARTFARM__FORECAST__SEED=7`
const ENV_PREFIX: &str = "SMARTFARM";

const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default = "default_soils")]
    pub soils: Vec<SoilProfile>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_owm_base_url")]
    pub base_url: String,
}

fn default_owm_base_url() -> String {
    DEFAULT_OWM_BASE_URL.to_string()
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeolocationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_geolocation_url")]
    pub url: String,
}

fn default_enabled() -> bool {
    true
}

fn default_geolocation_url() -> String {
    DEFAULT_GEOLOCATION_URL.to_string()
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_geolocation_url(),
        }
    }
}

/// Paths to the exported classifier models
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub weather: PathBuf,
    pub crop: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            weather: PathBuf::from("models/weather_model.json"),
            crop: PathBuf::from("models/crop_model.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ForecastConfig {
    /// Fixed seed for the forecast synthesizer; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SmartFarmError::Config(format!(
                "Config file not found at {:?}. Run `smartfarm init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SmartFarmError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution, layering `SMARTFARM__*`
    /// environment overrides on top.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(
                &content,
                ::config::FileFormat::Yaml,
            ))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SmartFarmError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.openweathermap.api_key.trim().is_empty() {
            return Err(SmartFarmError::Config(
                "openweathermap.api_key is empty - set OWM_API_KEY or edit the config".into(),
            ));
        }
        if self.openweathermap.api_key.contains("${") {
            return Err(SmartFarmError::Config(format!(
                "openweathermap.api_key references an unset variable: {}",
                self.openweathermap.api_key
            )));
        }
        // Surface soil table problems at load time
        self.soil_table()?;
        Ok(())
    }

    pub fn soil_table(&self) -> Result<SoilTable> {
        SoilTable::new(self.soils.clone())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("smartfarm").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/smartfarm/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SmartFarmError::Config("Cannot determine config directory".into()))?
            .join("smartfarm");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SmartFarm!");
        println!();

        // --- OpenWeatherMap ---
        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt("  API key (leave blank to use ${OWM_API_KEY})")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;
        let api_key = if api_key.trim().is_empty() {
            "${OWM_API_KEY}".to_string()
        } else {
            api_key
        };

        println!();

        // --- Location detection ---
        println!("Location detection");
        let geo_enabled = Confirm::new()
            .with_prompt("  Allow detecting your city from your IP address?")
            .default(true)
            .interact()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Models ---
        let defaults = ModelsConfig::default();
        println!("Models");
        let weather_model: String = Input::new()
            .with_prompt("  Weather model")
            .default(defaults.weather.display().to_string())
            .interact_text()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let crop_model: String = Input::new()
            .with_prompt("  Crop model")
            .default(defaults.crop.display().to_string())
            .interact_text()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key,
                base_url: default_owm_base_url(),
            },
            geolocation: GeolocationConfig {
                enabled: geo_enabled,
                url: default_geolocation_url(),
            },
            models: ModelsConfig {
                weather: PathBuf::from(weather_model),
                crop: PathBuf::from(crop_model),
            },
            forecast: ForecastConfig::default(),
            soils: default_soils(),
        };

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        let config = config.persist(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    /// Write the config, then read it back so `${VAR}` placeholders and
    /// environment overrides apply exactly as on a later `load`.
    pub fn persist(&self, path: &PathBuf) -> Result<Self> {
        self.write(path)?;
        Self::load(Some(path.clone()))
    }

    pub fn write(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SmartFarmError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SmartFarm Configuration\n# Generated by `smartfarm init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SmartFarmError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
