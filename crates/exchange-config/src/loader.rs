//! Configuration loading from files and environment.

use crate::types::ExchangeConfig;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("config file not found: {0}")]
	FileNotFound(String),

	#[error("failed to parse config: {0}")]
	Parse(String),

	#[error("invalid config: {0}")]
	Validation(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file, dispatching on the extension.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ExchangeConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}

		let contents = std::fs::read_to_string(path)?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => {
				return Err(ConfigError::Parse(format!(
					"unsupported config format: {:?}",
					path
				)))
			}
		};

		Self::validate(&config)?;
		Ok(config)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<ExchangeConfig, ConfigError> {
		serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
	}

	/// Load from an optional file with environment variable overrides.
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<ExchangeConfig, ConfigError> {
		let mut config = if let Some(path) = file_path {
			Self::from_file(path)?
		} else {
			ExchangeConfig::default()
		};

		Self::apply_env_overrides(&mut config)?;
		Self::validate(&config)?;
		Ok(config)
	}

	fn apply_env_overrides(config: &mut ExchangeConfig) -> Result<(), ConfigError> {
		if let Ok(value) = std::env::var("EXCHANGE_MAX_QUOTE_PATHS") {
			debug!("Overriding max_quote_paths from environment");
			config.routing.max_quote_paths = value
				.parse()
				.map_err(|_| ConfigError::Validation("EXCHANGE_MAX_QUOTE_PATHS must be a positive integer".to_string()))?;
		}

		if let Ok(value) = std::env::var("EXCHANGE_MAX_PATH_HOPS") {
			debug!("Overriding max_path_hops from environment");
			config.routing.max_path_hops = value
				.parse()
				.map_err(|_| ConfigError::Validation("EXCHANGE_MAX_PATH_HOPS must be a positive integer".to_string()))?;
		}

		Ok(())
	}

	/// Validate configuration
	fn validate(config: &ExchangeConfig) -> Result<(), ConfigError> {
		if config.routing.max_quote_paths == 0 {
			return Err(ConfigError::Validation(
				"routing.max_quote_paths must be at least 1".to_string(),
			));
		}

		if config.routing.max_path_hops == 0 {
			return Err(ConfigError::Validation(
				"routing.max_path_hops must be at least 1".to_string(),
			));
		}

		if config.routing.max_concurrent_quotes == 0 {
			return Err(ConfigError::Validation(
				"routing.max_concurrent_quotes must be at least 1".to_string(),
			));
		}

		if config.sync.refresh_interval_secs == 0 {
			return Err(ConfigError::Validation(
				"sync.refresh_interval_secs must be at least 1".to_string(),
			));
		}

		Ok(())
	}
}

/// Load configuration from standard locations:
/// 1. `EXCHANGE_CONFIG_FILE` environment variable
/// 2. `./config.toml`
/// 3. `./config/exchange.toml`
/// 4. Defaults with environment overrides
pub fn load_config() -> Result<ExchangeConfig, ConfigError> {
	if let Ok(path) = std::env::var("EXCHANGE_CONFIG_FILE") {
		return ConfigLoader::from_env_and_file(Some(Path::new(&path)));
	}

	let paths = ["./config.toml", "./config/exchange.toml"];

	for path in &paths {
		if Path::new(path).exists() {
			return ConfigLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	ConfigLoader::from_env_and_file(None)
}
