use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub channel_buffer: usize,
    pub export: ExportConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub webhook_delay_ms: u64,
    pub test_success_rate: f64,
    /// Chance that an automatic notification delivery succeeds.
    pub delivery_success_rate: f64,
    pub min_response_ms: u64,
    pub max_response_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            channel_buffer: 32,
            export: ExportConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            webhook_delay_ms: 800,
            test_success_rate: 0.8,
            delivery_success_rate: 0.9,
            min_response_ms: 50,
            max_response_ms: 150,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Both files are optional; every key has a default.
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));
        Self::from_builder(builder, Self::environment())
    }

    // e.g. `POSTRELAY_SIMULATION__WEBHOOK_DELAY_MS=0`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("POSTRELAY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = builder.add_source(environment).build()?;

        let loaded: AppConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.channel_buffer == 0 {
            return Err(config::ConfigError::Message(
                "channel_buffer must be at least 1".to_string(),
            ));
        }
        let rates = [
            ("test_success_rate", self.simulation.test_success_rate),
            ("delivery_success_rate", self.simulation.delivery_success_rate),
        ];
        for (key, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(config::ConfigError::Message(format!(
                    "simulation.{key} must be within 0..=1, got {rate}"
                )));
            }
        }
        Ok(())
    }
}
