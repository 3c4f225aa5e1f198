use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub game: GameSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GameSettings {
    pub players: Vec<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_delay_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_delay_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub delay_before_new_round_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub player_inactivity_timeout_ms: u64,
}

impl GameSettings {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn delay_before_new_round(&self) -> Duration {
        Duration::from_millis(self.delay_before_new_round_ms)
    }

    pub fn player_inactivity_timeout(&self) -> Duration {
        Duration::from_millis(self.player_inactivity_timeout_ms)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            players: vec!["p1".to_string(), "p2".to_string()],
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            delay_before_new_round_ms: 1000,
            player_inactivity_timeout_ms: 2500,
        }
    }
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .map_err(|_| ConfigError::Message("ENVIRONMENT variable is not set.".to_string()))?
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            // e.g. `APP__GAME__MIN_DELAY_MS=500` sets `game.min_delay_ms`
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize::<Config>()
    }
}

enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
