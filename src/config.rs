use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub game: GameSettings,
    pub words: WordsSettings,
    pub images: ImagesSettings,
    pub storage: StorageSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct GameSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub inactivity_timeout_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub tone_revert_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub round_close_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_word_count: usize,
}

impl GameSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_seconds)
    }

    pub fn tone_revert_delay(&self) -> Duration {
        Duration::from_millis(self.tone_revert_millis)
    }

    pub fn round_close_delay(&self) -> Duration {
        Duration::from_millis(self.round_close_millis)
    }
}

#[derive(Deserialize, Clone)]
pub struct WordsSettings {
    pub location: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub minimum_length: usize,
}

#[derive(Deserialize, Clone, Default)]
pub struct ImagesSettings {
    pub correct: Vec<String>,
    pub incorrect: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct StorageSettings {
    pub path: PathBuf,
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!("Failed to determine the current directory: {error}"))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .map_err(|_| ConfigError::NotFound("ENVIRONMENT".to_string()))?
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
