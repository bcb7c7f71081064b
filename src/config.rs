use anyhow::{Context, Error};
use config::Config;

#[derive(Debug, serde_derive::Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub listen_address: String,
    pub application_placeholder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:3000".to_string(),
            application_placeholder: "insert-application-name".to_string(),
        }
    }
}

pub fn load_config() -> Result<AppConfig, Error> {
    load_config_from(config::Environment::with_prefix("devstub"))
}

fn load_config_from(environment: config::Environment) -> Result<AppConfig, Error> {
    let config = Config::builder()
        .add_source(environment)
        .build()
        .context("Can't load configuration")?;

    config
        .try_deserialize()
        .context("Can't deserialize AppConfig from loaded configuration")
}
