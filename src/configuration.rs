use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub moosend: MoosendSettings,
}

#[derive(Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the upstream Moosend API.
#[derive(Deserialize)]
pub struct MoosendSettings {
    pub base_url: String,
    /// Per-request timeout. When unset, a request may wait on the upstream
    /// indefinitely.
    pub timeout_milliseconds: Option<u64>,
    /// Extra attempts allowed for transient upstream failures. Zero disables
    /// retries entirely.
    #[serde(default)]
    pub max_retries: u32,
}

impl MoosendSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .build()?
        .try_deserialize()
}
