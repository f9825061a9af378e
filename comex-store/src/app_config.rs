use std::env;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Backend endpoint; unused by the bundled in-memory backend.
    pub url: Option<String>,
    /// Upper bound on every remote store call, in seconds.
    #[serde(default = "default_call_deadline_secs")]
    pub call_deadline_secs: u64,
}

fn default_call_deadline_secs() -> u64 {
    5
}

impl StoreConfig {
    pub fn call_deadline(&self) -> Duration {
        Duration::from_secs(self.call_deadline_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            call_deadline_secs: default_call_deadline_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Environment-specific file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `COMEX_STORE__CALL_DEADLINE_SECS=10`
            .add_source(config::Environment::with_prefix("COMEX").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadline_is_five_seconds() {
        let config = Config::default();
        assert_eq!(config.store.call_deadline(), Duration::from_secs(5));
    }
}
