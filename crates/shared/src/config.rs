//! Application configuration management.
//!
//! Settings are loaded once at startup and handed to whoever needs them.
//! Nothing here is global or mutable after `AppConfig::load` returns.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Report presentation settings.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Lodge name printed in the statement header.
    #[serde(default = "default_lodge_name")]
    pub lodge_name: String,
    /// Currency symbol used when formatting amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Default path of the ledger snapshot (JSON array of entries).
    #[serde(default = "default_input_path")]
    pub input_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lodge_name: default_lodge_name(),
            currency_symbol: default_currency_symbol(),
            input_path: default_input_path(),
        }
    }
}

fn default_lodge_name() -> String {
    "Loja".to_string()
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_input_path() -> String {
    "lancamentos.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "lodge=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LODGE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LODGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
