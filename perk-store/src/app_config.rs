use serde::Deserialize;
use std::env;

use perk_offer::{CurrencyFormat, ValidatorConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub offers: OfferSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret of the hosted auth provider's access tokens
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OfferSettings {
    #[serde(default = "default_require_start_date")]
    pub require_start_date: bool,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_require_start_date() -> bool { true }

fn default_currency_symbol() -> String { "$".to_string() }

impl Default for OfferSettings {
    fn default() -> Self {
        Self {
            require_start_date: default_require_start_date(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl OfferSettings {
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig { require_start_date: self.require_start_date }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat { symbol: self.currency_symbol.clone() }
    }
}

/// Eg. `PERK_AUTH__JWT_SECRET=...` sets `auth.jwt_secret`
fn environment() -> config::Environment {
    config::Environment::with_prefix("PERK")
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }
}
