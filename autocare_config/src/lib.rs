use std::{net::IpAddr, path::Path};

use anyhow::Context;
use autocare_models::email_address::EmailAddressWithName;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "AUTOCARE_CONFIG";

/// Prefix of environment variables overriding single settings, e.g.
/// `AUTOCARE__HTTP__PORT=8080`.
pub const ENV_PREFIX: &str = "AUTOCARE";

/// Loads the config files listed in `AUTOCARE_CONFIG` (or the default config
/// file) and applies the `AUTOCARE__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV)
        .map(|paths| paths.split(':').map(Into::into).collect::<Vec<String>>())
        .unwrap_or_else(|_| vec![DEFAULT_CONFIG_PATH.into()]);

    load_with(&paths, environment())
}

/// Loads the config shipped for local development, ignoring the environment.
pub fn load_dev_config() -> anyhow::Result<Config> {
    load_with(&[DEFAULT_CONFIG_PATH], environment().source(Some(Default::default())))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_with(paths: &[impl AsRef<Path>], env: Environment) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(env)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub service_request: ServiceRequestConfig,
    pub health: HealthConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    /// `smtp://` or `smtps://` url, including the sender account credentials.
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequestConfig {
    pub recipient: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}
