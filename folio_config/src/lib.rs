use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::{profile::Profile, Sensitive};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of additional config files, applied in order.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG_PATH";

/// Prefix of environment variables overriding single config values, e.g.
/// `FOLIO__TELEGRAM__BOT_TOKEN`.
pub const ENV_PREFIX: &str = "FOLIO";

/// Load the bundled config, the files listed in [`CONFIG_PATH_ENV`] and the
/// `FOLIO__*` environment variables.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
    let paths = std::iter::once(DEFAULT_CONFIG_PATH)
        .chain(extra_paths.split(':').filter(|p| !p.is_empty()))
        .collect::<Vec<_>>();

    build(&paths, &[], true)
}

/// Load the given config files only, ignoring the environment.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    build(paths, &[], false)
}

/// Load the given config files and apply additional TOML snippets on top.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    build(paths, overrides, false)
}

fn build(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    environment: bool,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let builder = overrides.iter().fold(builder, |builder, &snippet| {
        builder.add_source(File::from_str(snippet, FileFormat::Toml))
    });

    let builder = if environment {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
    } else {
        builder
    };

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Default, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: Option<Sensitive<String>>,
    pub chat_id: Option<String>,
    pub api_endpoint_override: Option<Url>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub site_name: Option<String>,
}
