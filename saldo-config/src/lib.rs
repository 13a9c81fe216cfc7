//! Configuration loading and typed settings for the Saldo service.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

pub use config::ConfigError;

/// Root of the provider's personal API.
pub const DEFAULT_API_BASE: &str = "https://api.monobank.ua";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Process settings, read once at startup. No hot reload.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Personal API token presented in the X-Token header.
    pub token: String,
    /// Publicly reachable URL the provider should deliver events to.
    pub webhook_url: String,
    /// Address the webhook listener binds to.
    pub listen_addr: SocketAddr,
    /// File receiving the aggregate total in major units.
    pub output: PathBuf,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Upper bound on each provider call; expiry is fatal at startup.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Interval for re-fetching the provider snapshot. Absent means the
    /// total is driven by webhook deliveries alone.
    #[serde(default)]
    pub resync_interval_secs: Option<u64>,
}

impl Settings {
    /// Load settings from the optional TOML file at `path`, then apply
    /// `SALDO_`-prefixed environment overrides (`SALDO_TOKEN`, ...).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("SALDO").try_parsing(true));
        builder.build()?.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resync_interval(&self) -> Option<Duration> {
        self.resync_interval_secs.map(Duration::from_secs)
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
