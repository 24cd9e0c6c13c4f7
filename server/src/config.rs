//! Process configuration, read once at startup.
//!
//! Every setting can come from a flag or an environment variable. The parsed
//! `Cli` is converted into an immutable `Config` that is handed to the
//! service; nothing reads the environment after that.

use std::fmt;
use std::time::Duration;

use clap::Parser;
use nutrition_core::client::DEFAULT_BASE_URL;
use nutrition_core::FdcClient;

/// Public FoodData Central key with a low hourly quota.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Parser, Debug)]
#[command(
    name = "nutrition-server",
    about = "HTTP API for barcode and label nutrition lookups backed by USDA FoodData Central"
)]
pub struct Cli {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "NUTRITION_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,

    /// FoodData Central API key.
    #[arg(long, env = "USDA_API_KEY", default_value = DEMO_API_KEY, hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the FoodData Central API.
    #[arg(long, env = "USDA_FDC_URL", default_value = DEFAULT_BASE_URL)]
    pub fdc_base_url: String,

    /// Seconds before a food search times out (0 disables the timeout).
    #[arg(long, env = "NUTRITION_SEARCH_TIMEOUT_SECS", default_value_t = 10)]
    pub search_timeout_secs: u64,

    /// Seconds before a food detail fetch times out. Unset means no timeout.
    #[arg(long, env = "NUTRITION_DETAIL_TIMEOUT_SECS")]
    pub detail_timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct Config {
    pub bind: String,
    pub api_key: String,
    pub fdc_base_url: String,
    pub search_timeout: Option<Duration>,
    pub detail_timeout: Option<Duration>,
}

impl Config {
    /// Configuration pointing at `fdc_base_url` with default timeouts.
    pub fn new(fdc_base_url: &str, api_key: &str) -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            api_key: api_key.to_string(),
            fdc_base_url: fdc_base_url.to_string(),
            search_timeout: Some(nutrition_core::client::DEFAULT_SEARCH_TIMEOUT),
            detail_timeout: None,
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }

    pub fn fdc_client(&self) -> FdcClient {
        FdcClient::new(&self.fdc_base_url, &self.api_key)
            .with_search_timeout(self.search_timeout)
            .with_detail_timeout(self.detail_timeout)
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            bind: cli.bind,
            api_key: cli.api_key,
            fdc_base_url: cli.fdc_base_url,
            search_timeout: (cli.search_timeout_secs > 0)
                .then(|| Duration::from_secs(cli.search_timeout_secs)),
            detail_timeout: cli.detail_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("api_key", &"<redacted>")
            .field("fdc_base_url", &self.fdc_base_url)
            .field("search_timeout", &self.search_timeout)
            .field("detail_timeout", &self.detail_timeout)
            .finish()
    }
}
