use crate::cli::Cli;
use crate::error::ProxyResult;
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const TRACE_LEVELS: [&'static str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
const LOCAL_SETTINGS_YAML_FILE: &str = ".env.local.yaml";

/// What to do with a stat category name that matches no known category.
/// The same policy applies to every route serving stats.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Answer 400 `Invalid category`.
    Reject,
    /// Serve the batting average leaders instead.
    Default,
}

// Settings are loaded once at startup and handed to the components that
// need them. All settings may be configured via environment variables.
// Example: CACHE_TTL="600" would set cache_ttl to 600 seconds.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_trace_level")]
    pub trace_level: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    // Seconds before a cached response is considered stale
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default = "default_ncaa_api_base_url")]
    pub ncaa_api_base_url: String,
    #[serde(default = "default_ncaa_api_timeout_sec")]
    pub ncaa_api_timeout_sec: u64,
    // Global spacing between two outbound calls, to avoid upstream IP blocks
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
    #[serde(default = "default_upstream_attempts")]
    pub upstream_attempts: u32,
    #[serde(default = "default_upstream_retry_delay_ms")]
    pub upstream_retry_delay_ms: u64,
    #[serde(default = "default_unknown_category")]
    pub unknown_category: CategoryPolicy,
    // Whether canned data may be served once live and cached data are exhausted
    #[serde(default = "default_true")]
    pub mock_fallback_enabled: bool,
}

impl Settings {
    pub fn new() -> ProxyResult<Self> {
        let figment = match Path::new(LOCAL_SETTINGS_YAML_FILE).exists() {
            true => {
                println!(
                    "\n######################################\n\
                       ##   Found '.env.local.yaml' file,  ##\n\
                       ##   loading local configuration.   ##\n\
                       ######################################\n\
                    "
                );
                Figment::new().merge(Yaml::file(LOCAL_SETTINGS_YAML_FILE))
            }
            false => Figment::new(),
        };

        Settings::from_figment(
            figment
                .merge(Env::raw())
                .merge(Serialized::defaults(Cli::parse())),
        )
    }

    pub fn from_figment(figment: Figment) -> ProxyResult<Self> {
        Ok(figment.extract()?)
    }

    pub fn get_trace_level(&self) -> Level {
        get_trace_level(&self.trace_level)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn ncaa_api_timeout(&self) -> Duration {
        Duration::from_secs(self.ncaa_api_timeout_sec)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn upstream_retry_delay(&self) -> Duration {
        Duration::from_millis(self.upstream_retry_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            trace_level: default_trace_level(),
            bind_address: default_bind_address(),
            port: default_port(),
            cache_ttl: default_cache_ttl(),
            cache_enabled: true,
            ncaa_api_base_url: default_ncaa_api_base_url(),
            ncaa_api_timeout_sec: default_ncaa_api_timeout_sec(),
            min_request_interval_ms: default_min_request_interval_ms(),
            upstream_attempts: default_upstream_attempts(),
            upstream_retry_delay_ms: default_upstream_retry_delay_ms(),
            unknown_category: default_unknown_category(),
            mock_fallback_enabled: true,
        }
    }
}

fn get_trace_level(level_str: &str) -> Level {
    match level_str {
        level if level == TRACE_LEVELS[0] => Level::TRACE,
        level if level == TRACE_LEVELS[1] => Level::DEBUG,
        level if level == TRACE_LEVELS[2] => Level::INFO,
        level if level == TRACE_LEVELS[3] => Level::WARN,
        level if level == TRACE_LEVELS[4] => Level::ERROR,
        // Default trace level
        _ => Level::INFO,
    }
}

fn default_trace_level() -> String {
    "INFO".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5003
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_ncaa_api_base_url() -> String {
    "https://ncaa-api.henrygd.me".to_string()
}

fn default_ncaa_api_timeout_sec() -> u64 {
    15
}

fn default_min_request_interval_ms() -> u64 {
    1000
}

fn default_upstream_attempts() -> u32 {
    1
}

fn default_upstream_retry_delay_ms() -> u64 {
    1000
}

fn default_unknown_category() -> CategoryPolicy {
    CategoryPolicy::Reject
}
