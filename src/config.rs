//! Configuration Module
//!
//! Handles loading and managing worker and host configuration from environment variables.

use std::env;

/// Default cache region name. Bump it to invalidate every previously cached asset.
pub const DEFAULT_CACHE_VERSION: &str = "retro-chat-v1";

/// Assets pre-populated on install. Absolute URLs are cross-origin and only
/// cached lazily.
pub const DEFAULT_STATIC_ASSETS: &[&str] = &[
    "/",
    "/index.html",
    "/manifest.json",
    "https://cdn.jsdelivr.net/npm/protobufjs@7.5.3/dist/protobuf.min.js",
    "https://unpkg.com/@waku/sdk@0.0.35-67a7287.0/bundle/index.js",
    "https://fonts.googleapis.com/css2?family=Share+Tech+Mono:wght@400&display=swap",
];

/// Substrings that together identify the realtime messaging endpoint.
pub const DEFAULT_REALTIME_MARKERS: &[&str] = &["waku", "wss://"];

/// Worker and host configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the cache region owned by this worker version
    pub cache_version: String,
    /// Origin of the chat client, used to resolve relative URLs
    pub app_origin: String,
    /// Ordered static asset list
    pub static_assets: Vec<String>,
    /// Realtime endpoint markers; a URL containing all of them is never intercepted
    pub realtime_markers: Vec<String>,
    /// HTTP server port
    pub server_port: u16,
    /// Outbound request timeout in seconds
    pub network_timeout: u64,
    /// Await cache writes before returning a network response
    pub await_cache_writes: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_VERSION` - Cache region name (default: retro-chat-v1)
    /// - `APP_ORIGIN` - Upstream origin (default: http://localhost:8080)
    /// - `STATIC_ASSETS` - Comma-separated asset list (default: built-in list)
    /// - `REALTIME_MARKERS` - Comma-separated markers (default: waku,wss://)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `NETWORK_TIMEOUT` - Outbound timeout in seconds (default: 20)
    /// - `AWAIT_CACHE_WRITES` - true/false (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_version: env::var("CACHE_VERSION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.cache_version),
            app_origin: env::var("APP_ORIGIN")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.app_origin),
            static_assets: env::var("STATIC_ASSETS")
                .ok()
                .map(|v| split_list(&v))
                .unwrap_or(defaults.static_assets),
            realtime_markers: env::var("REALTIME_MARKERS")
                .ok()
                .map(|v| split_list(&v))
                .unwrap_or(defaults.realtime_markers),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            network_timeout: env::var("NETWORK_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.network_timeout),
            await_cache_writes: env::var("AWAIT_CACHE_WRITES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.await_cache_writes),
        }
    }

    /// Static assets that are eagerly cached on install.
    pub fn same_origin_assets(&self) -> impl Iterator<Item = &str> {
        self.static_assets
            .iter()
            .map(String::as_str)
            .filter(|url| !url.starts_with("http"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_version: DEFAULT_CACHE_VERSION.to_string(),
            app_origin: "http://localhost:8080".to_string(),
            static_assets: DEFAULT_STATIC_ASSETS.iter().map(|s| s.to_string()).collect(),
            realtime_markers: DEFAULT_REALTIME_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            server_port: 3000,
            network_timeout: 20,
            await_cache_writes: false,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
