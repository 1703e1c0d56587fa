//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Binaries call `dotenvy::dotenv()` first, so a local `.env` works.
//!
//! ## Storage
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! # or
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without Redis the documents live in memory for the lifetime of the process.
//!
//! ## Required Variables
//!
//! - `ADMIN_TOKEN` - Bearer token for the admin API (at least 16 characters)
//!
//! ## Optional Variables
//!
//! - `STORE_KEY_PREFIX` - Namespace for store keys (default: `linkbio:`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `PUBLIC_BASE_URL` - Public address of the page, used for printed links
//! - `BEHIND_PROXY` - Read client IPs from proxy headers (default: `false`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;

/// Minimum accepted length of `ADMIN_TOKEN`.
pub const MIN_ADMIN_TOKEN_LEN: usize = 16;

/// Storage settings shared by the server and the admin CLI.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub redis_url: Option<String>,
    pub key_prefix: String,
}

impl StoreConfig {
    /// Reads `REDIS_*` and `STORE_KEY_PREFIX`. Never fails; without Redis the
    /// caller falls back to the in-memory store.
    pub fn from_env() -> Self {
        Self {
            redis_url: Config::load_redis_url(),
            key_prefix: env::var("STORE_KEY_PREFIX").unwrap_or_else(|_| "linkbio:".to_string()),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: Option<String>,
    pub store_key_prefix: String,
    pub listen_addr: String,
    pub public_base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Operator bearer token for `/api/*`.
    pub admin_token: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ADMIN_TOKEN` is missing.
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig::from_env();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL").ok().filter(|v| !v.is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let admin_token = env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?;

        Ok(Self {
            redis_url: store.redis_url,
            store_key_prefix: store.key_prefix,
            listen_addr,
            public_base_url,
            log_level,
            log_format,
            behind_proxy,
            admin_token,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `redis_url` has a scheme other than `redis://` / `rediss://`
    /// - `admin_token` is shorter than [`MIN_ADMIN_TOKEN_LEN`]
    /// - `public_base_url` is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.admin_token.trim().len() < MIN_ADMIN_TOKEN_LEN {
            anyhow::bail!(
                "ADMIN_TOKEN must be at least {} characters",
                MIN_ADMIN_TOKEN_LEN
            );
        }

        if let Some(ref base) = self.public_base_url {
            let parsed = url::Url::parse(base)
                .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{}'", base))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("PUBLIC_BASE_URL must be http or https, got '{}'", base);
            }
        }

        Ok(())
    }

    /// Storage part of the configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            redis_url: self.redis_url.clone(),
            key_prefix: self.store_key_prefix.clone(),
        }
    }

    /// Returns whether documents are stored in Redis.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Store: Redis {}", mask_connection_string(redis_url));
            tracing::info!("  Key prefix: {}", self.store_key_prefix);
        } else {
            tracing::info!("  Store: in-memory (not persisted)");
        }

        if let Some(ref base) = self.public_base_url {
            tracing::info!("  Public URL: {}", base);
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks the password in a connection string for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
pub fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
