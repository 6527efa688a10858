//! Server configuration: sensible defaults with `SYNTHSARA_*` environment
//! overrides.

use std::env;
use std::path::PathBuf;
use tracing::info;

const DB_FILE: &str = "collective_memory.db";

/// Runtime configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1). Use 0.0.0.0 for containers.
    pub host: String,

    /// Server port (default: 5000)
    pub port: u16,

    /// Directory holding the SQLite archive and the platform JSON files
    /// (default: ./synthsara_data)
    pub data_dir: PathBuf,

    /// Retention window for sessions without a consent row (default: 30)
    pub default_retention_days: i64,

    /// Rate limit: requests per second on protected routes (default: 100)
    pub rate_limit_per_second: u64,

    /// Rate limit: burst size (default: 200)
    pub rate_limit_burst: u32,

    /// Maximum concurrent requests (default: 100)
    pub max_concurrent_requests: usize,

    /// Whether running in production mode (SYNTHSARA_ENV=production)
    pub is_production: bool,

    /// Allowed CORS origins; empty means allow all
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_dir: PathBuf::from("./synthsara_data"),
            default_retention_days: 30,
            rate_limit_per_second: 100,
            rate_limit_burst: 200,
            max_concurrent_requests: 100,
            is_production: false,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables over defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.is_production = env::var("SYNTHSARA_ENV")
            .map(|v| {
                let v = v.to_lowercase();
                v == "production" || v == "prod"
            })
            .unwrap_or(false);

        if let Ok(val) = env::var("SYNTHSARA_HOST") {
            config.host = val;
        }

        if let Ok(val) = env::var("SYNTHSARA_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        if let Ok(val) = env::var("SYNTHSARA_DATA_DIR") {
            config.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = env::var("SYNTHSARA_RETENTION_DAYS") {
            if let Ok(days) = val.parse::<i64>() {
                config.default_retention_days = days.max(1);
            }
        }

        if let Ok(val) = env::var("SYNTHSARA_RATE_LIMIT") {
            if let Ok(n) = val.parse() {
                config.rate_limit_per_second = n;
            }
        }

        if let Ok(val) = env::var("SYNTHSARA_RATE_BURST") {
            if let Ok(n) = val.parse() {
                config.rate_limit_burst = n;
            }
        }

        if let Ok(val) = env::var("SYNTHSARA_MAX_CONCURRENT") {
            if let Ok(n) = val.parse() {
                config.max_concurrent_requests = n;
            }
        }

        if let Ok(origins) = env::var("SYNTHSARA_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if config.is_production && config.cors_origins.is_empty() {
            tracing::warn!(
                "production mode with permissive CORS; set SYNTHSARA_CORS_ORIGINS to restrict"
            );
        }

        config
    }

    /// Path of the SQLite archive inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Build the CORS layer: permissive when no origins are configured,
    /// otherwise restricted to the origins that parse.
    pub fn cors_layer(&self) -> tower_http::cors::CorsLayer {
        use axum::http::HeaderValue;
        use tower_http::cors::{AllowOrigin, Any, CorsLayer};

        if self.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let mut valid = Vec::new();
        for origin in &self.cors_origins {
            match origin.parse::<HeaderValue>() {
                Ok(value) => valid.push(value),
                Err(_) => tracing::warn!(origin, "skipping unparseable CORS origin"),
            }
        }
        // An empty list denies all cross-origin requests rather than
        // falling back to permissive.
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(valid))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Log the effective configuration at startup.
    pub fn log(&self) {
        info!("Configuration:");
        info!(
            "   mode: {}",
            if self.is_production { "PRODUCTION" } else { "development" }
        );
        info!("   listen: {}:{}", self.host, self.port);
        info!("   data dir: {}", self.data_dir.display());
        info!("   default retention: {} days", self.default_retention_days);
        info!(
            "   rate limit: {} req/sec (burst: {})",
            self.rate_limit_per_second, self.rate_limit_burst
        );
        info!("   max concurrent: {}", self.max_concurrent_requests);
        if self.cors_origins.is_empty() {
            info!("   CORS: permissive (all origins)");
        } else {
            info!("   CORS origins: {:?}", self.cors_origins);
        }
    }
}
