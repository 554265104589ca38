//! Service configuration loaded from the environment

use anyhow::{Context, Result};
use auth::JwtConfig;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_access_token_expiry() -> u64 {
    // 10 hours
    36_000
}

fn default_cors_origins() -> String {
    "http://localhost:5173".to_string()
}

/// API service configuration
///
/// # Environment Variables
/// - `HOST`: bind address (default: "0.0.0.0")
/// - `PORT`: listening port (default: 5000)
/// - `ACCESS_TOKEN_SECRET`: HS256 signing secret (required)
/// - `ACCESS_TOKEN_EXPIRY`: session lifetime in seconds (default: 36000)
/// - `NODE_ENV`: `production` switches cookies to `Secure; SameSite=None`
/// - `CORS_ORIGINS`: comma-separated browser origins allowed to call the API
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub access_token_secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: u64,
    #[serde(default)]
    pub node_env: Option<String>,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    pub fn from_env() -> Result<Self> {
        ::config::Config::builder()
            .add_source(::config::Environment::default())
            .build()
            .context("Failed to read configuration from the environment")?
            .try_deserialize()
            .context("Invalid configuration (is ACCESS_TOKEN_SECRET set?)")
    }

    pub fn is_production(&self) -> bool {
        self.node_env
            .as_deref()
            .is_some_and(|env| env.eq_ignore_ascii_case("production"))
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.access_token_secret.clone(),
            expiry: self.access_token_expiry,
        }
    }

    /// Credentialed CORS restricted to the configured origins
    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let origins = self
            .allowed_origins()
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE]))
    }
}
