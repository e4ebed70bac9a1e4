//! API server configuration

use std::env;

use anyhow::{bail, Result};
use bookshelf_shared_config::{parse_env, BackendConfig, CommonConfig, Environment};

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Port used when `GRAPHQL_API_PORT` is unset
pub const DEFAULT_PORT: u16 = 4000;

/// Origins allowed in development when `CORS_ORIGINS` is unset
pub const DEVELOPMENT_CORS_ORIGINS: &[&str] =
    &["https://studio.apollographql.com", "http://localhost:3000"];

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 4000)
    pub port: u16,

    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,

    /// CORS allowed origins; empty means no cross-origin access
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, `JWT_SECRET` must be set and at least 32
    /// characters long, and cross-origin access is only granted to the
    /// origins listed in `CORS_ORIGINS`.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        let is_production = common.environment.is_production();

        let jwt_secret = Self::load_jwt_secret(is_production)?;
        let port = parse_env("GRAPHQL_API_PORT", DEFAULT_PORT)
            .map_err(|e| anyhow::anyhow!("Invalid GRAPHQL_API_PORT value: {}", e))?;
        let cors_allowed_origins = Self::load_cors_origins(is_production);

        Ok(Self {
            common,
            port,
            jwt_secret,
            cors_allowed_origins,
        })
    }

    /// Load and validate JWT_SECRET
    ///
    /// In development a fixed default is used with a warning.
    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {} characters in production (got {})",
                        MIN_JWT_SECRET_LENGTH,
                        secret.len()
                    );
                }
                Ok(secret)
            }
            _ if is_production => {
                bail!(
                    "JWT_SECRET environment variable is required in production. \
                     Please set a secure secret of at least {} characters.",
                    MIN_JWT_SECRET_LENGTH
                );
            }
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set, using insecure default. \
                     This is only acceptable in development mode."
                );
                Ok("development-secret-change-in-production".to_string())
            }
        }
    }

    fn load_cors_origins(is_production: bool) -> Vec<String> {
        let configured: Option<Vec<String>> = env::var("CORS_ORIGINS").ok().map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        match configured {
            Some(origins) => origins,
            None if is_production => Vec::new(),
            None => DEVELOPMENT_CORS_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Get backend configuration
    pub fn backend(&self) -> &BackendConfig {
        &self.common.backend
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Get the environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }
}
