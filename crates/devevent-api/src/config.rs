// Environment configuration
//
// Required keys fail startup with context; optional keys fall back to
// defaults suitable for local development.

use anyhow::{Context, Result};
use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL the page layer uses to call back into this API.
    pub public_base_url: String,
    pub bind_addr: String,
    /// Optional route prefix, e.g. "/api".
    pub api_prefix: String,
    pub cors_origins: Vec<HeaderValue>,
    pub image_store: ImageStoreConfig,
}

#[derive(Debug, Clone)]
pub struct ImageStoreConfig {
    /// Upload endpoint of the external image host.
    pub upload_url: String,
    /// Optional unsigned-upload preset forwarded with each upload.
    pub upload_preset: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL environment variable required")?;
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .context("PUBLIC_BASE_URL environment variable required")?;
        let upload_url = std::env::var("IMAGE_UPLOAD_URL")
            .context("IMAGE_UPLOAD_URL environment variable required")?;
        let upload_preset = std::env::var("IMAGE_UPLOAD_PRESET").ok().filter(|s| !s.is_empty());

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());
        let api_prefix = std::env::var("API_PREFIX").unwrap_or_default();

        // Only needed when the pages are served from a different origin.
        let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            public_base_url,
            bind_addr,
            api_prefix,
            cors_origins,
            image_store: ImageStoreConfig {
                upload_url,
                upload_preset,
            },
        })
    }
}
