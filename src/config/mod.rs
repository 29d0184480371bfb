//! Configuration management for the Syndik edge service

use anyhow::{Context, Result};
use std::env;

use crate::routing::environment::{self, Environment};
use crate::routing::url_builder::BaseUrls;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Explicit environment override (`SYNDIK_ENV`)
    pub environment: Option<String>,
    /// Platform deployment-stage signal (`VERCEL_ENV`)
    pub platform_stage: Option<String>,
    /// Hostname of the current preview deployment (`VERCEL_URL`)
    pub preview_host: Option<String>,
    /// Apex domain of the product
    pub root_domain: String,
    /// Explicit Main origin override
    pub main_url: Option<String>,
    /// Explicit App origin override
    pub app_url: Option<String>,
    /// Explicit Admin origin override
    pub admin_url: Option<String>,
    /// Session verification configuration
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to verify session tokens
    pub secret: String,
    /// Expected token issuer
    pub issuer: String,
    /// Path (relative, locale-less) of the sign-in page
    pub sign_in_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            environment: env::var("SYNDIK_ENV").ok(),
            platform_stage: env::var("VERCEL_ENV").ok(),
            preview_host: env::var("VERCEL_URL").ok(),
            root_domain: env::var("SYNDIK_ROOT_DOMAIN").unwrap_or_else(|_| "syndik.ma".to_string()),
            main_url: env::var("SYNDIK_MAIN_URL").ok(),
            app_url: env::var("SYNDIK_APP_URL").ok(),
            admin_url: env::var("SYNDIK_ADMIN_URL").ok(),
            session: SessionConfig {
                secret: env::var("SYNDIK_SESSION_SECRET")
                    .context("SYNDIK_SESSION_SECRET is required")?,
                issuer: env::var("SYNDIK_SESSION_ISSUER")
                    .unwrap_or_else(|_| "https://syndik.ma".to_string()),
                sign_in_path: env::var("SYNDIK_SIGN_IN_PATH")
                    .unwrap_or_else(|_| "/sign-in".to_string()),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Resolve the deployment environment once for the process lifetime.
    ///
    /// Server-side resolution never consults a hostname; the heuristic tier
    /// exists for client runtimes and tests.
    pub fn resolve_environment(&self) -> Environment {
        environment::resolve(
            self.environment.as_deref(),
            self.platform_stage.as_deref(),
            None,
            &self.root_domain,
        )
    }

    /// Base origins consumed by the URL builder.
    pub fn base_urls(&self) -> BaseUrls {
        BaseUrls {
            root_domain: self.root_domain.clone(),
            main: self.main_url.clone(),
            app: self.app_url.clone(),
            admin: self.admin_url.clone(),
            preview: self.preview_host.as_ref().map(|h| format!("https://{h}")),
        }
    }
}
