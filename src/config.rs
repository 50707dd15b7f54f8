//! Environment-driven configuration.
//!
//! Everything comes from the process environment (usually via `.env`).
//! Required variables fail startup loudly; optional blocks (SMTP, the
//! price-list gate) degrade the matching feature instead.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Supabase project coordinates: the Postgres pool and the Storage API.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub database_url: String,
    pub project_url: String,
    pub service_key: String,
    pub quotes_bucket: String,
    pub branding_bucket: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("SUPABASE_DATABASE_URL")?,
            project_url: required("SUPABASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            service_key: required("SUPABASE_SERVICE_KEY")?,
            quotes_bucket: optional("SUPABASE_QUOTES_BUCKET")
                .unwrap_or_else(|| "quotes".to_string()),
            branding_bucket: optional("SUPABASE_BRANDING_BUCKET")
                .unwrap_or_else(|| "branding".to_string()),
        })
    }
}

/// SMTP block for the internal notification email. The whole block is
/// optional: without `SMTP_HOST` notifications are disabled.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
    pub from_email: String,
    pub notify_to: String,
    pub timeout_secs: u64,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = optional("SMTP_HOST") else {
            return Ok(None);
        };

        let port = match optional("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "SMTP_PORT",
                reason: e.to_string(),
            })?,
            None => 587,
        };
        let timeout_secs = match optional("SMTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "SMTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => 15,
        };

        Ok(Some(Self {
            host,
            port,
            username: optional("SMTP_USERNAME").unwrap_or_default(),
            password: optional("SMTP_PASSWORD").unwrap_or_default(),
            from_name: optional("SMTP_FROM_NAME").unwrap_or_else(|| "Strelka Form".to_string()),
            from_email: optional("SMTP_FROM_EMAIL")
                .unwrap_or_else(|| "noreply@strelka.it".to_string()),
            notify_to: optional("CONTACT_NOTIFY_TO")
                .unwrap_or_else(|| "contact@strelka.it".to_string()),
            timeout_secs,
        }))
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase: SupabaseConfig,
    pub smtp: Option<SmtpConfig>,
    pub pricelist_password: Option<String>,
    pub bind_addr: String,
    pub bind_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_port = match optional("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        Ok(Self {
            supabase: SupabaseConfig::from_env()?,
            smtp: SmtpConfig::from_env()?,
            pricelist_password: optional("PRICELIST_PASSWORD"),
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            bind_port,
        })
    }
}
