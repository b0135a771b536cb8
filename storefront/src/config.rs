// vitrine/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Public origin; blob URLs and checkout return URLs are built from it.
  pub app_base_url: String,

  /// `None` selects the in-memory item store.
  pub database_url: Option<String>,
  /// `None` selects the in-memory blob store.
  pub media_dir: Option<PathBuf>,

  pub admin_password: String,

  /// `None` selects the mock payment processor.
  pub payment_endpoint: Option<String>,
  pub payment_api_key: Option<String>,

  pub seed_db: bool,
}

impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("app_base_url", &self.app_base_url)
      .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
      .field("media_dir", &self.media_dir)
      .field("admin_password", &"[REDACTED]")
      .field("payment_endpoint", &self.payment_endpoint)
      .field("payment_api_key", &self.payment_api_key.as_ref().map(|_| "[REDACTED]"))
      .field("seed_db", &self.seed_db)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the configuration from an arbitrary variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let app_base_url = get_env("APP_BASE_URL")
      .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let database_url = get_env("DATABASE_URL");
    let media_dir = get_env("MEDIA_DIR").map(PathBuf::from);

    let admin_password = get_env("ADMIN_PASSWORD")
      .ok_or_else(|| AppError::Config("Missing environment variable 'ADMIN_PASSWORD'".to_string()))?;

    let payment_endpoint = get_env("PAYMENT_ENDPOINT");
    let payment_api_key = get_env("PAYMENT_API_KEY");
    if payment_endpoint.is_some() && payment_api_key.is_none() {
      return Err(AppError::Config(
        "PAYMENT_API_KEY is required when PAYMENT_ENDPOINT is set".to_string(),
      ));
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    let config = Self {
      server_host,
      server_port,
      app_base_url,
      database_url,
      media_dir,
      admin_password,
      payment_endpoint,
      payment_api_key,
      seed_db,
    };
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
