// vitrine/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use vitrine::catalog::seed::seed_demo_catalog;
use vitrine::config::AppConfig;
use vitrine::state::AppState;
use vitrine::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  // Configuration: .env, then process environment
  let app_config = AppConfig::from_env().map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  let server_address = app_config.server_address();
  let seed_db = app_config.seed_db;

  // Backends are picked from the configuration
  let app_state = AppState::from_config(app_config).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to initialise application state.");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  })?;

  // Optional demo data; a failure here is logged and does not stop startup.
  if seed_db {
    if let Err(e) = seed_demo_catalog(&app_state.catalog).await {
      tracing::error!(error = %e, "Failed to seed the catalog.");
    }
  }

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
