// vitrine/src/pipelines/mod.rs

//! The application's multi-step workflows, registered once at startup.

use crate::errors::AppError;
use vitrine_flow::FlowRegistry;

pub mod checkout_pipeline;
pub mod contexts;
pub mod delete_item_pipeline;
pub mod login_pipeline;
pub mod save_item_pipeline;

pub fn register_all_pipelines(registry: &FlowRegistry<AppError>) {
  tracing::info!("Registering application pipelines...");

  login_pipeline::register_login_pipeline(registry);
  save_item_pipeline::register_save_item_pipeline(registry);
  delete_item_pipeline::register_delete_item_pipeline(registry);
  checkout_pipeline::register_checkout_pipeline(registry);

  tracing::info!(count = registry.len(), "All application pipelines registered.");
}
