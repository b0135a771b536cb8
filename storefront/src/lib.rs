// vitrine/src/lib.rs

//! Single-seller watch storefront: public catalog, password-gated inventory
//! panel and a checkout handoff to a payment processor.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;

pub use errors::{AppError, Result};
pub use state::AppState;
