// tests/common/mod.rs
#![allow(dead_code)]

use once_cell::sync::Lazy;
use tracing::Level;
use vitrine_flow::{ContextData, FlowError, Handler, PipelineControl};

/// A listing being pushed through a multi-step save, the shape most storefront
/// pipelines have.
#[derive(Clone, Debug, Default)]
pub struct DraftContext {
  pub name: String,
  pub price: f64,
  pub revision: i32,
  pub trail: Vec<String>,
  pub stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("flow error: {0}")]
  Flow(String),

  #[error("step failed: {0}")]
  Step(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

/// Records `step_name` in the trail, bumps the revision and honours `stop_at`.
pub fn recording_handler(step_name: &'static str) -> Handler<DraftContext, TestError> {
  Box::new(move |ctx: ContextData<DraftContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.revision += 1;
      guard.trail.push(step_name.to_string());
      if guard.stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn failing_handler(step_name: &'static str, message: &'static str) -> Handler<DraftContext, TestError> {
  Box::new(move |ctx: ContextData<DraftContext>| {
    Box::pin(async move {
      ctx.write().trail.push(step_name.to_string());
      Err(TestError::Step(message.to_string()))
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
