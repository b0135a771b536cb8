// tests/error_handling_tests.rs
mod common;

use common::*;
use serial_test::serial;
use vitrine_flow::{ContextData, FlowError, Pipeline, PipelineControl};

#[tokio::test]
#[serial]
async fn anyhow_errors_become_handler_errors() {
  setup_tracing();
  let mut pipeline = Pipeline::<DraftContext, FlowError>::new(&[("upload", false, None)]);
  pipeline.on_root("upload", |_ctx: ContextData<DraftContext>| {
    Box::pin(async move {
      let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "blob store hung up");
      Err::<PipelineControl, FlowError>(anyhow::Error::new(io).into())
    })
  });

  match pipeline.run(ContextData::new(DraftContext::default())).await {
    Err(FlowError::HandlerError { source }) => {
      assert!(source.to_string().contains("blob store hung up"));
      assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
    other => panic!("expected HandlerError, got {:?}", other),
  }
}

#[tokio::test]
#[serial]
async fn engine_errors_display_the_step_name() {
  setup_tracing();
  let pipeline = Pipeline::<DraftContext, FlowError>::new(&[("refresh_inventory", false, None)]);
  let err = pipeline.run(ContextData::new(DraftContext::default())).await.unwrap_err();
  assert_eq!(err.to_string(), "Handler missing for non-optional step: refresh_inventory");
}
