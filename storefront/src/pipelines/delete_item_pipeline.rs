// vitrine/src/pipelines/delete_item_pipeline.rs

use crate::errors::AppError;
use crate::models::ItemId;
use crate::pipelines::contexts::DeleteItemCtxData;
use crate::state::AppState;
use tracing::{info, instrument};
use vitrine_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl, PipelineResult};

/// confirm → delete. Inventory refresh is left to the caller.
pub fn register_delete_item_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<DeleteItemCtxData, AppError>::new(&[
    ("confirm_deletion", false, None),
    ("delete_item", false, None),
  ]);

  // Step 1: Confirmation gate. Unconfirmed stops quietly and nothing is deleted.
  p.on_root("confirm_deletion", |ctx_data: ContextData<DeleteItemCtxData>| {
    Box::pin(async move {
      let (confirmed, item_id) = {
        let guard = ctx_data.read();
        (guard.confirmed, guard.item_id)
      };
      if !confirmed {
        info!(%item_id, "Deletion not confirmed.");
        return Ok::<_, AppError>(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Remove the record. Missing ids succeed.
  p.on_root("delete_item", |ctx_data: ContextData<DeleteItemCtxData>| {
    Box::pin(async move {
      let (catalog, item_id) = {
        // Read scope
        let guard = ctx_data.read();
        (guard.app_state.catalog.clone(), guard.item_id)
      }; // guard dropped before the store call
      catalog.delete(item_id).await?;
      ctx_data.write().deleted = true;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  registry.register_pipeline(p);
}

/// `Ok(false)` when the deletion was not confirmed and nothing happened.
#[instrument(name = "delete_item::run", skip(app_state), fields(item_id = %item_id))]
pub async fn run_delete_item(app_state: &AppState, item_id: ItemId, confirmed: bool) -> Result<bool, AppError> {
  let ctx = ContextData::new(DeleteItemCtxData::new(app_state.clone(), item_id, confirmed));
  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => Ok(ctx.read().deleted),
    PipelineResult::Stopped => Ok(false),
  }
}
