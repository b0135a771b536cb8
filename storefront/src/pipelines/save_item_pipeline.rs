// vitrine/src/pipelines/save_item_pipeline.rs

use crate::errors::AppError;
use crate::models::{Item, ItemFields, ItemId};
use crate::pipelines::contexts::SaveItemCtxData;
use crate::state::AppState;
use tracing::{error, info, instrument, warn};
use vitrine_flow::{ContextData, FlowRegistry, Pipeline, PipelineControl, PipelineResult};

/// validate → persist (create or update) → re-list the inventory.
pub fn register_save_item_pipeline(registry: &FlowRegistry<AppError>) {
  let mut p = Pipeline::<SaveItemCtxData, AppError>::new(&[
    ("validate_item_fields", false, None),
    ("persist_item", false, None),
    ("refresh_inventory", false, None),
  ]);

  // Step 1: Validate. Nothing reaches the store unless this passes.
  p.on_root("validate_item_fields", |ctx_data: ContextData<SaveItemCtxData>| {
    Box::pin(async move {
      let result = ctx_data.read().fields.validate();
      if let Err(e) = &result {
        warn!(error = %e, "Item submission rejected.");
      }
      result.map(|_| PipelineControl::Continue)
    })
  });

  // Step 2: Create when there is no target, otherwise replace the target's fields
  p.on_root("persist_item", |ctx_data: ContextData<SaveItemCtxData>| {
    Box::pin(async move {
      let (catalog, target, fields) = {
        // Read scope
        let guard = ctx_data.read();
        (guard.app_state.catalog.clone(), guard.target, guard.fields.clone())
      }; // guard dropped

      let saved = match target {
        None => catalog.create(fields).await?,
        Some(id) => catalog.update(id, fields).await?,
      };
      info!(item_id = %saved.id, created = target.is_none(), "Item persisted.");
      ctx_data.write().saved = Some(saved);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  // Step 3: Re-list the inventory. A failure here does not undo the save; it
  // is reported alongside it.
  p.on_root("refresh_inventory", |ctx_data: ContextData<SaveItemCtxData>| {
    Box::pin(async move {
      let catalog = ctx_data.read().app_state.catalog.clone();
      match catalog.list().await {
        Ok(items) => {
          let mut guard = ctx_data.write();
          guard.inventory = items;
          guard.refresh_error = None;
        }
        Err(e) => {
          error!(error = %e, "Inventory refresh after save failed.");
          ctx_data.write().refresh_error = Some(e.user_message());
        }
      }
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  registry.register_pipeline(p);
}

/// Result of a completed save.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
  pub saved: Item,
  pub inventory: Vec<Item>,
  pub refresh_error: Option<String>,
}

#[instrument(name = "save_item::run", skip_all, fields(target = ?target))]
pub async fn run_save_item(
  app_state: &AppState,
  target: Option<ItemId>,
  fields: ItemFields,
) -> Result<SaveOutcome, AppError> {
  let ctx = ContextData::new(SaveItemCtxData::new(app_state.clone(), target, fields));
  match app_state.flows.run(ctx.clone()).await? {
    PipelineResult::Completed => {
      let data = ctx.snapshot();
      let saved = data
        .saved
        .ok_or_else(|| AppError::Internal("Save completed without a stored item.".to_string()))?;
      Ok(SaveOutcome {
        saved,
        inventory: data.inventory,
        refresh_error: data.refresh_error,
      })
    }
    PipelineResult::Stopped => Err(AppError::Internal("Save was halted by a handler.".to_string())),
  }
}
