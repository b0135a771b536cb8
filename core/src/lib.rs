// vitrine-flow/src/lib.rs

//! Async named-step pipelines for the Vitrine storefront.
//!
//! A pipeline is an ordered list of named steps. Each step carries `before`,
//! `on` and `after` handlers that receive the run's shared `ContextData<T>`,
//! may stop the run early, or fail with the application's error type. Steps
//! can be optional or skipped by a predicate. A `FlowRegistry` maps each
//! context type to its pipeline so callers only build a context and run it.
//!
//! ```ignore
//! let mut p = Pipeline::<SaveCtx, AppError>::new(&[("validate", false, None), ("persist", false, None)]);
//! p.on_root("validate", |ctx| Box::pin(async move { Ok::<_, AppError>(PipelineControl::Continue) }));
//! registry.register_pipeline(p);
//! registry.run(ContextData::new(save_ctx)).await?;
//! ```

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context::{Handler, HandlerFuture};
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};
pub use crate::error::{FlowError, FlowResult};
pub use crate::pipeline::definition::Pipeline;
pub use crate::registry::FlowRegistry;
