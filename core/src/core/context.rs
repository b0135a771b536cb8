// vitrine-flow/src/core/context.rs

//! The boxed handler type stored by a pipeline.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a stored handler.
pub type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>;

/// A step handler.
///
/// Each invocation receives its own clone of the run's `ContextData<TData>`.
/// Handlers copy what they need out of a guard, drop the guard, then await;
/// results are written back under a fresh guard.
pub type Handler<TData, Err> = Box<dyn Fn(ContextData<TData>) -> HandlerFuture<Err> + Send + Sync>;
