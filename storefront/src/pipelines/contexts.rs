// vitrine/src/pipelines/contexts.rs

//! Data the application pipelines run over. Handlers receive these wrapped in
//! `vitrine_flow::ContextData`.

use crate::admin::session::AdminSession;
use crate::models::{Item, ItemFields, ItemId};
use crate::services::payment_gateway::{CheckoutRequest, PaymentSession, SessionRequest};
use crate::state::AppState;

#[derive(Clone)]
pub struct LoginCtxData {
  pub app_state: AppState,
  pub password: String,
  pub session: Option<AdminSession>,
}

impl LoginCtxData {
  pub fn new(app_state: AppState, password: impl Into<String>) -> Self {
    Self {
      app_state,
      password: password.into(),
      session: None,
    }
  }
}

/// Create when `target` is `None`, otherwise update that item.
#[derive(Clone)]
pub struct SaveItemCtxData {
  pub app_state: AppState,
  pub target: Option<ItemId>,
  pub fields: ItemFields,
  pub saved: Option<Item>,
  pub inventory: Vec<Item>,
  /// Set when the save went through but re-listing the inventory did not.
  pub refresh_error: Option<String>,
}

impl SaveItemCtxData {
  pub fn new(app_state: AppState, target: Option<ItemId>, fields: ItemFields) -> Self {
    Self {
      app_state,
      target,
      fields,
      saved: None,
      inventory: Vec::new(),
      refresh_error: None,
    }
  }

  pub fn is_create(&self) -> bool {
    self.target.is_none()
  }
}

#[derive(Clone)]
pub struct DeleteItemCtxData {
  pub app_state: AppState,
  pub item_id: ItemId,
  pub confirmed: bool,
  pub deleted: bool,
}

impl DeleteItemCtxData {
  pub fn new(app_state: AppState, item_id: ItemId, confirmed: bool) -> Self {
    Self {
      app_state,
      item_id,
      confirmed,
      deleted: false,
    }
  }
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub request: CheckoutRequest,
  pub session_request: Option<SessionRequest>,
  pub session: Option<PaymentSession>,
  pub redirect_url: Option<String>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, request: CheckoutRequest) -> Self {
    Self {
      app_state,
      request,
      session_request: None,
      session: None,
      redirect_url: None,
    }
  }
}
