// vitrine/src/admin/console.rs

//! The admin panel's mutation flow: one form buffer, a local inventory list and
//! a queue of notices, all behind an open admin session.

use crate::admin::form::ItemForm;
use crate::admin::notice::Notice;
use crate::admin::session::AdminSession;
use crate::errors::{AppError, Result as AppResult};
use crate::models::{Item, ItemId};
use crate::pipelines::delete_item_pipeline::run_delete_item;
use crate::pipelines::login_pipeline::run_login;
use crate::pipelines::save_item_pipeline::run_save_item;
use crate::state::AppState;
use futures_util::future::join_all;
use tracing::{info, instrument, warn};

/// What a submit will do.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
  /// Submit creates a new item.
  Empty,
  /// Submit replaces this item's fields.
  Editing(Item),
}

/// One file picked in the image chooser.
#[derive(Debug, Clone)]
pub struct ImageUpload {
  pub filename: String,
  pub bytes: Vec<u8>,
}

impl ImageUpload {
  pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
    Self {
      filename: filename.into(),
      bytes: bytes.into(),
    }
  }
}

pub struct AdminConsole {
  app_state: AppState,
  session: AdminSession,
  inventory: Vec<Item>,
  mode: FormMode,
  form: ItemForm,
  notices: Vec<Notice>,
}

impl AdminConsole {
  /// Checks the secret, opens a session and loads the inventory.
  pub async fn login(app_state: AppState, password: &str) -> AppResult<Self> {
    let session = run_login(&app_state, password).await?;
    let mut console = Self::resume(app_state, session);
    console.refresh().await;
    Ok(console)
  }

  /// Attaches to an already open session. The inventory starts empty.
  pub fn resume(app_state: AppState, session: AdminSession) -> Self {
    Self {
      app_state,
      session,
      inventory: Vec::new(),
      mode: FormMode::Empty,
      form: ItemForm::default(),
      notices: Vec::new(),
    }
  }

  pub fn session(&self) -> &AdminSession {
    &self.session
  }

  pub fn logout(self) -> bool {
    self.app_state.sessions.close(&self.session)
  }

  pub fn inventory(&self) -> &[Item] {
    &self.inventory
  }

  pub fn mode(&self) -> &FormMode {
    &self.mode
  }

  pub fn form(&self) -> &ItemForm {
    &self.form
  }

  pub fn form_mut(&mut self) -> &mut ItemForm {
    &mut self.form
  }

  pub fn notices(&self) -> &[Notice] {
    &self.notices
  }

  pub fn dismiss_notice(&mut self, index: usize) -> Option<Notice> {
    (index < self.notices.len()).then(|| self.notices.remove(index))
  }

  fn report(&mut self, err: &AppError) {
    warn!(error = %err, "Admin action failed.");
    self.notices.push(Notice::from(err));
  }

  fn ensure_session(&self) -> AppResult<()> {
    if self.app_state.sessions.is_open(&self.session) {
      Ok(())
    } else {
      Err(AppError::AuthFailed("Admin session is closed.".to_string()))
    }
  }

  /// Re-lists the inventory. On failure the list is emptied and a notice is queued.
  #[instrument(name = "console::refresh", skip(self))]
  pub async fn refresh(&mut self) -> bool {
    match self.app_state.catalog.list().await {
      Ok(items) => {
        self.inventory = items;
        true
      }
      Err(e) => {
        self.inventory.clear();
        self.report(&e);
        false
      }
    }
  }

  /// Loads the item from the local inventory into the form.
  pub fn begin_edit(&mut self, id: ItemId) -> AppResult<()> {
    let Some(item) = self.inventory.iter().find(|item| item.id == id).cloned() else {
      let err = AppError::NotFound(format!("Watch {} not found.", id));
      self.report(&err);
      return Err(err);
    };
    self.form = ItemForm::from_item(&item);
    self.mode = FormMode::Editing(item);
    Ok(())
  }

  /// Back to an empty form; unsaved changes are dropped.
  pub fn cancel_edit(&mut self) {
    self.mode = FormMode::Empty;
    self.form = ItemForm::default();
  }

  /// Uploads every file at once and appends the URLs in selection order.
  /// Returns how many were attached; each failure queues one notice.
  #[instrument(name = "console::attach_images", skip(self, files), fields(count = files.len()))]
  pub async fn attach_images(&mut self, files: Vec<ImageUpload>) -> usize {
    if let Err(e) = self.ensure_session() {
      self.report(&e);
      return 0;
    }

    let catalog = self.app_state.catalog.clone();
    let uploads = files.into_iter().enumerate().map(|(index, file)| {
      let catalog = catalog.clone();
      async move {
        let result = catalog.upload_image(&file.filename, file.bytes).await;
        (index, file.filename, result)
      }
    });
    let mut results = join_all(uploads).await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut attached = 0;
    for (index, filename, result) in results {
      match result {
        Ok(url) => {
          self.form.image_urls.push(url);
          attached += 1;
        }
        Err(e) => {
          warn!(index, %filename, error = %e, "Image upload failed.");
          let err = match e {
            AppError::UploadFailed(_) => e,
            other => AppError::UploadFailed(other.to_string()),
          };
          self.report(&err);
        }
      }
    }
    attached
  }

  pub fn remove_image(&mut self, index: usize) -> Option<String> {
    self.form.remove_image(index)
  }

  /// Creates or updates from the form. Invalid input never reaches the store;
  /// on success the form resets and the inventory is re-fetched.
  #[instrument(name = "console::submit", skip(self))]
  pub async fn submit(&mut self) -> AppResult<Item> {
    let attempt = async {
      self.ensure_session()?;
      let fields = self.form.to_fields()?;
      let target = match &self.mode {
        FormMode::Empty => None,
        FormMode::Editing(item) => Some(item.id),
      };
      run_save_item(&self.app_state, target, fields).await
    };

    let result = attempt.await;
    match result {
      Ok(outcome) => {
        let created = matches!(self.mode, FormMode::Empty);
        self.cancel_edit();
        self.inventory = outcome.inventory;
        self.notices.push(Notice::success(if created { "Watch added!" } else { "Watch updated!" }));
        if let Some(message) = outcome.refresh_error {
          self.inventory.clear();
          self.notices.push(Notice::error(message));
        }
        info!(item_id = %outcome.saved.id, created, "Submission saved.");
        Ok(outcome.saved)
      }
      Err(e) => {
        self.report(&e);
        Err(e)
      }
    }
  }

  /// Without confirmation nothing happens. After a confirmed delete the item is
  /// dropped from the local list by id; the inventory is not re-fetched.
  #[instrument(name = "console::delete", skip(self), fields(item_id = %id))]
  pub async fn delete(&mut self, id: ItemId, confirmed: bool) -> AppResult<bool> {
    if let Err(e) = self.ensure_session() {
      self.report(&e);
      return Err(e);
    }
    match run_delete_item(&self.app_state, id, confirmed).await {
      Ok(true) => {
        self.inventory.retain(|item| item.id != id);
        if matches!(&self.mode, FormMode::Editing(item) if item.id == id) {
          self.cancel_edit();
        }
        self.notices.push(Notice::success("Watch deleted."));
        Ok(true)
      }
      Ok(false) => Ok(false),
      Err(e) => {
        self.report(&e);
        Err(e)
      }
    }
  }
}
