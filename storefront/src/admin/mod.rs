// vitrine/src/admin/mod.rs

pub mod console;
pub mod form;
pub mod notice;
pub mod session;

pub use console::{AdminConsole, FormMode, ImageUpload};
pub use form::ItemForm;
pub use notice::{Notice, NoticeKind};
pub use session::{AdminSession, AdminSessions};
