pub mod app_shell;
pub mod modal_service;
pub mod notifications;
pub mod sidebar;

pub use app_shell::Shell;
pub use modal_service::{Modal, ModalService};
pub use notifications::{use_notifications, NotificationService, NotificationTray};
