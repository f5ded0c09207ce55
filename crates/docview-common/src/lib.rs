//! Shared vocabulary for the docview controller crates.

pub mod errors;
pub mod notifications;
pub mod types;

pub use errors::{ConfigError, DocviewError};
pub use notifications::{Toast, ToastQueue, DEFAULT_TOAST_TTL};
pub use types::{FileCategory, FileCounts, FileEntry, SidebarState, StorageVolume, ViewState};

pub type Result<T> = std::result::Result<T, DocviewError>;
