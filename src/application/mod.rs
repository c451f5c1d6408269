pub mod download;
pub mod notification;

pub use download::{DownloadEvent, DownloadId, DownloadRequest, DownloadService, HttpDownloadService};
pub use notification::{CompletionNotice, LogNotifier, NotificationService};
