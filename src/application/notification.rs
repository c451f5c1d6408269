use crate::domain::DownloadReport;

/// Notice posted once per finished download. The selector screen renders it
/// as a banner whose single action reopens the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionNotice {
    pub title: String,
    pub body: String,
    pub action_label: String,
    pub report: DownloadReport,
}

impl CompletionNotice {
    pub fn for_report(report: DownloadReport) -> Self {
        Self {
            title: "Load App".to_string(),
            body: format!("The {} repository download has finished", report.label),
            action_label: "Check the status".to_string(),
            report,
        }
    }
}

pub trait NotificationService {
    fn post(&self, notice: &CompletionNotice);
}

/// Production notifier: emits the notice as a structured log event. The
/// user-visible surface is the selector-screen banner built from the same
/// notice.
pub struct LogNotifier;

impl NotificationService for LogNotifier {
    fn post(&self, notice: &CompletionNotice) {
        tracing::info!(
            title = %notice.title,
            item = %notice.report.label,
            outcome = %notice.report.outcome,
            "{}",
            notice.body
        );
    }
}
