use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::{Subscription, Task};

use crate::application::{
    CompletionNotice, DownloadEvent, DownloadId, DownloadRequest, DownloadService,
    HttpDownloadService, LogNotifier, NotificationService,
};
use crate::domain::{AppError, DownloadReport, Outcome};
use crate::ui::{DetailMessage, DetailView, SelectorMessage, SelectorView};
use crate::utils::archive_file_name;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct LoadApp {
    selector: SelectorView,
    screen: Screen,
    downloads: Arc<dyn DownloadService + Send + Sync>,
    notifier: Arc<dyn NotificationService + Send + Sync>,
    // At most one download in flight; presses are ignored while this is set.
    outstanding: Option<OutstandingDownload>,
}

enum Screen {
    Selector,
    Detail(DetailView),
}

struct OutstandingDownload {
    id: DownloadId,
    label: String,
}

impl Default for LoadApp {
    fn default() -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
        Self::with_services(
            Arc::new(HttpDownloadService::new(download_dir)),
            Arc::new(LogNotifier),
        )
    }
}

impl LoadApp {
    pub fn with_services(
        downloads: Arc<dyn DownloadService + Send + Sync>,
        notifier: Arc<dyn NotificationService + Send + Sync>,
    ) -> Self {
        Self {
            selector: SelectorView::default(),
            screen: Screen::Selector,
            downloads,
            notifier,
            outstanding: None,
        }
    }

    fn is_downloading(&self) -> bool {
        self.outstanding.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Selector(SelectorMessage),
    Detail(DetailMessage),
    Download(DownloadEvent),
    Tick(Instant),
}

pub fn update(app: &mut LoadApp, message: Message) -> Task<Message> {
    match message {
        Message::Selector(ui_msg) => {
            app.selector.update(ui_msg.clone());

            match ui_msg {
                SelectorMessage::DownloadPressed => {
                    if app.is_downloading() || app.selector.button.is_animating() {
                        return Task::none();
                    }

                    let Some(target) = app.selector.selected else {
                        app.selector.status_message = AppError::NoSelection.to_string();
                        return Task::none();
                    };

                    let now = Instant::now();
                    app.selector.button.press();
                    app.selector.button.start_loading(now);
                    app.selector.status_message = format!("Downloading {}...", target.label());

                    let request = DownloadRequest::new(
                        target.url(),
                        archive_file_name(target.label()),
                    );
                    let (id, events) = app.downloads.enqueue(request);
                    app.outstanding = Some(OutstandingDownload {
                        id,
                        label: target.label().to_string(),
                    });

                    return Task::stream(events).map(Message::Download);
                }
                SelectorMessage::NoticeActionPressed => {
                    if let Some(notice) = &app.selector.notice {
                        app.screen = Screen::Detail(DetailView::new(
                            notice.report.clone(),
                            Instant::now(),
                        ));
                    }
                }
                SelectorMessage::TargetPicked(_) => {}
            }
        }
        Message::Download(DownloadEvent::Completed(id)) => {
            // Any completion signal re-enables the trigger.
            let label = match app.outstanding.take() {
                Some(outstanding) => {
                    if outstanding.id != id {
                        tracing::warn!(
                            expected = outstanding.id,
                            received = id,
                            "completion signal for a different handle"
                        );
                    }
                    outstanding.label
                }
                None => String::new(),
            };

            let outcome = Outcome::from_status(app.downloads.status(id));
            let report = DownloadReport::new(label, outcome);

            let notice = CompletionNotice::for_report(report.clone());
            app.notifier.post(&notice);
            app.selector.notice = Some(notice);
            app.selector.status_message = format!("Last download: {}", report.outcome);

            app.screen = Screen::Detail(DetailView::new(report, Instant::now()));
        }
        Message::Detail(DetailMessage::OkPressed) => {
            app.screen = Screen::Selector;
        }
        Message::Tick(now) => {
            app.selector.button.tick(now);
            if let Screen::Detail(detail) = &mut app.screen {
                detail.tick(now);
            }
        }
    }

    Task::none()
}

pub fn view(app: &LoadApp) -> iced::Element<'_, Message> {
    match &app.screen {
        Screen::Selector => app.selector.view().map(Message::Selector),
        Screen::Detail(detail) => detail.view().map(Message::Detail),
    }
}

pub fn subscription(app: &LoadApp) -> Subscription<Message> {
    let detail_animating = matches!(&app.screen, Screen::Detail(detail) if detail.is_animating());

    if app.selector.button.is_animating() || detail_animating {
        iced::time::every(FRAME_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use futures::stream::BoxStream;
    use futures::StreamExt;

    use crate::domain::{DownloadTarget, TerminalStatus};
    use crate::ui::ButtonState;

    #[derive(Default)]
    struct FakeDownloadService {
        requests: Mutex<Vec<DownloadRequest>>,
        statuses: Mutex<HashMap<DownloadId, TerminalStatus>>,
        next_id: AtomicU64,
    }

    impl FakeDownloadService {
        fn set_status(&self, id: DownloadId, status: TerminalStatus) {
            self.statuses.lock().unwrap().insert(id, status);
        }

        fn requests(&self) -> Vec<DownloadRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl DownloadService for FakeDownloadService {
        fn enqueue(
            &self,
            request: DownloadRequest,
        ) -> (DownloadId, BoxStream<'static, DownloadEvent>) {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            self.requests.lock().unwrap().push(request);
            // Completion is injected by the test as a message.
            (id, futures::stream::empty().boxed())
        }

        fn status(&self, id: DownloadId) -> Option<TerminalStatus> {
            self.statuses.lock().unwrap().get(&id).copied()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        posted: Mutex<Vec<CompletionNotice>>,
    }

    impl NotificationService for RecordingNotifier {
        fn post(&self, notice: &CompletionNotice) {
            self.posted.lock().unwrap().push(notice.clone());
        }
    }

    fn fixture() -> (LoadApp, Arc<FakeDownloadService>, Arc<RecordingNotifier>) {
        let downloads = Arc::new(FakeDownloadService::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let app = LoadApp::with_services(downloads.clone(), notifier.clone());
        (app, downloads, notifier)
    }

    #[test]
    fn pressing_without_selection_issues_no_request() {
        let (mut app, downloads, _) = fixture();

        let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));

        assert!(downloads.requests().is_empty());
        assert!(!app.is_downloading());
        assert_eq!(app.selector.button.state(), ButtonState::Completed);
        assert_eq!(
            app.selector.status_message,
            "No item selected, please select an item"
        );
    }

    #[test]
    fn each_target_issues_one_request_with_its_url() {
        for target in DownloadTarget::ALL {
            let (mut app, downloads, _) = fixture();

            let _ = update(
                &mut app,
                Message::Selector(SelectorMessage::TargetPicked(target)),
            );
            let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));

            let requests = downloads.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].url, target.url());
            assert!(!requests[0].requires_charging);
            assert!(requests[0].allowed_over_metered);
            assert!(requests[0].allowed_over_roaming);

            assert!(app.is_downloading());
            assert_eq!(app.selector.button.state(), ButtonState::Loading);
        }
    }

    #[test]
    fn trigger_is_soft_disabled_while_in_flight() {
        let (mut app, downloads, _) = fixture();

        let _ = update(
            &mut app,
            Message::Selector(SelectorMessage::TargetPicked(DownloadTarget::Glide)),
        );
        let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));
        let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));

        assert_eq!(downloads.requests().len(), 1);
    }

    #[test]
    fn completion_reenables_trigger_and_opens_detail() {
        let cases = [
            (Some(TerminalStatus::Successful), "Success"),
            (Some(TerminalStatus::Failed), "Failed"),
            (None, "Unknown"),
        ];

        for (status, expected) in cases {
            let (mut app, downloads, notifier) = fixture();

            let _ = update(
                &mut app,
                Message::Selector(SelectorMessage::TargetPicked(DownloadTarget::Retrofit)),
            );
            let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));

            if let Some(status) = status {
                downloads.set_status(1, status);
            }
            let _ = update(&mut app, Message::Download(DownloadEvent::Completed(1)));

            assert!(!app.is_downloading());

            let Screen::Detail(detail) = &app.screen else {
                panic!("expected detail screen");
            };
            assert_eq!(detail.report().label, "Retrofit");
            assert_eq!(detail.report().outcome, expected);

            let posted = notifier.posted.lock().unwrap();
            assert_eq!(posted.len(), 1);
            assert_eq!(posted[0].report.outcome, expected);
        }
    }

    #[test]
    fn notice_action_reopens_detail_screen() {
        let (mut app, downloads, _) = fixture();

        let _ = update(
            &mut app,
            Message::Selector(SelectorMessage::TargetPicked(DownloadTarget::Glide)),
        );
        let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));
        downloads.set_status(1, TerminalStatus::Successful);
        let _ = update(&mut app, Message::Download(DownloadEvent::Completed(1)));

        let _ = update(&mut app, Message::Detail(DetailMessage::OkPressed));
        assert!(matches!(app.screen, Screen::Selector));

        let _ = update(
            &mut app,
            Message::Selector(SelectorMessage::NoticeActionPressed),
        );
        let Screen::Detail(detail) = &app.screen else {
            panic!("expected detail screen after notice action");
        };
        assert_eq!(detail.report().outcome, "Success");
    }

    #[test]
    fn ticks_drive_the_button_back_to_completed() {
        let (mut app, _, _) = fixture();

        let _ = update(
            &mut app,
            Message::Selector(SelectorMessage::TargetPicked(DownloadTarget::LoadApp)),
        );
        let _ = update(&mut app, Message::Selector(SelectorMessage::DownloadPressed));
        assert!(app.selector.button.is_animating());

        let _ = update(
            &mut app,
            Message::Tick(Instant::now() + Duration::from_secs(3)),
        );
        assert_eq!(app.selector.button.state(), ButtonState::Completed);
        assert!(!app.selector.button.is_animating());
    }
}
