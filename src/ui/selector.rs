use iced::widget::{button, canvas, column, container, mouse_area, radio, row, text, Space};
use iced::{Element, Length};

use crate::application::CompletionNotice;
use crate::domain::DownloadTarget;
use crate::ui::loading_button::LoadingButton;

/// Main screen state
pub struct SelectorView {
    pub selected: Option<DownloadTarget>,
    pub status_message: String,
    pub button: LoadingButton,
    pub notice: Option<CompletionNotice>,
}

impl Default for SelectorView {
    fn default() -> Self {
        Self {
            selected: None,
            status_message: "Pick a repository, then hit Download".to_string(),
            button: LoadingButton::default(),
            notice: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SelectorMessage {
    TargetPicked(DownloadTarget),
    DownloadPressed,
    NoticeActionPressed,
}

impl SelectorView {
    pub fn update(&mut self, message: SelectorMessage) {
        match message {
            SelectorMessage::TargetPicked(target) => {
                self.selected = Some(target);
            }
            SelectorMessage::DownloadPressed | SelectorMessage::NoticeActionPressed => {
                // Handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, SelectorMessage> {
        let mut content = column![
            text("Load App").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Pick a repository to download:").size(16),
            radio(
                DownloadTarget::Glide.description(),
                DownloadTarget::Glide,
                self.selected,
                SelectorMessage::TargetPicked,
            ),
            radio(
                DownloadTarget::LoadApp.description(),
                DownloadTarget::LoadApp,
                self.selected,
                SelectorMessage::TargetPicked,
            ),
            radio(
                DownloadTarget::Retrofit.description(),
                DownloadTarget::Retrofit,
                self.selected,
                SelectorMessage::TargetPicked,
            ),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            mouse_area(
                canvas(&self.button)
                    .width(Length::Fill)
                    .height(Length::Fixed(72.0)),
            )
            .on_press(SelectorMessage::DownloadPressed),
        ]
        .padding(20)
        .spacing(10);

        if let Some(notice) = &self.notice {
            content = content.push(Space::new().height(Length::Fixed(16.0)));
            content = content.push(
                container(
                    row![
                        column![
                            text(&notice.title).size(14),
                            text(&notice.body).size(12),
                        ]
                        .spacing(4),
                        Space::new().width(Length::Fill),
                        button(text(notice.action_label.as_str()).size(12))
                            .on_press(SelectorMessage::NoticeActionPressed),
                    ]
                    .spacing(10),
                )
                .padding(10)
                .width(Length::Fill)
                .style(container::bordered_box),
            );
        }

        content.into()
    }
}
