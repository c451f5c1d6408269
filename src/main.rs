mod app;
mod application;
mod domain;
mod ui;
mod utils;

use iced::window;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(app::LoadApp::default, app::update, app::view)
        .subscription(app::subscription)
        .title("Load App")
        .window(window::Settings {
            size: iced::Size::new(460.0, 600.0),
            ..Default::default()
        })
        .run()
}
