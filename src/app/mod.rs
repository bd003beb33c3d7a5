mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::theme::Theme;
use iced::{Size, window};

/// Launches the gallery window and starts the first fetch.
pub fn run_app(app: App) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(app.config.window_width, app.config.window_height),
        ..window::Settings::default()
    };

    iced::application("Cat Gallery", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| iced::Theme::from(Theme::from(app.config.theme)))
        .run_with(move || app.bootstrap())
}
