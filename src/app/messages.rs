use gallery_core::GalleryError;
use gallery_core::cat_api::CatImage;
use gallery_core::load_more::Dispatch;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    Scrolled {
        scroll_top: f32,
        viewport_width: f32,
        viewport_height: f32,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    /// Ask for one more batch without scrolling.
    LoadMoreRequested,
    BatchLoaded {
        dispatch: Dispatch,
        result: Result<Vec<CatImage>, GalleryError>,
    },
    DismissError,
    Tick(Instant),
    Quit,
}
