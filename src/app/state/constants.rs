use gallery_core::intersection::ElementKey;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Grid geometry shared by the view and the sentinel math.
pub(crate) const GRID_PADDING_PX: f32 = 16.0;
pub(crate) const GRID_SPACING_PX: f32 = 12.0;
pub(crate) const SENTINEL_HEIGHT_PX: f32 = 1.0;
/// Rough height of the header, used until the scrollable reports its bounds.
pub(crate) const HEADER_HEIGHT_PX: f32 = 56.0;
pub(crate) const ERROR_TICK_MS: u64 = 250;
pub(crate) const SENTINEL_KEY: ElementKey = ElementKey(1);
pub(crate) static GALLERY_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("gallery-scroll"));
