pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    900.0
}

pub(crate) fn default_tile_min_width() -> f32 {
    300.0
}

pub(crate) fn default_tile_height() -> f32 {
    300.0
}

pub(crate) fn default_initial_page_size() -> u32 {
    24
}

pub(crate) fn default_load_more_size() -> u32 {
    12
}

pub(crate) fn default_load_more_offset_px() -> f32 {
    300.0
}

pub(crate) fn default_error_display_secs() -> f32 {
    5.0
}

pub(crate) fn default_api_base_url() -> String {
    gallery_core::cat_api::DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_api_key_env() -> String {
    "THE_CAT_API_KEY".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_quit() -> String {
    "q".to_string()
}

pub(crate) fn default_key_load_more() -> String {
    "r".to_string()
}
