use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use gallery_core::cat_api::{ImageOrder, ImageSize};
use gallery_core::load_more::LoadPolicy;
use serde::Deserialize;

/// On-disk layout of `config.toml`, one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    gallery: GalleryConfig,
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    keys: KeysConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            tile_min_width: tables.appearance.tile_min_width,
            tile_height: tables.appearance.tile_height,
            initial_page_size: tables.gallery.initial_page_size,
            load_more_size: tables.gallery.load_more_size,
            load_more_offset_px: tables.gallery.load_more_offset_px,
            load_policy: tables.gallery.load_policy,
            error_display_secs: tables.gallery.error_display_secs,
            api_base_url: tables.api.base_url,
            api_key: tables.api.api_key,
            api_key_env: tables.api.api_key_env,
            image_size: tables.api.image_size,
            image_order: tables.api.order,
            log_level: tables.logging.log_level,
            key_quit: tables.keys.quit,
            key_load_more: tables.keys.load_more,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                window_width: config.window_width,
                window_height: config.window_height,
                tile_min_width: config.tile_min_width,
                tile_height: config.tile_height,
            },
            gallery: GalleryConfig {
                initial_page_size: config.initial_page_size,
                load_more_size: config.load_more_size,
                load_more_offset_px: config.load_more_offset_px,
                load_policy: config.load_policy,
                error_display_secs: config.error_display_secs,
            },
            api: ApiConfig {
                base_url: config.api_base_url.clone(),
                api_key: config.api_key.clone(),
                api_key_env: config.api_key_env.clone(),
                image_size: config.image_size,
                order: config.image_order,
            },
            keys: KeysConfig {
                quit: config.key_quit.clone(),
                load_more: config.key_load_more.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_tile_min_width")]
    tile_min_width: f32,
    #[serde(default = "defaults::default_tile_height")]
    tile_height: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            tile_min_width: defaults::default_tile_min_width(),
            tile_height: defaults::default_tile_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct GalleryConfig {
    #[serde(default = "defaults::default_initial_page_size")]
    initial_page_size: u32,
    #[serde(default = "defaults::default_load_more_size")]
    load_more_size: u32,
    #[serde(default = "defaults::default_load_more_offset_px")]
    load_more_offset_px: f32,
    #[serde(default)]
    load_policy: LoadPolicy,
    #[serde(default = "defaults::default_error_display_secs")]
    error_display_secs: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            initial_page_size: defaults::default_initial_page_size(),
            load_more_size: defaults::default_load_more_size(),
            load_more_offset_px: defaults::default_load_more_offset_px(),
            load_policy: LoadPolicy::default(),
            error_display_secs: defaults::default_error_display_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ApiConfig {
    #[serde(default = "defaults::default_api_base_url")]
    base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default = "defaults::default_api_key_env")]
    api_key_env: String,
    #[serde(default)]
    image_size: ImageSize,
    #[serde(default)]
    order: ImageOrder,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: defaults::default_api_base_url(),
            api_key: None,
            api_key_env: defaults::default_api_key_env(),
            image_size: ImageSize::default(),
            order: ImageOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_quit")]
    quit: String,
    #[serde(default = "defaults::default_key_load_more")]
    load_more: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            quit: defaults::default_key_quit(),
            load_more: defaults::default_key_load_more(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
