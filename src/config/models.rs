use gallery_core::cat_api::{ImageOrder, ImageSize};
use gallery_core::load_more::LoadPolicy;
use serde::Deserialize;
use std::env;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_tile_min_width")]
    pub tile_min_width: f32,
    #[serde(default = "crate::config::defaults::default_tile_height")]
    pub tile_height: f32,
    #[serde(default = "crate::config::defaults::default_initial_page_size")]
    pub initial_page_size: u32,
    #[serde(default = "crate::config::defaults::default_load_more_size")]
    pub load_more_size: u32,
    #[serde(default = "crate::config::defaults::default_load_more_offset_px")]
    pub load_more_offset_px: f32,
    #[serde(default)]
    pub load_policy: LoadPolicy,
    #[serde(default = "crate::config::defaults::default_error_display_secs")]
    pub error_display_secs: f32,
    #[serde(default = "crate::config::defaults::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "crate::config::defaults::default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub image_size: ImageSize,
    #[serde(default)]
    pub image_order: ImageOrder,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_quit")]
    pub key_quit: String,
    #[serde(default = "crate::config::defaults::default_key_load_more")]
    pub key_load_more: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            tile_min_width: crate::config::defaults::default_tile_min_width(),
            tile_height: crate::config::defaults::default_tile_height(),
            initial_page_size: crate::config::defaults::default_initial_page_size(),
            load_more_size: crate::config::defaults::default_load_more_size(),
            load_more_offset_px: crate::config::defaults::default_load_more_offset_px(),
            load_policy: LoadPolicy::default(),
            error_display_secs: crate::config::defaults::default_error_display_secs(),
            api_base_url: crate::config::defaults::default_api_base_url(),
            api_key: None,
            api_key_env: crate::config::defaults::default_api_key_env(),
            image_size: ImageSize::default(),
            image_order: ImageOrder::default(),
            log_level: crate::config::defaults::default_log_level(),
            key_quit: crate::config::defaults::default_key_quit(),
            key_load_more: crate::config::defaults::default_key_load_more(),
        }
    }
}

impl AppConfig {
    /// API key from the config file, else from the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .or_else(|| {
                env::var(&self.api_key_env)
                    .ok()
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty())
            })
    }

    /// Clamps values to ranges the gallery can lay out and fetch.
    pub fn normalized(mut self) -> Self {
        fn normalize_key_binding(value: &mut String, fallback: &str) {
            let normalized = value.trim().to_ascii_lowercase();
            if normalized.is_empty() {
                *value = fallback.to_string();
            } else {
                *value = normalized;
            }
        }

        fn finite_or(value: f32, fallback: f32) -> f32 {
            if value.is_finite() { value } else { fallback }
        }

        self.window_width = finite_or(self.window_width, 1024.0).clamp(320.0, 7680.0);
        self.window_height = finite_or(self.window_height, 768.0).clamp(240.0, 4320.0);
        self.tile_min_width = finite_or(self.tile_min_width, 300.0).clamp(50.0, 2000.0);
        self.tile_height = finite_or(self.tile_height, 300.0).clamp(50.0, 2000.0);
        self.initial_page_size = self.initial_page_size.clamp(1, 100);
        self.load_more_size = self.load_more_size.clamp(1, 100);
        if self.image_order.is_paged() {
            // Pages are `load_more_size` items wide, so the first load must cover whole pages.
            let pages = self.initial_page_size.div_ceil(self.load_more_size);
            let mut aligned = pages * self.load_more_size;
            if aligned > 100 {
                aligned -= self.load_more_size;
            }
            self.initial_page_size = aligned;
        }
        self.load_more_offset_px = finite_or(self.load_more_offset_px, 300.0);
        self.error_display_secs = finite_or(self.error_display_secs, 5.0).clamp(0.5, 600.0);
        normalize_key_binding(&mut self.key_quit, "q");
        normalize_key_binding(&mut self.key_load_more, "r");
        self
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_key_wins_over_environment() {
        let config = AppConfig {
            api_key: Some("  live_inline  ".to_string()),
            api_key_env: "CAT_GALLERY_TEST_UNSET_KEY_VAR".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("live_inline"));
    }

    #[test]
    fn blank_key_without_environment_resolves_to_none() {
        let config = AppConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "CAT_GALLERY_TEST_UNSET_KEY_VAR".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }

    #[test]
    fn normalized_clamps_out_of_range_values() {
        let config = AppConfig {
            tile_min_width: 1.0,
            tile_height: f32::NAN,
            initial_page_size: 0,
            load_more_size: 500,
            load_more_offset_px: f32::INFINITY,
            error_display_secs: 0.0,
            key_quit: "  ".to_string(),
            key_load_more: "Ctrl+R".to_string(),
            ..AppConfig::default()
        }
        .normalized();

        assert_eq!(config.tile_min_width, 50.0);
        assert_eq!(config.tile_height, 300.0);
        assert_eq!(config.initial_page_size, 1);
        assert_eq!(config.load_more_size, 100);
        assert_eq!(config.load_more_offset_px, 300.0);
        assert_eq!(config.error_display_secs, 0.5);
        assert_eq!(config.key_quit, "q");
        assert_eq!(config.key_load_more, "ctrl+r");
    }

    #[test]
    fn paged_orders_round_the_first_load_to_whole_pages() {
        let paged = |initial_page_size, load_more_size| {
            AppConfig {
                image_order: ImageOrder::Asc,
                initial_page_size,
                load_more_size,
                ..AppConfig::default()
            }
            .normalized()
            .initial_page_size
        };
        assert_eq!(paged(24, 10), 30);
        assert_eq!(paged(10, 24), 24);
        assert_eq!(paged(24, 12), 24);
        assert_eq!(paged(95, 30), 90, "stays within the clamp");

        let random = AppConfig {
            initial_page_size: 24,
            load_more_size: 10,
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(random.initial_page_size, 24);
    }
}
