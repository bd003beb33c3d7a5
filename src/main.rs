//! Entry point for the cat gallery.
//!
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Build The Cat API client from the resolved key.
//! - Launch the GUI with the mounted gallery.

mod app;
mod config;
mod theme;

use crate::app::{App, run_app};
use crate::config::{AppConfig, load_config, serialize_config};
use anyhow::{Context, Result, anyhow};
use gallery_core::cat_api::CatApiClient;
use std::env;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

enum Command {
    Run { config_path: PathBuf },
    PrintDefaultConfig,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config_path = match parse_args()? {
        Command::PrintDefaultConfig => {
            let rendered = serialize_config(&AppConfig::default())
                .context("Failed to render the default config")?;
            println!("{rendered}");
            return Ok(());
        }
        Command::Run { config_path } => config_path,
    };

    let config = load_config(&config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %config_path.display(),
        level = %config.log_level,
        "Starting cat gallery"
    );
    info!(
        base_url = %config.api_base_url,
        size = %config.image_size,
        order = %config.image_order,
        policy = %config.load_policy,
        "Active gallery configuration"
    );

    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        warn!(env = %config.api_key_env, "No API key in config or environment");
    }
    let client = CatApiClient::new(config.api_base_url.clone(), api_key).with_context(|| {
        format!(
            "Set api.api_key in {} or export {}",
            config_path.display(),
            config.api_key_env
        )
    })?;
    let app = App::new(config, client).context("Failed to mount the gallery")?;
    run_app(app).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Result<Command> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(Command::Run {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }),
        Some("--print-default-config") => Ok(Command::PrintDefaultConfig),
        Some("--config") => {
            let path = args
                .next()
                .ok_or_else(|| anyhow!("Usage: cat-gallery [--config <path>]"))?;
            Ok(Command::Run {
                config_path: PathBuf::from(path),
            })
        }
        Some(other) => Err(anyhow!(
            "Unknown argument `{other}`. Usage: cat-gallery [--config <path> | --print-default-config]"
        )),
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
