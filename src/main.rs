use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

use trendboard::api::{ApiClient, TrendingEndpoint};
use trendboard::app::{App, AppEvent};
use trendboard::config::Config;
use trendboard::keybindings::KeybindingRegistry;
use trendboard::preferences;
use trendboard::storage::{Database, DatabaseError};
use trendboard::ui;

/// Get the config directory path (~/.config/trendboard/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("trendboard");
    Ok(config_dir)
}

/// Create the config directory if needed and restrict it to the current user.
fn prepare_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(config_dir)
            .context("Failed to read config directory metadata")?
            .permissions();
        perms.set_mode(0o700);
        if let Err(e) = std::fs::set_permissions(config_dir, perms) {
            eprintln!(
                "Warning: could not restrict {} to 0700: {}",
                config_dir.display(),
                e
            );
        }
    }

    Ok(())
}

/// Send logs to a file; the terminal belongs to the TUI.
///
/// Level comes from `RUST_LOG`, defaulting to `info`.
fn init_tracing(log_path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "trendboard",
    about = "Terminal dashboard for trending Wikipedia articles, their tone and the Reddit threads about them"
)]
struct Args {
    /// Backend base URL (overrides `api_base_url` in config)
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Day to list trending articles for, YYYY-MM-DD (default: today, UTC)
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Config file (default: ~/.config/trendboard/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use the undated /api/top-articles endpoint
    #[arg(long)]
    top_articles: bool,

    /// Forget stored preferences (theme) before starting
    #[arg(long)]
    reset_preferences: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    prepare_config_dir(&config_dir)?;
    init_tracing(&config_dir.join("trendboard.log"))?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;

    let mut keybindings = KeybindingRegistry::new();
    for warning in keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!(warning = %warning, "Ignoring keybinding override");
        eprintln!("Warning: {}", warning);
    }

    let base_url = args.api_base.as_deref().unwrap_or(&config.api_base_url);
    let endpoint = if args.top_articles {
        TrendingEndpoint::Top
    } else {
        config.trending_endpoint
    };
    let api = ApiClient::new(base_url, endpoint, config.request_timeout())
        .with_context(|| format!("Invalid backend URL '{}'", base_url))?;

    let db_path = config_dir.join("prefs.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of trendboard appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open preference store: {}", e));
        }
    };

    if args.reset_preferences {
        preferences::reset(&db)
            .await
            .context("Failed to reset preferences")?;
        println!("Preferences reset.");
    }

    let theme = preferences::load_theme(&db).await;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());

    tracing::info!(
        base_url = %api.base_url(),
        endpoint = ?endpoint,
        %date,
        theme = theme.name(),
        "Starting trendboard"
    );

    let mut app = App::new(api, db, date, theme, keybindings);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;
    app.finish_theme_save().await;

    tracing::info!("Exiting");
    Ok(())
}
