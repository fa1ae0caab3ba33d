use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use flicks::app::{App, AppEvent, View};
use flicks::catalog::{CatalogClient, MediaType};
use flicks::config::Config;
use flicks::ui;

/// Get the config directory path (~/.config/flicks/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("flicks"))
}

#[derive(Parser, Debug)]
#[command(name = "flicks", about = "Terminal movie and TV browser powered by TMDB")]
struct Args {
    /// Start directly in a browse grid (movie or tv)
    #[arg(long, value_name = "TYPE")]
    media: Option<String>,

    /// Override the watch-provider region (ISO 3166-1, e.g. US, DE)
    #[arg(long, value_name = "REGION")]
    region: Option<String>,

    /// Use an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access: the config file may hold the API key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config_path = args
        .config
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(region) = args.region {
        config.region = region;
    }

    let Some(api_key) = config.resolve_api_key() else {
        eprintln!("Error: No TMDB API key configured.");
        eprintln!();
        eprintln!("Either set the TMDB_API_KEY environment variable, or add");
        eprintln!("  tmdb_api_key = \"...\"");
        eprintln!("to {}", config_path.display());
        eprintln!();
        eprintln!("Keys are free: https://www.themoviedb.org/settings/api");
        std::process::exit(1);
    };

    let client = CatalogClient::new(api_key, &config.language);
    let mut app = App::new(client, &config);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Kick off the home rows immediately; browse grids load lazily on
    // first visit.
    app.home.loading = true;
    ui::tasks::spawn_home(app.client.clone(), event_tx.clone());

    if let Some(media) = args.media {
        let media = match media.as_str() {
            "movie" | "movies" => MediaType::Movie,
            "tv" | "series" => MediaType::Series,
            other => {
                eprintln!("Error: unknown media type '{other}' (expected movie or tv)");
                std::process::exit(1);
            }
        };
        app.view = View::Browse(media);
        if app.resolver.begin_load(media) {
            ui::tasks::spawn_genres(app.client.clone(), media, event_tx.clone());
        }
        let request = app.controller_mut(media).start();
        ui::tasks::spawn_page(app.client.clone(), request, event_tx.clone());
    }

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
