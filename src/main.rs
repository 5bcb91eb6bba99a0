//! postdeck - Terminal Blog Listing Browser

use anyhow::{Context, Result};
use clap::{Arg, Command};
use log::{info, warn};
use postdeck::preferences::{FilePreferenceStore, MemoryPreferenceStore};
use postdeck::render::ui::TerminalUI;
use postdeck::store::JsonFilePostSource;
use postdeck::{Application, Config, ControllerSettings, PreferenceStore, ThemeMode};
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("postdeck")
        .version(postdeck::VERSION)
        .about("Browse a blog post collection in the terminal")
        .long_about(
            "postdeck loads a JSON collection of blog posts and shows them as cards, \
             with free-text search, category filtering, pagination and a light/dark theme.",
        )
        .arg(
            Arg::new("data")
                .help("Path to the posts JSON file")
                .value_name("DATA")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file to use instead of the default location"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Cards shown per page"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .value_parser(["light", "dark"])
                .help("Theme for this session; the saved preference is left untouched"),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    if let Some(data) = matches.get_one::<String>("data") {
        config.data_path = PathBuf::from(data);
    }
    if let Some(&page_size) = matches.get_one::<usize>("page-size") {
        if page_size == 0 {
            anyhow::bail!("--page-size must be greater than zero");
        }
        config.page_size = page_size;
    }
    config.validate()?;

    let mut settings = ControllerSettings::from_config(&config)?;
    if let Some(theme) = matches.get_one::<String>("theme") {
        settings.theme_override = Some(theme.parse::<ThemeMode>()?);
    }

    let preferences: Box<dyn PreferenceStore> = match config.preferences_path() {
        Some(path) => {
            info!("theme preference stored in {}", path.display());
            Box::new(FilePreferenceStore::new(path))
        }
        None => {
            warn!("no data directory available; theme preference will not persist");
            Box::new(MemoryPreferenceStore::new())
        }
    };

    let source = Arc::new(JsonFilePostSource::new(config.data_path.clone()));
    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(source, settings, preferences, ui_renderer);

    app.run().await?;

    Ok(())
}
