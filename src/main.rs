mod auth;
mod config;
mod console;
mod controller;
mod error;
mod logging;
mod mail;
mod model;
mod report;
mod view;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use config::AppConfig;
use console::StdConsole;
use controller::{Session, SessionOptions};
use mail::SendGridMailer;
use model::SpotifyCatalog;
use report::FileReportSink;

/// Discover new music from the genres, artists and tracks you like
#[derive(Debug, Parser)]
#[command(name = "music-finder", version, about)]
struct Cli {
    /// Config file (defaults to ./music-finder.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory HTML reports are written to
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Number of search results listed for selection
    #[arg(long, value_name = "N")]
    display_limit: Option<usize>,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.report_dir {
            config.report.dir = dir.clone();
        }
        if let Some(limit) = self.display_limit {
            config.session.display_limit = limit;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(Path::new(logging::LOG_DIR)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Music Finder Starting ===");

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded");

    let spotify = auth::connect(&config.spotify).await?;
    let catalog = SpotifyCatalog::new(spotify, config.spotify.recommendation_limit);
    let mailer = SendGridMailer::new(&config.mail)?;
    let reports = FileReportSink::new(config.report.dir.clone());

    let mut session = Session::new(
        catalog,
        mailer,
        StdConsole::new(),
        Box::new(reports),
        SessionOptions::from_config(&config),
    );

    let result = session.run().await;
    if let Err(err) = &result {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Music Finder shutting down");
    result
}
