use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swatchbook::cli::{Args, Command};
use swatchbook::config::Config;
use swatchbook::feedback::FeedbackClient;
use swatchbook::gallery::source::{ColorsApiSource, MemorySource, PageSource};
use swatchbook::server::{self, ColorStore};
use swatchbook::tui::{self, GalleryApp};

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Command::Browse { .. } => init_file_logging(),
        _ => init_stderr_logging(),
    }

    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match args.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.port);
            runtime.block_on(server::serve(port, ColorStore::default()))
        }
        Command::Browse {
            api_url,
            limit,
            palette_size,
            demo,
        } => {
            let limit = limit.unwrap_or(config.page_limit);
            let palette_size = palette_size
                .map(|size| size as usize)
                .unwrap_or(config.palette_size);

            let source: Arc<dyn PageSource> = if demo {
                info!("browsing built-in colors");
                Arc::new(MemorySource::demo(palette_size, limit as usize))
            } else {
                let api_url = api_url.unwrap_or(config.api_url);
                info!("browsing {api_url}");
                Arc::new(ColorsApiSource::new(&api_url, limit, palette_size)?)
            };

            tui::run(GalleryApp::new(source, runtime.handle().clone()))
        }
        Command::Feedback => {
            let client = FeedbackClient::from_config(&config)?;
            let rows = runtime.block_on(client.fetch_all())?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// The TUI owns the terminal, so logs go to a file instead.
fn init_file_logging() {
    let path = std::env::temp_dir().join("swatchbook.log");
    let Ok(log_file) = std::fs::File::create(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}
