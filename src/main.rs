mod engine;
mod logging;
mod model;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::engine::engine::Engine;
use crate::engine::llm_client::LmStudioClient;
use crate::ui::app::ConsoleApp;
use crate::ui::output::Printer;
use crate::ui::settings::{Backend, API_KEY_VAR};
use crate::ui::settings_io;

/// Break a request into calculate / translate / answer steps with an LLM and run them.
#[derive(Parser, Debug)]
#[command(name = "stepwise-agent", version, about)]
struct Cli {
    /// LLM backend to use
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Model name passed to the backend
    #[arg(long)]
    model: Option<String>,

    /// File that receives a copy of the log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Process a single request and exit
    #[arg(long, value_name = "TEXT")]
    once: Option<String>,

    /// Write the effective settings to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = settings_io::load_settings().with_context(|| {
        format!(
            "failed to load settings from {}",
            settings_io::settings_path().display()
        )
    })?;
    settings.apply_env(|key| std::env::var(key).ok())?;

    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(model) = cli.model {
        settings.model = model;
    }
    if let Some(path) = &cli.log_file {
        settings.log_file = path.display().to_string();
    }
    if cli.no_color {
        settings.color = false;
    }

    logging::init(Path::new(&settings.log_file))
        .with_context(|| format!("failed to open log file {}", settings.log_file))?;

    if cli.save_settings {
        settings_io::save_settings(&settings)?;
        info!(path = %settings_io::settings_path().display(), "settings saved");
    }

    if settings.backend == Backend::LmStudio {
        let probe = LmStudioClient::new(
            &settings.lm_studio_url,
            &settings.model,
            settings.temperature,
            settings.timeout_secs,
        )?;
        match probe.test_connection() {
            Ok(status) => info!(url = %settings.lm_studio_url, "{}", status),
            Err(e) => warn!(url = %settings.lm_studio_url, error = %e, "LM Studio is not reachable"),
        }
    }

    let oracle = settings
        .build_oracle(std::env::var(API_KEY_VAR).ok())
        .context("Configuration Error")?;
    info!(backend = oracle.name(), model = %settings.model, "agent ready");

    let mut app = ConsoleApp::new(Engine::new(oracle), Printer::new(settings.color));
    match cli.once {
        Some(text) => app.run_once(&text),
        None => app.run_interactive(),
    }

    Ok(())
}
