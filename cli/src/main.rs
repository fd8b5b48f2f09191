//! CLI entrypoint for tourgen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tourgen_application::{NoProgress, PackageExporter, PipelineObserver, TourPipeline};
use tourgen_domain::{
    GENERATION_FAILED_MESSAGE, LOCATION_SUGGESTIONS, PipelineStatus, TripRequest,
};
use tourgen_infrastructure::config::FALLBACK_API_KEY_ENV;
use tourgen_infrastructure::{ConfigLoader, FileExporter, GeminiGateway, JsonlRunJournal};
use tourgen_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress, set_color_enabled,
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. With a log file the
/// returned guard must live until exit so buffered lines get flushed.
fn setup_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

/// First Ctrl-C stops the image fan-out, the second one exits immediately
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        eprintln!("\nInterrupted, finishing with the visuals generated so far (Ctrl-C again to quit)");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.list_destinations {
        print!("{}", ConsoleFormatter::format_destinations());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    if !config.output.color {
        set_color_enabled(false);
    }

    let _log_guard = setup_logging(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting tourgen");

    for issue in config.validate() {
        warn!("Configuration issue: {}", issue);
    }

    let request = TripRequest::new(
        cli.destination
            .clone()
            .unwrap_or_else(|| LOCATION_SUGGESTIONS[0].to_string()),
        cli.days,
        cli.travelers,
        cli.hotel,
    )?;

    let Some(api_key) = config.gemini.resolve_api_key() else {
        bail!(
            "No Gemini API key found. Set {} (or {}), or gemini.api_key in the config file.",
            config.gemini.api_key_env,
            FALLBACK_API_KEY_ENV
        );
    };

    // === Dependency Injection ===
    // One gateway serves both the text and the image port
    let gateway = Arc::new(GeminiGateway::new(
        api_key,
        &config.gemini.base_url,
        config.connect_timeout(),
    )?);

    let mut params = config.generation_params();
    if cli.no_images {
        params = params.with_images_enabled(false);
    }
    if let Some(seconds) = cli.image_timeout {
        params = params.with_image_timeout(Some(Duration::from_secs(seconds)));
    }

    let mut pipeline = TourPipeline::new(gateway.clone(), gateway, params);
    if let Some(path) = &config.logging.journal {
        match JsonlRunJournal::new(path) {
            Some(journal) => pipeline = pipeline.with_run_journal(Arc::new(journal)),
            None => warn!("Run journal disabled: cannot open {}", path.display()),
        }
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    // Progress goes to stderr so stdout only carries the result
    let observer: Box<dyn PipelineObserver> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    if !cli.quiet {
        eprintln!("Planning {}\n", request);
    }

    let snapshot = pipeline
        .submit_with_cancel(request, &cancel, observer.as_ref())
        .await;

    let package = match (snapshot.status, snapshot.package) {
        (PipelineStatus::Ready, Some(package)) => package,
        _ => {
            let message = snapshot
                .error_message
                .as_deref()
                .unwrap_or(GENERATION_FAILED_MESSAGE);
            eprintln!("{}", ConsoleFormatter::format_failure(message));
            return Ok(ExitCode::FAILURE);
        }
    };

    // Output results
    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter.render(format, &package));

    // Export failures never change the outcome of the run
    if let Some(directory) = cli.export.clone().or(config.export.directory.clone()) {
        let exporter = FileExporter::new(directory);
        match exporter.export(&package, &ConsoleFormatter::format_document(&package)) {
            Ok(report) => {
                info!(
                    document = %report.document.display(),
                    images = report.images.len(),
                    skipped = ?report.skipped_days,
                    "Package exported"
                );
                if !cli.quiet {
                    eprintln!("Saved {}", report.document.display());
                }
            }
            Err(e) => error!("Export failed: {}", e),
        }
    }

    Ok(ExitCode::SUCCESS)
}
