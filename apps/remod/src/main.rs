//! remod - reinstall node_modules without waiting for the delete
//!
//! The CLI wires configuration, the savings store, and the event stream
//! together, then hands the run to the ops crate.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use remod_config::Config;
use remod_events::EventReceiver;
use remod_ops::{OperationResult, OpsContextBuilder, OpsCtx, ReinstallRequest};
use remod_store::MetricStore;
use remod_types::{ColorChoice, InstallMode};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();

    // Initialize tracing with JSON awareness
    init_tracing(cli.json, cli.debug);

    // Run the application and handle errors
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        // The failure reason always reaches stderr, even with --quiet or
        // --json, so a nonzero exit never goes unexplained
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting remod v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(&cli.config).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    // Open the savings store
    let store = match config.store_path() {
        Some(path) => MetricStore::new(path),
        None => MetricStore::open_default()?,
    };

    // Create event channel
    let (event_sender, event_receiver) = remod_events::channel();

    // Build operations context
    let ops_ctx = OpsContextBuilder::new()
        .with_store(store)
        .with_event_sender(event_sender)
        .with_config(config.clone())
        .build()?;

    // Create output renderer
    let renderer = OutputRenderer::new(cli.json, config.general.color);

    // Create event handler
    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    // JSON output owns stdout, so status lines fall under quiet
    let effective_quiet = config.general.quiet || cli.json;
    let event_handler = EventHandler::new(colors_enabled, effective_quiet, cli.debug);

    let request = build_request(&cli, std::env::current_dir()?);

    // Execute command with event handling
    let result = execute_command_with_events(
        cli.clear_cache,
        request,
        ops_ctx,
        event_receiver,
        &event_handler,
    )
    .await?;

    // Render final result
    renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    clear_cache: bool,
    request: ReinstallRequest,
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(clear_cache, request, ops_ctx));

    // Handle events concurrently with command execution
    loop {
        select! {
            // Command completed
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(&event);
                }
                return result;
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(&event),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

/// Execute the requested operation
async fn execute_command(
    clear_cache: bool,
    request: ReinstallRequest,
    ctx: OpsCtx,
) -> Result<OperationResult, CliError> {
    if clear_cache {
        let result = remod_ops::clear_savings(&ctx).await?;
        return Ok(result);
    }

    let report = remod_ops::reinstall(&ctx, &request).await?;
    Ok(OperationResult::Reinstall(report))
}

/// Build the reinstall request from CLI flags
fn build_request(cli: &Cli, project_dir: std::path::PathBuf) -> ReinstallRequest {
    let mode = if cli.use_lock_file {
        InstallMode::Clean
    } else {
        InstallMode::Incremental
    };

    ReinstallRequest::new(project_dir)
        .with_mode(mode)
        .with_pull(cli.pull)
        .with_remove_lock_file(cli.remove_lock_file)
        .with_skip_install(cli.skip_install)
        .with_installer_args(cli.installer_args.clone())
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(color) = cli.color {
        config.general.color = color;
    }
    if cli.quiet {
        config.general.quiet = true;
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;
    let log_dir = std::env::temp_dir().join("remod-logs");

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        if debug_enabled {
            // In debug mode with JSON, still log to file
            if std::fs::create_dir_all(&log_dir).is_ok() {
                let log_file = log_dir.join(format!(
                    "remod-{}.log",
                    chrono::Utc::now().format("%Y%m%d-%H%M%S")
                ));

                if let Ok(file) = std::fs::File::create(&log_file) {
                    tracing_subscriber::fmt()
                        .json()
                        .with_writer(file)
                        .with_env_filter(
                            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                                |_| {
                                    tracing_subscriber::EnvFilter::new(
                                        "info,remod=debug,remod_ops=info",
                                    )
                                },
                            ),
                        )
                        .init();
                    return;
                }
            }
        }
        // Fallback: disable all logging in JSON mode
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "remod-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| {
                                tracing_subscriber::EnvFilter::new("info,remod=debug,remod_ops=info")
                            },
                        ),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| {
                                tracing_subscriber::EnvFilter::new("info,remod=info,remod_ops=info")
                            },
                        ),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,remod=warn,remod_ops=warn")
                }),
            )
            .init();
    }
}
