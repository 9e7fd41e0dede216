//! ErrSend CLI — entry point.
//!
//! # Commands
//!
//! - `errsend send -a APP -m MESSAGE [...]` — dispatch one error event
//! - `errsend send --json` — read an ErrorEvent JSON object from stdin
//! - `errsend onboard` — write a default config file
//! - `errsend status` — show configuration state

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use errsend_channels::TelegramClient;
use errsend_core::config::{get_config_path, load_config, save_config, Config};
use errsend_core::ErrorEvent;
use errsend_notify::{Dispatcher, NotificationGate};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ErrSend — deliver application error reports to Telegram
#[derive(Parser)]
#[command(name = "errsend", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one error event
    Send {
        /// Name of the reporting application
        #[arg(short, long, required_unless_present = "json")]
        application: Option<String>,

        /// Error message
        #[arg(short, long, required_unless_present = "json")]
        message: Option<String>,

        /// Application version
        #[arg(long)]
        app_version: Option<String>,

        /// Deployment tier (Development, Staging, Production, ...)
        #[arg(short, long)]
        environment: Option<String>,

        /// Stack trace text
        #[arg(short, long)]
        stack_trace: Option<String>,

        /// Free-form extra context
        #[arg(long)]
        additional_info: Option<String>,

        /// Read the event as a JSON object from stdin instead of flags
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write a default config file if none exists
    Onboard,

    /// Show configuration state
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            application,
            message,
            app_version,
            environment,
            stack_trace,
            additional_info,
            json,
            logs,
        } => {
            init_logging(logs);
            let event = if json {
                read_event_from_stdin()?
            } else {
                // clap guarantees both required fields when --json is absent
                let mut event = ErrorEvent::new(
                    application.unwrap_or_default(),
                    message.unwrap_or_default(),
                );
                event.version = app_version.unwrap_or_default();
                event.environment = environment.unwrap_or_default();
                event.stack_trace = stack_trace.unwrap_or_default();
                event.additional_info = additional_info.unwrap_or_default();
                Some(event)
            };
            run_send(event).await
        }
        Commands::Onboard => {
            init_logging(false);
            run_onboard()
        }
        Commands::Status => {
            init_logging(false);
            run_status();
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────
// Send command
// ─────────────────────────────────────────────

/// Read one ErrorEvent from stdin. A JSON `null` is accepted and dispatched
/// as a missing event so the rejection path is reachable from outside.
fn read_event_from_stdin() -> Result<Option<ErrorEvent>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    serde_json::from_str(input.trim()).context("failed to parse error event JSON")
}

async fn run_send(event: Option<ErrorEvent>) -> Result<()> {
    let config = load_config(None);

    let gate = NotificationGate::from_config(&config.telegram);
    let client = Arc::new(TelegramClient::new(
        config.telegram.api_base.clone(),
        config.telegram.bot_token.clone(),
    ));
    let dispatcher = Dispatcher::new(gate, client);

    let result = dispatcher.dispatch(event.as_ref()).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Onboard / status commands
// ─────────────────────────────────────────────

fn run_onboard() -> Result<()> {
    let path = get_config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    save_config(&Config::default(), None)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    println!("Set telegram.enabled, telegram.botToken and telegram.chatId to start sending.");
    Ok(())
}

fn run_status() {
    let path = get_config_path();
    let config = load_config(None);
    let tg = &config.telegram;

    println!("Config file: {}", path.display());
    println!("Enabled:     {}", tg.enabled);
    println!(
        "Bot token:   {}",
        if tg.bot_token.is_empty() { "(not set)" } else { "(set)" }
    );
    println!(
        "Chat id:     {}",
        if tg.chat_id.is_empty() { "(not set)" } else { tg.chat_id.as_str() }
    );
    println!("API base:    {}", tg.api_base);

    let ready = tg.enabled && tg.is_configured();
    println!("Delivery:    {}", if ready { "ready" } else { "disabled" });
}

// ─────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("errsend=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
