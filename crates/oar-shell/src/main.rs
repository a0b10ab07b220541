//! `oar-shell`: terminal shell for the Open Apparel Registry.
//!
//! Resolves paths against the registry's route table, loads session data
//! (feature flags, client info, login) at startup, and edits the details
//! of approved facility claims at `/claimed/<id>`.
//!
//! Logs go to a file (default `/tmp/oar-shell.log`) so they never corrupt
//! the terminal.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod history;
mod theme;
mod tui;
mod views;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oar_core::{ClientConfig, Controller, TlsVerification};

use crate::app::App;

/// Terminal shell for the Open Apparel Registry.
#[derive(Parser, Debug)]
#[command(name = "oar-shell", version, about)]
struct Cli {
    /// Registry web root (e.g., https://openapparel.org); overrides the profile
    #[arg(short = 'u', long, env = "OAR_URL")]
    url: Option<String>,

    /// Config profile to use (defaults to `default_profile` in config.toml)
    #[arg(short = 'p', long, env = "OAR_PROFILE")]
    profile: Option<String>,

    /// Path to open on start (e.g., /claimed/42)
    #[arg(long)]
    path: Option<String>,

    /// Accept invalid TLS certificates (local development servers)
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Log file path
    #[arg(long, default_value = "/tmp/oar-shell.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Hold the guard for the lifetime of the app so logs
/// are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("oar_shell={level},oar_core={level},oar_api={level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("oar-shell.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Priority: CLI flags > config profile > built-in defaults.
fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = oar_config::load_config().wrap_err("failed to load config")?;

    let mut config = match cfg.profile(cli.profile.as_deref())? {
        Some((name, profile)) => {
            info!(profile = name, "using config profile");
            oar_config::profile_to_client_config(profile, &cfg.defaults)?
        }
        None => oar_config::defaults_to_client_config(&cfg.defaults),
    };

    if let Some(url) = &cli.url {
        config.url = url
            .parse()
            .wrap_err_with(|| format!("invalid registry URL: {url}"))?;
    }
    if cli.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(path) = &cli.path {
        config.initial_path.clone_from(path);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = build_client_config(&cli)?;
    info!(url = %config.url, path = %config.initial_path, "starting oar-shell");

    let controller = Controller::new(config)?;
    // Startup effects run in the background; rendering never waits on them.
    drop(controller.bootstrap());

    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
