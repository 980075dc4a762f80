//! haproxytop - live terminal dashboard for HAProxy statistics.
//!
//! Usage:
//!   haproxytop lb01:8404                   # poll one stats endpoint every second
//!   haproxytop lb01:8404 lb02:8404 -i 5    # two endpoints, 5 second interval
//!   haproxytop https://lb01/stats --filter proxy:lb01

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use haproxytop::collector::{HttpStatsSource, StatsSource};
use haproxytop::provider::{Aggregator, Filter};
use haproxytop::tui::{App, AppState, install_panic_hook};
use haproxytop::view::View;

/// Live terminal dashboard for HAProxy statistics.
#[derive(Parser)]
#[command(name = "haproxytop", version, about = "Top-like viewer for HAProxy stats")]
struct Args {
    /// Stats endpoints, as host[:port] or URL.
    #[arg(value_name = "ENDPOINT", required = true, num_args = 1..)]
    endpoints: Vec<String>,

    /// Refresh interval in seconds.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Per-server poll timeout in seconds.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Initial filter, e.g. name:web or proxy:lb01.
    #[arg(long, value_name = "FILTER")]
    filter: Option<String>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Installs a file-backed tracing subscriber. The terminal belongs to the
/// UI, so without a log file nothing is installed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("haproxytop={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let filter = match args.filter.as_deref().map(Filter::parse).transpose() {
        Ok(filter) => filter.flatten(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let timeout = Duration::from_secs(args.timeout);
    let mut sources: Vec<Box<dyn StatsSource>> = Vec::with_capacity(args.endpoints.len());
    for endpoint in &args.endpoints {
        match HttpStatsSource::new(endpoint, timeout) {
            Ok(source) => {
                info!(endpoint = %endpoint, url = source.url(), "stats endpoint configured");
                sources.push(Box::new(source));
            }
            Err(e) => {
                eprintln!("Error: {}: {}", endpoint, e);
                std::process::exit(1);
            }
        }
    }

    let state = AppState::new(View::realtime()).with_filter(filter);
    let app = App::new(Aggregator::new(sources), state);

    // Graceful shutdown on SIGINT/SIGTERM
    let shutdown = app.shutdown_flag();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        shutdown.store(true, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }
    install_panic_hook();

    if let Err(e) = app.run(Duration::from_secs(args.interval)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
