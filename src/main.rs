//! nvim-watcher entrypoint: live chart of editor-related processes (default), or plugin
//! maintenance (`scan`, `update`).

use clap::{Parser, Subcommand};
use nvim_watcher::{
    collectors::SysinfoSource,
    config::WatcherConfig,
    display::DisplayState,
    error::{MaintenanceError, WatchError},
    logging::StructuredLogger,
    maintenance::{BatchRunner, OutdatedDetector, RunSummary, ScanReport, SystemCommand},
    processes::ViewSelector,
    render::{keys, TerminalChart, TerminalSession},
    supervisor::Supervisor,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(
    name = "nvim-watcher",
    version,
    about = "Live chart of the top neovim-related processes, plus batched plugin updates"
)]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "NVIM_WATCHER_CONFIG", default_value = "nvim-watcher.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Live view of editor children and AI/LSP helpers (default)
    Watch,
    /// Report outdated plugins and recover detached checkouts
    Scan,
    /// Scan, then fetch outdated plugins in batches
    Update {
        /// Fetch every plugin rather than only the outdated ones
        #[arg(short = 'a', long)]
        fetch_all: bool,
        /// Concurrent fetches per window (overrides the config file)
        #[arg(short = 'b', long)]
        batch_size: Option<usize>,
    },
}

impl Command {
    /// Fold command-line overrides into the loaded configuration.
    fn apply(self, config: &mut WatcherConfig) {
        if let Command::Update {
            batch_size: Some(n),
            ..
        } = self
        {
            config.maintenance.batch_size = n;
        }
    }
}

async fn watch(config: &WatcherConfig) -> Result<(), WatchError> {
    let session = TerminalSession::enter()?;
    let state = Arc::new(DisplayState::new());
    let (quit_tx, quit_rx) = mpsc::unbounded_channel();

    let sigint_tx = quit_tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = sigint_tx.send(());
    }) {
        warn!(error = %e, "SIGINT handler not installed");
    }
    keys::spawn_listener(Arc::clone(&state), quit_tx);

    let supervisor = Supervisor::new(
        config.supervisor.clone(),
        ViewSelector::from_config(config),
        state,
        Arc::new(SysinfoSource::new()),
        Arc::new(SysinfoSource::new()),
        Arc::new(TerminalChart),
        TerminalSession::size,
    );
    let result = supervisor.run(quit_rx).await;
    drop(session);
    result
}

async fn scan(config: &WatcherConfig) -> Result<ScanReport, MaintenanceError> {
    let detector = OutdatedDetector::new(
        Arc::new(SystemCommand),
        Arc::new(SysinfoSource::new()),
        &config.maintenance,
    );
    let root = config.maintenance.root_path.clone();
    let report = tokio::task::spawn_blocking(move || detector.scan(&root)).await??;

    println!(
        "Found {} directories in {}",
        report.scanned,
        config.maintenance.root_path.display()
    );
    println!(
        "Found {} outdated plugins ({} recovered from a detached HEAD)",
        report.outdated.len(),
        report.recovered.len()
    );
    Ok(report)
}

async fn update(config: &WatcherConfig, fetch_all: bool) -> Result<(), MaintenanceError> {
    let report = scan(config).await?;
    let work = if fetch_all {
        OutdatedDetector::list_dirs(&config.maintenance.root_path)?
    } else {
        report.outdated
    };
    if work.is_empty() {
        println!("Nothing to fetch");
        return Ok(());
    }

    let runner = BatchRunner::new(Arc::new(SystemCommand), &config.maintenance);
    let outcomes = runner.run(&work).await;
    let summary = RunSummary::from_outcomes(&outcomes);
    println!(
        "Fetched {} plugins: {} succeeded, {} failed",
        outcomes.len(),
        summary.succeeded,
        summary.failed
    );
    for failed in outcomes.iter().filter(|o| !o.success) {
        println!("  failed: {}", failed.job.name);
    }
    Ok(())
}

async fn run(cli: Cli, mut config: WatcherConfig) -> Result<(), BoxError> {
    let command = cli.command.unwrap_or(Command::Watch);
    command.apply(&mut config);
    match command {
        Command::Watch => watch(&config).await?,
        Command::Scan => {
            scan(&config).await?;
        }
        Command::Update { fetch_all, .. } => update(&config, fetch_all).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = WatcherConfig::load(&cli.config);

    if let Err(e) = StructuredLogger::init(&config.log) {
        eprintln!("nvim-watcher: cannot initialise logging: {e}");
        std::process::exit(1);
    }
    info!(config = %cli.config.display(), "nvim-watcher starting");

    if let Err(e) = run(cli, config).await {
        error!(error = %e, "nvim-watcher stopped");
        eprintln!("nvim-watcher: {e}");
        std::process::exit(1);
    }
    info!("nvim-watcher stopping");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nvim-watcher").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn update_batch_size_overrides_config() {
        let mut config = WatcherConfig::default();
        parse(&["update", "--batch-size", "5"]).command.unwrap().apply(&mut config);
        assert_eq!(config.maintenance.batch_size, 5);

        let mut config = WatcherConfig::default();
        parse(&["update", "-a", "-b", "8"]).command.unwrap().apply(&mut config);
        assert_eq!(config.maintenance.batch_size, 8);
    }

    #[test]
    fn config_batch_size_kept_without_override() {
        let mut config = WatcherConfig::default();
        parse(&["update"]).command.unwrap().apply(&mut config);
        assert_eq!(config.maintenance.batch_size, 3);

        assert!(parse(&[]).command.is_none());
    }
}
