//! Command line driver for the `patent` library.
//!
//! Runs in one of two modes:
//! - `keyword`: search a patent site page by page and download one patent or all of them
//! - `direct`: download a single patent by number
//!
//! Every input can come from a flag or from the environment, so the program runs unattended:
//!
//! ```bash
//! # Download every result for a keyword
//! PATENT_KEYWORDS="无人机" patent
//!
//! # Skip two pages, then download the second result
//! patent --keywords drone --choice X,X,2
//!
//! # Choose interactively
//! patent --keywords drone --interactive
//!
//! # Download one patent
//! PATENT_DOWNLOAD_MODE=direct PATENT_NUMBER=CN1234567A patent
//! ```
//!
//! Progress is appended to a log file (`patent_download.log` unless configured otherwise).
//! The `-v` flag controls how much of it is echoed to the terminal.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{fs::OpenOptions, path::PathBuf, str::FromStr};

use clap::{builder::ArgAction, Parser};
use patent::{
  config::{Config, Mode},
  search::SearchOutcome,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
  filter::LevelFilter,
  fmt::{self, time::ChronoLocal},
  layer::SubscriberExt,
  util::SubscriberInitExt,
  EnvFilter, Layer,
};

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Search a patent site by keyword or download a patent by number")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for the terminal log output
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase terminal logging verbosity"
    )]
  verbose: u8,

  /// `keyword` to search, `direct` to download one patent; any other value exits non-zero
  #[arg(
    long,
    env = "PATENT_DOWNLOAD_MODE",
    default_value = "keyword",
    value_parser = Mode::from_str
  )]
  mode: Mode,

  /// Search keywords, required in keyword mode
  #[arg(long, env = "PATENT_KEYWORDS", default_value = "无人机")]
  keywords: String,

  /// Patent number, required in direct mode
  #[arg(long, env = "PATENT_NUMBER", default_value = "")]
  patent_number: String,

  /// Menu choices for keyword mode, comma separated (0, 1-N, X, S, R, M, Q). The last choice
  /// repeats for every following page.
  #[arg(long, env = "PATENT_KEYWORD_MENU_CHOICE", default_value = "0")]
  choice: String,

  /// Directory holding downloaded PDFs
  #[arg(long, env = "PATENT_ARCHIVE_DIR")]
  archive_dir: Option<PathBuf>,

  /// Site description file
  #[arg(long, env = "PATENT_SITE_CONFIG")]
  site: Option<PathBuf>,

  /// Configuration file. If not specified, uses the default platform-specific config directory.
  #[arg(long, env = "PATENT_CONFIG")]
  config: Option<PathBuf>,

  /// Log file
  #[arg(long, env = "PATENT_LOG_FILE")]
  log_file: Option<PathBuf>,

  /// Prompt for each menu choice instead of using `--choice`
  #[arg(long)]
  interactive: bool,
}

impl Cli {
  /// Loads the configuration file and applies flag and environment overrides.
  fn config(&self) -> Result<Config> {
    let mut config = Config::load(self.config.as_deref())?;
    if let Some(archive_dir) = &self.archive_dir {
      config = config.with_archive_dir(archive_dir);
    }
    if let Some(site) = &self.site {
      config = config.with_site(site);
    }
    if let Some(log_file) = &self.log_file {
      config = config.with_log_file(log_file);
    }
    Ok(config)
  }
}

/// Installs the log subscriber.
///
/// Everything at INFO and above is appended to `log_file` without colors. The terminal gets a
/// second copy filtered by verbosity:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` overrides the terminal filter. The returned guard flushes the file when dropped.
fn setup_logging(verbosity: u8, log_file: &std::path::Path) -> Result<WorkerGuard> {
  if let Some(dir) = log_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir)?;
  }
  let file = OpenOptions::new().create(true).append(true).open(log_file)?;
  let (writer, guard) = tracing_appender::non_blocking(file);

  let file_layer = fmt::layer()
    .with_writer(writer)
    .with_ansi(false)
    .with_target(false)
    .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
    .with_filter(LevelFilter::INFO);

  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
  let terminal_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .with_filter(filter);

  tracing_subscriber::registry()
    .with(file_layer)
    .with(terminal_layer)
    .try_init()
    .map_err(|e| PatentdError::Logging(e.to_string()))?;
  Ok(guard)
}

/// Entry point for the `patent` binary.
///
/// A missing keyword or patent number is logged and ends the run without error. A `Q` menu
/// choice exits immediately with status 0 once the log file is flushed.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = cli.config()?;
  let guard = setup_logging(cli.verbose, &config.log_file)?;

  tracing::info!("Starting script");
  tracing::info!(
    "Mode: {}, Keywords: {}, Patent Number: {}",
    cli.mode,
    cli.keywords,
    cli.patent_number
  );

  let result = match cli.mode {
    Mode::Keyword if cli.keywords.trim().is_empty() => {
      tracing::error!("No keywords given, set PATENT_KEYWORDS or --keywords. Exit the program");
      Ok(None)
    },
    Mode::Keyword => keyword(&cli, &config, cli.keywords.trim()).await.map(Some),
    Mode::Direct if cli.patent_number.trim().is_empty() => {
      tracing::error!(
        "No patent number given, set PATENT_NUMBER or --patent-number. Exit the program"
      );
      Ok(None)
    },
    Mode::Direct => direct(&config, &cli.patent_number).await.map(|_| None),
  };

  match result {
    Ok(Some(SearchOutcome::Quit)) => {
      tracing::info!("Exiting program");
      drop(guard);
      std::process::exit(0);
    },
    Ok(_) => {
      tracing::info!("Script finished");
      Ok(())
    },
    Err(e) => {
      tracing::error!("{e}");
      failure(&e.to_string());
      Err(e)
    },
  }
}
