use clap::Parser;
use colored::Colorize;
use searchtool::{config::default_log_level, search, SearchConfig, SearchError};
use std::{
    ffi::OsString,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

type Result<T> = std::result::Result<T, SearchError>;

const USAGE: &str = "usage: searchtool [-i] [-h] [-v] TERM FILE";

#[derive(Parser)]
#[command(
    name = "searchtool",
    author,
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Ignore ASCII case when matching
    #[arg(short = 'i')]
    case_insensitive: bool,

    /// Print usage and exit
    #[arg(short = 'h')]
    help: bool,

    /// Print version and exit
    #[arg(short = 'v')]
    version: bool,

    /// Configuration file layered over the default locations
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Literal bytes to search for
    term: Option<OsString>,

    /// File to search
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            eprintln!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.help {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::FAILURE);
    }

    if cli.version {
        eprintln!("version: {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::FAILURE);
    }

    let term = cli.term.ok_or(SearchError::EmptyTerm)?;
    let file = cli.file.ok_or(SearchError::MissingFile)?;
    let log_level = cli.log_level.unwrap_or_else(default_log_level);

    // Installed before loading configuration so skipped config files are reported.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&log_level)?)
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter_reloading();
    let filter_handle = subscriber.reload_handle();
    let _ = subscriber.try_init();

    let cli_config = SearchConfig {
        log_level,
        ..SearchConfig::new(term.into_encoded_bytes(), file).case_insensitive(cli.case_insensitive)
    };

    let config = SearchConfig::load_from(cli.config.as_deref())
        .map_err(|e| SearchError::config_error(e.to_string()))?
        .merge_with_cli(cli_config);

    if config.log_level != default_log_level() {
        let _ = filter_handle.reload(env_filter(&config.log_level)?);
    }
    debug!("Effective configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    search(&config, &mut out)?;

    Ok(ExitCode::SUCCESS)
}

/// Builds the log filter for `level`; `RUST_LOG` takes precedence when set.
///
/// Logs go to stderr so stdout carries nothing but offsets.
fn env_filter(level: &str) -> Result<EnvFilter> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| SearchError::config_error(format!("invalid log level: {}", level)))?;
    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy())
}
