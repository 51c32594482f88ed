//! adldif - Active Directory LDIF normalizer
//!
//! Reads an LDIF export on stdin and writes it to stdout with opaque
//! attribute values (SIDs, GUIDs, timestamps, flags, base64 text) decoded.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use adldif_core::{AdldifConfig, AttributeTables, ConfigLoader, Mode};
use adldif_transform::{Pipeline, TransformOptions, Transformer};
use anyhow::Context;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "adldif")]
#[command(version)]
#[command(about = "Decode Active Directory LDIF attribute values", long_about = None)]
struct Cli {
    /// Output mode: raw, clean or bof (defaults to the configured mode)
    #[arg(value_name = "MODE")]
    mode: Option<Mode>,

    /// Increase verbosity (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short, long, env = "ADLDIF_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The final level depends on the config, so loader warnings go through
    // a bootstrap subscriber
    let bootstrap = stderr_subscriber(Level::WARN);
    let loaded = tracing::subscriber::with_default(bootstrap, || {
        ConfigLoader::new().with_cli_path(cli.config.clone()).load()
    });
    let configured_level = match &loaded {
        Ok(config) => config.logging.level.to_lowercase(),
        Err(_) => AdldifConfig::default().logging.level,
    };

    // CLI verbose flag takes precedence, then config, then default
    let log_level = if cli.verbose > 0 {
        match cli.verbose {
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    } else {
        match configured_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    };

    tracing::subscriber::set_global_default(stderr_subscriber(log_level))?;

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}, using defaults", e);
            AdldifConfig::default()
        }
    };

    let mode = match cli.mode {
        Some(mode) => mode,
        None => config.mode()?,
    };

    let tables = Arc::new(AttributeTables::with_settings(&config.attributes));
    let options = TransformOptions {
        sid_fallback: config.decode.sid_fallback,
    };
    let transformer = Transformer::new(mode, tables, options);
    info!("Processing stdin in {} mode", mode);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut pipeline = Pipeline::new(transformer);

    match pipeline.run(stdin.lock(), stdout.lock()) {
        Ok(stats) => {
            info!(
                "Done: {} lines read, {} written, {} dropped",
                stats.lines_read, stats.lines_written, stats.lines_dropped
            );
            Ok(())
        }
        Err(e) if e.is_broken_pipe() => {
            info!("Output closed after {} lines", pipeline.stats().lines_read);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("{} mode failed", mode)),
    }
}

fn stderr_subscriber(level: Level) -> FmtSubscriber<tracing_subscriber::fmt::format::DefaultFields, tracing_subscriber::fmt::format::Format, tracing_subscriber::filter::LevelFilter, fn() -> io::Stderr> {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr as fn() -> io::Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_argument() {
        let cli = Cli::try_parse_from(["adldif", "bof"]).unwrap();
        assert_eq!(cli.mode, Some(Mode::Bof));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_mode_is_optional() {
        let cli = Cli::try_parse_from(["adldif", "-vv"]).unwrap();
        assert_eq!(cli.mode, None);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["adldif", "json"]).is_err());
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
