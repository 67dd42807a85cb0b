// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Egviz CLI entrypoint.
//!
//! Runs the interactive TUI against the e-graph engine at `--server` (default
//! `http://127.0.0.1:8000`). Diagnostics go to `<log-dir>/egviz.<pid>.log` when a log
//! directory is configured; otherwise nothing is traced, because the TUI owns the terminal.

use std::error::Error;
use std::path::{Path, PathBuf};

use egviz::config::{ClientConfig, DEFAULT_SERVER_URL, LOG_DIR_ENV, SERVER_URL_ENV};
use egviz::transport::HttpTransport;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--server <url>] [--log-dir <dir>]\n  {program} --help\n\n--server selects the engine endpoint (env {SERVER_URL_ENV}, default {DEFAULT_SERVER_URL}).\n--log-dir writes diagnostics to <dir>/egviz.<pid>.log (env {LOG_DIR_ENV}); RUST_LOG filters them."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    help: bool,
    server: Option<String>,
    log_dir: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                if options.help {
                    return Err(());
                }
                options.help = true;
            }
            "--server" => {
                if options.server.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.server = Some(url);
            }
            "--log-dir" => {
                if options.log_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.log_dir = Some(PathBuf::from(dir));
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn setup_tracing(log_dir: &Path) {
    use std::fs::OpenOptions;
    use std::sync::Mutex;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let log_path = log_dir.join(format!("egviz.{}.log", std::process::id()));
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("egviz=debug,info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry().with(filter).with(file_layer).init();
    tracing::info!(path = ?log_path, "tracing initialized");
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "egviz".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        if options.help {
            print_usage(&program);
            return Ok(());
        }

        let config = ClientConfig::from_env(options.server, options.log_dir)?;
        if let Some(log_dir) = config.log_dir() {
            setup_tracing(log_dir);
        }
        tracing::info!(server = config.server_url(), "starting");

        let transport = HttpTransport::from_config(&config);
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let local = tokio::task::LocalSet::new();
        local.block_on(&runtime, egviz::tui::run(transport))?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("egviz: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use std::path::Path;

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_server_and_log_dir_in_any_order() {
        let args = ["--server", "http://engine:8000", "--log-dir", "logs"];
        let options =
            parse_options(args.into_iter().map(str::to_owned)).expect("parse options");
        assert_eq!(options.server.as_deref(), Some("http://engine:8000"));
        assert_eq!(options.log_dir.as_deref(), Some(Path::new("logs")));

        let args = ["--log-dir", "logs", "--server", "http://x"];
        let options =
            parse_options(args.into_iter().map(str::to_owned)).expect("parse options");
        assert_eq!(options.server.as_deref(), Some("http://x"));
        assert!(!options.help);
    }

    #[test]
    fn parses_help_flag() {
        assert!(parse_options(["--help".to_owned()].into_iter()).expect("parse options").help);
        assert!(parse_options(["-h".to_owned()].into_iter()).expect("parse options").help);
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
        parse_options(["http://127.0.0.1:8000".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        let args = ["--server", "http://a", "--server", "http://b"];
        parse_options(args.into_iter().map(str::to_owned)).unwrap_err();
        parse_options(
            ["--log-dir".to_owned(), "a".to_owned(), "--log-dir".to_owned(), "b".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
        parse_options(["--help".to_owned(), "--help".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(["--server".to_owned()].into_iter()).unwrap_err();
        parse_options(["--log-dir".to_owned()].into_iter()).unwrap_err();
    }
}
