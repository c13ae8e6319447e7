//! xcsh Binary
//!
//! Starts the interactive shell, or runs a single command when words follow
//! the flags or stdin is not a terminal.

use anyhow::Context;
use clap::Parser;
use std::process;
use xcsh::logging::init_logging_or_stderr;
use xcsh::repl::{should_enter_repl, Repl, Session};
use xcsh::tooling::Cli;

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let (config, settings_path) = cli.load_config().context("loading configuration")?;
    if let Some(e) = init_logging_or_stderr(&config.logging) {
        eprintln!("Warning: {}; logging warnings to stderr instead", e);
    }

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    let mut session = Session::bootstrap(
        &config,
        settings_path,
        cli.color_enabled(),
        runtime.handle().clone(),
    )
    .context("initialising session")?;

    let code = if should_enter_repl(&cli.words) {
        Repl::new(session)?.run()?
    } else {
        session.execute_batch(cli.words.clone())
    };

    runtime.shutdown_timeout(std::time::Duration::from_millis(100));
    Ok(code)
}
