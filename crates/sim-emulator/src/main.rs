//! SIM Card Communication Emulator - Main entry point.

use anyhow::Context;
use sim_core::{Directory, LogStore, LoopbackAuthenticator, Network};
use sim_emulator::{AppResult, Config, Flow, Level, Session, Shell};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting SIM Card Communication Emulator...");

    let directory = match &config.directory.path {
        Some(path) => {
            let directory = Directory::from_json_file(path)?;
            info!("Loaded {} subscribers from {:?}", directory.len(), path);
            directory
        }
        None => {
            info!("Using built-in sample subscriber directory");
            Directory::sample()
        }
    };
    if directory.is_empty() {
        warn!("Subscriber directory is empty - every registration will be rejected");
    }

    let logbook = if config.logbook.persist {
        LogStore::file(&config.logbook.dir)
    } else {
        LogStore::memory()
    };

    let network = Network::new(directory, LoopbackAuthenticator::new(), logbook);
    let mut shell = Shell::new(Session::new(network));

    println!("SIM Card Communication Emulator. Type 'help' for commands.");
    run(&mut shell).await?;

    info!(
        "Shutting down ({} SIMs registered)",
        shell.session().network.registry().count()
    );
    Ok(())
}

/// Read commands from stdin until EOF, `quit` or Ctrl-C.
async fn run(shell: &mut Shell) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", shell.prompt());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => {
                println!();
                info!("Received Ctrl-C");
                return Ok(());
            }
        };

        let Some(line) = line else {
            println!();
            return Ok(());
        };

        match shell.handle_line(&line) {
            Flow::Exit => return Ok(()),
            Flow::Continue(notices) => {
                for notice in notices {
                    match notice.level {
                        Level::Info => println!("{}", notice),
                        Level::Warning | Level::Error => eprintln!("{}", notice),
                    }
                }
            }
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
