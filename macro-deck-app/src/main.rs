use anyhow::{Context, Result};
use macro_deck_app::commands;
use macro_deck_app::Config;
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "\
Usage:
  macro-deck <kind> [key=value ...]   dispatch one action
  macro-deck -                        read {\"action\",\"params\"} JSON lines from stdin
  macro-deck check                    verify the platform command table

Kinds: application (path), command (command), media (action), keystroke (key)

Warning: application and command actions run arbitrary programs as this user.";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(first) = args.first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    if first == "-h" || first == "--help" {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config)?;

    match first.as_str() {
        "check" => commands::check::run(&config),
        "-" => {
            let dispatcher = Arc::new(config.dispatcher()?);
            info!("Reading actions from stdin ({})", dispatcher.family());
            commands::stdin::run(dispatcher).await
        }
        kind => {
            let dispatcher = config.dispatcher()?;
            if !commands::run::run(&dispatcher, kind, &args[1..]).await? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries only JSON responses.
fn init_logging(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
