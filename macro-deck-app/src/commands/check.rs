use anyhow::Result;
use crate::config::Config;
use macro_deck_dispatch::{KeyName, MediaOperation};

pub fn run(config: &Config) -> Result<()> {
    println!("Platform check\n");

    let family = config.family()?;
    println!("Platform:      {family}");

    // Building the dispatcher verifies the command table
    config.dispatcher()?;
    println!(
        "Command table: ✓ (open path, {} media actions, {} keys)",
        MediaOperation::ALL.len(),
        KeyName::ALL.len()
    );

    match config.timeout_ms {
        Some(ms) => println!("Timeout:       {ms}ms"),
        None => println!("Timeout:       none"),
    }
    Ok(())
}
