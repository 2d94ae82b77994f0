use anyhow::{bail, Result};
use macro_deck_dispatch::{ActionDispatcher, ExecuteResponse};
use std::collections::HashMap;

/// Parse `key=value` arguments. Values may themselves contain `=`.
pub fn parse_params(args: &[String]) -> Result<HashMap<String, String>> {
    let mut params = HashMap::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected key=value, got '{}'", arg);
        };
        if key.trim().is_empty() {
            bail!("Empty parameter name in '{}'", arg);
        }
        params.insert(key.trim().to_string(), value.to_string());
    }
    Ok(params)
}

/// Dispatch one action and print its response. Returns whether it succeeded.
pub async fn run(dispatcher: &ActionDispatcher, kind: &str, args: &[String]) -> Result<bool> {
    let params = parse_params(args)?;
    let response = dispatcher.handle(kind, params).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(matches!(response, ExecuteResponse::Success { .. }))
}
