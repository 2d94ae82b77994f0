//! Line-delimited JSON front end: one `{"action", "params"}` object per line.

use anyhow::Result;
use macro_deck_dispatch::{ActionDispatcher, ExecuteRequest, ExecuteResponse};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinSet;
use tracing::{error, info};

pub async fn respond_to_line(dispatcher: &ActionDispatcher, line: &str) -> ExecuteResponse {
    match serde_json::from_str::<ExecuteRequest>(line) {
        Ok(request) => dispatcher.handle(&request.action, request.params).await,
        Err(e) => ExecuteResponse::Error {
            error: format!("Invalid request: {e}"),
        },
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ExecuteResponse,
) -> Result<()> {
    let mut json = serde_json::to_string(response)?;
    json.push('\n');
    writer.write_all(json.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Dispatch every request line from `reader`, each as its own task.
///
/// Finished tasks are reaped while reading continues, so only in-flight
/// requests are held. Responses are written in completion order. Returns the
/// number of requests answered.
pub async fn serve<R, W>(dispatcher: Arc<ActionDispatcher>, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks: JoinSet<ExecuteResponse> = JoinSet::new();
    let mut reading = true;
    let mut handled = 0usize;

    while reading || !tasks.is_empty() {
        tokio::select! {
            line = lines.next_line(), if reading => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let dispatcher = dispatcher.clone();
                    tasks.spawn(async move { respond_to_line(&dispatcher, line.trim()).await });
                }
                None => reading = false,
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => match joined {
                Ok(response) => {
                    write_response(&mut writer, &response).await?;
                    handled += 1;
                }
                Err(e) => error!("Dispatch task failed: {}", e),
            },
        }
    }

    Ok(handled)
}

pub async fn run(dispatcher: Arc<ActionDispatcher>) -> Result<()> {
    let handled = serve(
        dispatcher,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;
    info!("stdin closed after {} requests", handled);
    Ok(())
}
