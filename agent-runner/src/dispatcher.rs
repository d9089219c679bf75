//! Chat dispatcher
//!
//! Runs one instruction through an agent session and keeps only the last
//! piece of tool output.

use futures::StreamExt;
use tracing::debug;

use statuette_core::chat::ChatResponse;

use crate::error::Result;
use crate::provider::AgentSession;
use crate::session::SessionConfig;

/// Send one instruction and return the final tool output, if any.
///
/// The returned list holds at most one `tools` message. Errors from the
/// session, at submission or mid-stream, are returned as-is.
pub async fn dispatch(
    session: &dyn AgentSession,
    config: &SessionConfig,
    instruction: &str,
) -> Result<Vec<ChatResponse>> {
    let mut stream = session.stream(instruction, config).await?;
    let mut last_tool_output = None;
    let mut chunk_count = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        chunk_count += 1;
        if let Some(output) = chunk.tool_output() {
            last_tool_output = Some(output);
        }
    }

    debug!(
        "Dispatch consumed {} chunks (tool output: {})",
        chunk_count,
        last_tool_output.is_some()
    );

    Ok(last_tool_output.map(ChatResponse::tools).into_iter().collect())
}
