//! Server-Sent Events decoding
//!
//! The runtime streams one `AgentChunk` per event. Framing is handled by
//! `eventsource-stream`; this module only maps events onto chunks.

use bytes::Bytes;
use eventsource_stream::{Event, Eventsource};
use futures::future;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::chunk::AgentChunk;
use crate::error::{AgentError, Result};
use crate::provider::ChunkStream;

const DONE_SENTINEL: &str = "[DONE]";
const ERROR_EVENT: &str = "error";

/// Decode a raw SSE response body into agent chunks
pub fn decode_sse(body: BoxStream<'static, reqwest::Result<Bytes>>) -> ChunkStream {
    Box::pin(body.eventsource().filter_map(|item| {
        future::ready(match item {
            Ok(event) => decode_event(event),
            Err(e) => Some(Err(AgentError::stream(e.to_string()))),
        })
    }))
}

fn decode_event(event: Event) -> Option<Result<AgentChunk>> {
    if event.data.is_empty() || event.data.trim() == DONE_SENTINEL {
        return None;
    }

    if event.event == ERROR_EVENT {
        return Some(Err(AgentError::stream(event.data)));
    }

    Some(
        serde_json::from_str::<AgentChunk>(&event.data)
            .map_err(|e| AgentError::stream(format!("Invalid chunk payload: {}", e))),
    )
}
