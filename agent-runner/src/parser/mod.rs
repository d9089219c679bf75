//! Stream parsers for agent runtime output

mod sse;

pub use sse::decode_sse;
