//! SSE framing for the automation service's event stream.
//!
//! Converts a raw byte stream into `StreamEvent` values. Handles partial
//! lines across chunk boundaries and skips lines that fail to decode.

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;

use crate::models::automation::StreamEvent;

const DATA_PREFIX: &str = "data: ";

/// Accumulates chunks and yields complete `\n`-terminated lines.
///
/// Splitting happens on bytes, so a multi-byte character cut by a chunk
/// boundary is reassembled before decoding.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed, without terminators.
    pub fn append(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete[..last_newline]
            .split(|&b| b == b'\n')
            .map(|line| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                String::from_utf8_lossy(line).into_owned()
            })
            .collect()
    }

    /// Bytes received after the last newline.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

/// Decode one line. Returns `None` for lines that are not `data:` lines or
/// whose payload is not a valid event.
pub fn parse_line(line: &str) -> Option<StreamEvent> {
    let data = line.strip_prefix(DATA_PREFIX)?;
    match serde_json::from_str::<StreamEvent>(data) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(
                error = %e,
                data = %data.chars().take(200).collect::<String>(),
                "Failed to parse SSE event, skipping"
            );
            None
        }
    }
}

/// Pull-based reader of `StreamEvent`s over a chunked byte stream.
///
/// Owns the underlying stream; dropping the reader releases it.
pub struct EventStream<E> {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, E>> + Send>>,
    lines: LineBuffer,
    ready: VecDeque<StreamEvent>,
}

impl<E: 'static> EventStream<E> {
    pub fn new(byte_stream: impl Stream<Item = Result<Bytes, E>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            lines: LineBuffer::new(),
            ready: VecDeque::new(),
        }
    }

    /// Next decoded event, `Ok(None)` once the byte stream is exhausted.
    ///
    /// A trailing line with no newline at end of stream is dropped.
    pub async fn next_event(&mut self) -> Result<Option<StreamEvent>, E> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Ok(Some(event));
            }

            match self.inner.next().await {
                Some(Ok(chunk)) => {
                    let lines = self.lines.append(&chunk);
                    self.ready
                        .extend(lines.iter().filter_map(|line| parse_line(line)));
                }
                Some(Err(e)) => return Err(e),
                None => {
                    if !self.lines.pending().is_empty() {
                        tracing::debug!(
                            bytes = self.lines.pending().len(),
                            "Stream ended with an unterminated line"
                        );
                    }
                    return Ok(None);
                }
            }
        }
    }
}
