//! Newline-delimited JSON over a byte stream (stdio in production)

use crate::error::ProtocolError;
use serde_json::Value;
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Message(Value),
    /// A line that was not valid JSON.
    Malformed(String),
}

pub struct Transport<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<Value>,
}

impl<R, W> Transport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Next line from the stream, skipping blank lines. `None` at EOF.
    async fn read_line(&mut self) -> Result<Option<Incoming>, ProtocolError> {
        loop {
            let mut line = Vec::new();
            let n = self
                .reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(ProtocolError::Read)?;
            if n == 0 {
                return Ok(None);
            }
            // Undecodable bytes are a malformed message, not a broken stream.
            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }
            return Ok(Some(match serde_json::from_slice(trimmed) {
                Ok(value) => Incoming::Message(value),
                Err(e) => Incoming::Malformed(e.to_string()),
            }));
        }
    }

    /// Next message to handle: anything queued while waiting on a response first.
    pub async fn next_message(&mut self) -> Result<Option<Incoming>, ProtocolError> {
        if let Some(value) = self.pending.pop_front() {
            return Ok(Some(Incoming::Message(value)));
        }
        self.read_line().await
    }

    /// Read until the response to our request `id` arrives; queue everything else.
    pub async fn await_response(&mut self, id: &Value) -> Result<Value, ProtocolError> {
        loop {
            match self.read_line().await? {
                None => return Err(ProtocolError::Closed(format!("response to {}", id))),
                Some(Incoming::Malformed(e)) => {
                    tracing::warn!(error = %e, "dropping malformed message while awaiting response");
                }
                Some(Incoming::Message(value)) => {
                    let is_response = value.get("method").is_none();
                    if is_response && value.get("id") == Some(id) {
                        return Ok(value);
                    }
                    self.pending.push_back(value);
                }
            }
        }
    }

    pub async fn write_message(&mut self, message: &Value) -> Result<(), ProtocolError> {
        let mut line = message.to_string();
        line.push('\n');
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(ProtocolError::Write)?;
        self.writer.flush().await.map_err(ProtocolError::Write)
    }
}
