//! Streaming record decoder
//!
//! Reads newline-delimited JSON records from a buffered reader, one record
//! per call. The stream is lazy, non-restartable, and potentially infinite;
//! it ends only when the underlying reader does.

use crate::record::LogRecord;
use std::io::BufRead;
use thiserror::Error;

/// Errors produced while decoding the record stream
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A single line failed to parse as a record. The stream remains
    /// usable; whether to skip or abort is the caller's policy.
    #[error("malformed record: {source}")]
    Malformed {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying stream failed. No further records will be produced.
    #[error("stream read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lazy iterator over NDJSON records from a reader
///
/// Blank lines are skipped. A malformed line yields
/// `Err(DecodeError::Malformed)` and iteration continues with the next
/// line; an I/O failure yields `Err(DecodeError::Io)` and ends the stream.
pub struct RecordStream<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<LogRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(match serde_json::from_str(trimmed) {
                        Ok(record) => Ok(record),
                        Err(source) => Err(DecodeError::Malformed {
                            line: trimmed.to_string(),
                            source,
                        }),
                    });
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(DecodeError::Io(e)));
                }
            }
        }
    }
}
