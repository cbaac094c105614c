//! Background ingestion loop
//!
//! Runs the record decoder on a blocking task and forwards events to the
//! update loop over a one-slot channel. The send blocks until the previous
//! event is consumed, so the decoder can never run ahead of rendering by
//! more than one record.

use std::io::BufRead;
use timberline_core::{DecodeError, LogRecord, RecordStream};
use tokio::sync::mpsc;

/// Events delivered from the ingestion loop to the update loop
#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent {
    /// A decoded record, in stream arrival order
    Record(LogRecord),
    /// Running count of malformed records skipped so far
    Skipped(u64),
    /// The input stream reached end-of-file; no more records will arrive
    Closed,
    /// The input stream failed; no more records will arrive
    Failed(String),
}

/// Spawn the ingestion loop over `reader`.
///
/// The returned receiver is the only hand-off between decoding and the
/// UI. The loop exits on end-of-stream, on a read error, or when the
/// receiver is dropped; it is never joined — process exit reclaims it.
pub fn spawn<R>(reader: R) -> mpsc::Receiver<IngestEvent>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    tokio::task::spawn_blocking(move || run(reader, tx));
    rx
}

fn run<R: BufRead>(reader: R, tx: mpsc::Sender<IngestEvent>) {
    let mut skipped = 0u64;
    for item in RecordStream::new(reader) {
        let event = match item {
            Ok(record) => IngestEvent::Record(record),
            Err(DecodeError::Malformed { line, source }) => {
                // Skip-and-continue policy: the record is dropped from the
                // table, but the skip is logged and counted for the header.
                skipped += 1;
                tracing::warn!(%source, %line, "skipping malformed record");
                IngestEvent::Skipped(skipped)
            }
            Err(DecodeError::Io(e)) => {
                tracing::error!("log stream read failed: {e}");
                let _ = tx.blocking_send(IngestEvent::Failed(e.to_string()));
                return;
            }
        };
        if tx.blocking_send(event).is_err() {
            // UI is gone; nothing left to deliver to
            return;
        }
    }
    tracing::info!("log stream closed");
    let _ = tx.blocking_send(IngestEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn input(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[tokio::test]
    async fn records_arrive_in_order_then_closed() {
        let mut rx = spawn(input(concat!(
            r#"{"level":"INFO","message":"one"}"#,
            "\n",
            r#"{"level":"WARN","message":"two"}"#,
            "\n",
        )));

        match rx.recv().await.unwrap() {
            IngestEvent::Record(LogRecord { message, .. }) => assert_eq!(message, "one"),
            other => panic!("expected first record, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            IngestEvent::Record(LogRecord { message, .. }) => assert_eq!(message, "two"),
            other => panic!("expected second record, got {other:?}"),
        }
        assert_eq!(rx.recv().await.unwrap(), IngestEvent::Closed);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn malformed_records_are_skipped_and_counted() {
        let mut rx = spawn(input(concat!(
            "garbage\n",
            r#"{"level":"INFO"}"#,
            "\n",
            "more garbage\n",
        )));

        assert_eq!(rx.recv().await.unwrap(), IngestEvent::Skipped(1));
        match rx.recv().await.unwrap() {
            IngestEvent::Record(record) => assert_eq!(record.level, "INFO"),
            other => panic!("expected record, got {other:?}"),
        }
        assert_eq!(rx.recv().await.unwrap(), IngestEvent::Skipped(2));
        assert_eq!(rx.recv().await.unwrap(), IngestEvent::Closed);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"))
        }
    }

    #[tokio::test]
    async fn read_failure_is_surfaced_then_channel_closes() {
        let mut rx = spawn(io::BufReader::new(FailingReader));

        match rx.recv().await.unwrap() {
            IngestEvent::Failed(message) => assert!(message.contains("gone")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn empty_stream_closes_immediately() {
        let mut rx = spawn(input(""));
        assert_eq!(rx.recv().await.unwrap(), IngestEvent::Closed);
        assert!(rx.recv().await.is_none());
    }
}
