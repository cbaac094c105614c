//! timberline-core: domain types and record decoding for timberline
//!
//! This crate knows nothing about terminals. It defines the wire shape of a
//! log record and a streaming decoder over any buffered reader.

pub mod decode;
pub mod record;

pub use decode::{DecodeError, RecordStream};
pub use record::{LogRecord, Severity};
