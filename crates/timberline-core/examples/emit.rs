//! Example: emit sample NDJSON records for piping into the viewer
//!
//! Run with: cargo run --example emit -p timberline-core | cargo run

use std::thread;
use std::time::Duration;
use timberline_core::LogRecord;

fn main() {
    let mut value = 1u64;
    loop {
        for level in ["INFO", "WARN", "ERROR"] {
            let record = LogRecord {
                time: chrono::Utc::now().to_rfc3339(),
                level: level.to_string(),
                prefix: "demo".to_string(),
                file: "emit.rs".to_string(),
                line: line!().to_string(),
                message: format!("My value = {value}"),
            };
            println!("{}", serde_json::to_string(&record).expect("record serializes"));
        }
        value += 1;
        thread::sleep(Duration::from_secs(1));
    }
}
