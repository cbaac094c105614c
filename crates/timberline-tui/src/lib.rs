//! timberline-tui: Terminal UI for timberline
//!
//! This crate provides a Ratatui-based TUI using the Component pattern.
//! A background ingestion task decodes records from stdin and hands them
//! to the single-threaded update loop over a one-slot channel.

pub mod action;
pub mod app;
pub mod components;
pub mod ingest;
pub mod keymap;
pub mod tui;

pub use app::App;
