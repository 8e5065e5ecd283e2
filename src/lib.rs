//! `senti-csv` library crate.
//!
//! The binary (`senti`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod batch;
pub mod classify;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod score;
pub mod tui;
