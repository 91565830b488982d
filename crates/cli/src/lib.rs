//! RDP Launcher CLI Library
//!
//! This crate provides the command-line interface for rdp-launcher. It asks
//! for a hostname and monitor IDs, offering the answers of earlier runs, then
//! writes the connection file and optionally opens it.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`selection`]: Interactive choice list, text and confirmation prompts
//!
//! # Examples
//!
//! ```bash
//! # Full interactive run, files next to the executable
//! rdpl
//!
//! # Keep history and generated files elsewhere
//! rdpl --config-path ~/.rdp/history.json --output-dir ~/.rdp
//!
//! # Write the file only
//! rdpl --no-launch
//! ```

pub mod cli_args;
pub mod selection;
