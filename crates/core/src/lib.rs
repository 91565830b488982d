//! RDP Launcher Core Library
//!
//! This crate provides the core functionality for rdp-launcher, a small tool
//! that remembers the hosts and monitor layouts a user connects with, writes a
//! remote desktop connection file for the chosen combination and opens it with
//! the platform's remote desktop client.
//!
//! # Key Features
//!
//! - **Connection History**: Load and save previously used hostnames and monitor configurations
//! - **Input Validation**: Hostname checks and monitor ID parsing
//! - **Connection Files**: Rewrite the managed settings of an `.rdp` template
//! - **Launching**: Start the remote desktop client detached from the terminal
//! - **Workflow**: Validate, record and generate in one step once the user has answered
//!
//! # Examples
//!
//! Writing a connection file for two monitors:
//!
//! ```no_run
//! use std::path::Path;
//! use rdp_launcher_core::rdp_file::rewrite_template;
//! use rdp_launcher_core::validation::parse_monitor_ids;
//!
//! let monitor_ids = parse_monitor_ids("0,1")?;
//! rewrite_template(
//!     Path::new("templates/template.rdp"),
//!     Path::new("server1-0-1.rdp"),
//!     "server1",
//!     &monitor_ids,
//! )?;
//! # Ok::<(), rdp_launcher_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod launcher;
pub mod rdp_file;
pub mod validation;
pub mod workflow;
