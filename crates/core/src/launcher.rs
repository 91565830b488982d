//! Opening generated connection files with a remote desktop client.
//!
//! The client is started detached with its standard streams closed and is
//! never waited on.

use std::path::Path;
use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

#[cfg(windows)]
const DEFAULT_CLIENT: &str = "mstsc.exe";
#[cfg(target_os = "macos")]
const DEFAULT_CLIENT: &str = "open";
#[cfg(all(unix, not(target_os = "macos")))]
const DEFAULT_CLIENT: &str = "xdg-open";

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

/// The program used to open generated connection files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDesktopClient {
    program: String,
}

impl Default for RemoteDesktopClient {
    fn default() -> Self {
        Self {
            program: DEFAULT_CLIENT.to_string(),
        }
    }
}

impl RemoteDesktopClient {
    /// Uses `program` instead of the platform default. `~` is expanded.
    pub fn new(program: &str) -> Self {
        Self {
            program: shellexpand::tilde(program).to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the command opening `rdp_path`, detached from this terminal.
    ///
    /// The path is passed as a single argument; the platform argument encoding
    /// takes care of quoting paths containing spaces.
    pub fn build_command(&self, rdp_path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(rdp_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(DETACHED_PROCESS);
        }

        command
    }

    /// Starts the client for `rdp_path` without waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the client process could not be started.
    pub fn launch(&self, rdp_path: &Path) -> Result<()> {
        let child = self
            .build_command(rdp_path)
            .spawn()
            .map_err(|e| Error::launch_error(self.program.clone(), e))?;

        info!(
            "Started `{}` (pid {}) for `{}`",
            self.program,
            child.id(),
            rdp_path.display()
        );

        Ok(())
    }
}
