//! Command-line argument parsing.
//!
//! Running without arguments performs the full interactive flow with every
//! file located next to the executable. The options below only move those
//! files or change how the launch step behaves.

use std::path::Path;

use clap::Parser;
use rdp_launcher_core::config::{
    get_config_path, get_output_directory, get_template_path, DEFAULT_OUTPUT_NAME_TEMPLATE,
};
use rdp_launcher_core::launcher::RemoteDesktopClient;
use rdp_launcher_core::workflow::Locations;

/// Command-line arguments for the `rdpl` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rdp_launcher_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rdpl", "--no-launch"]);
/// assert!(args.no_launch);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the connection history JSON file.
    ///
    /// If not provided, defaults to `rdp-config.json` next to the executable.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Path to the `.rdp` template file.
    ///
    /// If not provided, defaults to `templates/template.rdp` next to the executable.
    #[arg(long, short = 't')]
    pub template_path: Option<String>,

    /// Directory the generated connection file is written to.
    ///
    /// If not provided, defaults to the directory of the executable.
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Template for the generated file name.
    ///
    /// Supports the `{hostname}` and `{monitors}` placeholders.
    #[arg(long, short = 'n', default_value = DEFAULT_OUTPUT_NAME_TEMPLATE)]
    pub name_template: String,

    /// Remote desktop client used to open the generated file.
    ///
    /// Defaults to `mstsc.exe` on Windows, `open` on macOS and `xdg-open` elsewhere.
    #[arg(long)]
    pub client: Option<String>,

    /// Launch the remote desktop client without asking.
    #[arg(long, short = 'y', action, conflicts_with = "no_launch")]
    pub yes: bool,

    /// Only write the connection file, never launch the client.
    #[arg(long, action)]
    pub no_launch: bool,
}

impl Args {
    /// Resolves the file locations, using `base_dir` for everything not overridden.
    pub fn locations(&self, base_dir: &Path) -> Locations {
        Locations {
            base_dir: base_dir.to_path_buf(),
            config_path: get_config_path(&self.config_path, base_dir),
            template_path: get_template_path(&self.template_path, base_dir),
            output_dir: get_output_directory(&self.output_dir, base_dir),
            name_template: self.name_template.clone(),
        }
    }

    pub fn client(&self) -> RemoteDesktopClient {
        match &self.client {
            Some(program) => RemoteDesktopClient::new(program),
            None => RemoteDesktopClient::default(),
        }
    }
}
