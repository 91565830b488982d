//! The non-interactive part of a launcher run.
//!
//! Once the hostname and monitor input have been collected, everything up to
//! the optional launch happens here: validation, history update, history
//! save and connection file generation. Nothing is written unless both inputs
//! are valid.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{
    get_config_path, get_output_directory, get_template_path, DEFAULT_OUTPUT_NAME_TEMPLATE,
};
use crate::error::Result;
use crate::history::{save_history, ConnectionHistory, JsonFormat};
use crate::rdp_file::{output_file_name, rewrite_template};
use crate::validation::{parse_monitor_ids, validate_hostname};

/// Where a run reads and writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    /// Directory paths are displayed relative to
    pub base_dir: PathBuf,
    pub config_path: PathBuf,
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    pub name_template: String,
}

impl Locations {
    /// Default locations, all inside `base_dir`.
    pub fn in_directory(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            config_path: get_config_path(&None, base_dir),
            template_path: get_template_path(&None, base_dir),
            output_dir: get_output_directory(&None, base_dir),
            name_template: DEFAULT_OUTPUT_NAME_TEMPLATE.to_string(),
        }
    }
}

/// Validates the entered values, records them in the history, saves the
/// history and writes the connection file.
///
/// Returns the path of the written connection file.
///
/// # Errors
///
/// Returns an error if:
/// - The hostname is blank or the monitor input has no monitor IDs (nothing is written)
/// - The output name template cannot be rendered (nothing is written)
/// - The history file cannot be written
/// - The template is missing or the connection file cannot be written
pub fn generate_connection_file(
    locations: &Locations,
    history: &mut ConnectionHistory,
    format: JsonFormat,
    hostname: &str,
    monitor_input: &str,
) -> Result<PathBuf> {
    validate_hostname(hostname)?;
    let monitor_ids = parse_monitor_ids(monitor_input)?;
    debug!("Monitor IDs: {:?}", monitor_ids);

    let output_path = locations.output_dir.join(output_file_name(
        &locations.name_template,
        hostname,
        &monitor_ids,
    )?);

    history.update(hostname, monitor_input);
    save_history(&locations.config_path, history, format)?;

    rewrite_template(&locations.template_path, &output_path, hostname, &monitor_ids)?;

    Ok(output_path)
}
