//! Path utilities for rdp-launcher.
//!
//! Every file the launcher touches lives next to the executable unless the
//! user points somewhere else on the command line. Overrides go through
//! shell expansion so `~` works as expected.

use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{Error, Result};

/// File name of the connection history, relative to the application directory
pub const CONFIG_FILE_NAME: &str = "rdp-config.json";
/// Directory holding the connection template, relative to the application directory
pub const TEMPLATE_DIRECTORY: &str = "templates";
/// File name of the connection template inside [`TEMPLATE_DIRECTORY`]
pub const TEMPLATE_FILE_NAME: &str = "template.rdp";

/// Placeholder template used to name generated connection files.
///
/// `{hostname}` is the hostname as entered, `{monitors}` the monitor IDs
/// joined with `-`.
pub const DEFAULT_OUTPUT_NAME_TEMPLATE: &str = "{hostname}-{monitors}.rdp";

/// Returns the directory containing the running executable.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined or has no
/// parent directory.
pub fn application_directory() -> Result<PathBuf> {
    let executable = std::env::current_exe().map_err(Error::ApplicationDirectory)?;

    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            Error::ApplicationDirectory(io::Error::new(
                io::ErrorKind::NotFound,
                format!("`{}` has no parent directory", executable.display()),
            ))
        })
}

fn resolve(path_arg: &Option<String>, default: PathBuf) -> PathBuf {
    match path_arg {
        Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
        None => default,
    }
}

/// Resolves the connection history file path.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rdp_launcher_core::config::get_config_path;
///
/// let path = get_config_path(&None, Path::new("/opt/rdp"));
/// assert_eq!(path, Path::new("/opt/rdp/rdp-config.json"));
/// ```
pub fn get_config_path(config_path_arg: &Option<String>, base_dir: &Path) -> PathBuf {
    resolve(config_path_arg, base_dir.join(CONFIG_FILE_NAME))
}

/// Resolves the connection template path.
pub fn get_template_path(template_path_arg: &Option<String>, base_dir: &Path) -> PathBuf {
    resolve(
        template_path_arg,
        base_dir.join(TEMPLATE_DIRECTORY).join(TEMPLATE_FILE_NAME),
    )
}

/// Resolves the directory generated connection files are written to.
pub fn get_output_directory(output_dir_arg: &Option<String>, base_dir: &Path) -> PathBuf {
    resolve(output_dir_arg, base_dir.to_path_buf())
}

/// Formats a path for display to the user.
///
/// Paths inside `base_dir` are shown as `./relative/path`, everything else is
/// shown unchanged.
pub fn display_path(base_dir: &Path, path: &Path) -> String {
    match path.strip_prefix(base_dir) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            format!(".{MAIN_SEPARATOR}{}", relative.display())
        }
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path_defaults_to_base_dir() {
        let result = get_config_path(&None, Path::new("/opt/rdp"));
        assert_eq!(result, Path::new("/opt/rdp").join("rdp-config.json"));
    }

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/history.json".to_string());
        let result = get_config_path(&custom_path, Path::new("/opt/rdp"));
        assert_eq!(result, PathBuf::from("/custom/path/history.json"));
    }

    #[test]
    fn test_get_config_path_with_tilde() {
        let tilde_path = Some("~/history.json".to_string());
        let result = get_config_path(&tilde_path, Path::new("/opt/rdp"));
        // Should expand the tilde
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.ends_with("history.json"));
    }

    #[test]
    fn test_get_template_path_defaults_to_templates_dir() {
        let result = get_template_path(&None, Path::new("/opt/rdp"));
        assert_eq!(
            result,
            Path::new("/opt/rdp").join("templates").join("template.rdp")
        );
    }

    #[test]
    fn test_get_output_directory() {
        let base = Path::new("/opt/rdp");
        assert_eq!(get_output_directory(&None, base), base);

        let custom = Some("/tmp/out".to_string());
        assert_eq!(get_output_directory(&custom, base), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_display_path_inside_base_dir() {
        let base = Path::new("/opt/rdp");
        let path = base.join("server1-0-1.rdp");
        assert_eq!(
            display_path(base, &path),
            format!(".{MAIN_SEPARATOR}server1-0-1.rdp")
        );
    }

    #[test]
    fn test_display_path_outside_base_dir() {
        let path = Path::new("/somewhere/else/server1-0.rdp");
        assert_eq!(
            display_path(Path::new("/opt/rdp"), path),
            path.display().to_string()
        );
    }

    #[test]
    fn test_display_path_of_base_dir_itself() {
        let base = Path::new("/opt/rdp");
        assert_eq!(display_path(base, base), base.display().to_string());
    }

    #[test]
    fn test_application_directory_exists() {
        let directory = application_directory().unwrap();
        assert!(directory.is_dir());
    }
}
