//! Generation of `.rdp` connection files from a template.
//!
//! The template is treated as opaque lines. Only the three settings the
//! launcher controls are recognized, by their key prefix, and they are always
//! written as the first three lines of the output.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use leon::Template;
use log::{debug, info};

use crate::error::{Error, Result};

pub const SELECTED_MONITORS_KEY: &str = "selectedmonitors:s:";
pub const USE_MULTIMON_KEY: &str = "use multimon:i:";
pub const FULL_ADDRESS_KEY: &str = "full address:s:";

/// Keys managed by the launcher, in the order they are written.
pub const MANAGED_KEYS: [&str; 3] = [SELECTED_MONITORS_KEY, USE_MULTIMON_KEY, FULL_ADDRESS_KEY];

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// The connection settings written into every generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub selected_monitors: String,
    pub use_multimon: u8,
    pub full_address: String,
}

impl ConnectionSettings {
    pub fn new(hostname: &str, monitor_ids: &[String]) -> Self {
        Self {
            selected_monitors: monitor_ids.join(","),
            use_multimon: u8::from(monitor_ids.len() > 1),
            full_address: hostname.to_string(),
        }
    }

    /// The managed lines, in [`MANAGED_KEYS`] order.
    pub fn key_lines(&self) -> [String; 3] {
        [
            format!("{SELECTED_MONITORS_KEY}{}", self.selected_monitors),
            format!("{USE_MULTIMON_KEY}{}", self.use_multimon),
            format!("{FULL_ADDRESS_KEY}{}", self.full_address),
        ]
    }
}

fn starts_with_key(line: &str, key: &str) -> bool {
    line.as_bytes()
        .get(..key.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(key.as_bytes()))
}

/// Whether `line` sets one of the launcher-managed keys, ignoring case.
pub fn is_managed_line(line: &str) -> bool {
    MANAGED_KEYS.iter().any(|key| starts_with_key(line, key))
}

/// Builds the output lines: the managed key lines first, then every template
/// line that does not set a managed key, in template order.
///
/// # Examples
///
/// ```
/// use rdp_launcher_core::rdp_file::{rewrite_lines, ConnectionSettings};
///
/// let settings = ConnectionSettings::new("server1", &["0".to_string()]);
/// let lines = rewrite_lines(["screen mode id:i:2", "Full Address:s:old"], &settings);
/// assert_eq!(
///     lines,
///     vec![
///         "selectedmonitors:s:0",
///         "use multimon:i:0",
///         "full address:s:server1",
///         "screen mode id:i:2",
///     ]
/// );
/// ```
pub fn rewrite_lines<'a, I>(template_lines: I, settings: &ConnectionSettings) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut output: Vec<String> = settings.key_lines().into_iter().collect();

    output.extend(
        template_lines
            .into_iter()
            .filter(|line| !is_managed_line(line))
            .map(ToString::to_string),
    );

    output
}

fn read_template(template_path: &Path) -> Result<String> {
    if !template_path.is_file() {
        return Err(Error::template_not_found(
            template_path.display().to_string(),
        ));
    }

    fs::read_to_string(template_path).map_err(|e| {
        Error::io_error(
            "template".to_string(),
            template_path.display().to_string(),
            e,
        )
    })
}

fn is_same_file(template_path: &Path, output_path: &Path) -> bool {
    match (
        fs::canonicalize(template_path),
        fs::canonicalize(output_path),
    ) {
        (Ok(template), Ok(output)) => template == output,
        _ => false,
    }
}

fn write_lines(output_path: &Path, lines: &[String]) -> Result<()> {
    let mut contents = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for line in lines {
        contents.push_str(line);
        contents.push_str(LINE_ENDING);
    }

    fs::write(output_path, contents).map_err(|e| {
        Error::io_error(
            "connection".to_string(),
            output_path.display().to_string(),
            e,
        )
    })
}

/// Writes a connection file for `hostname` and `monitor_ids` based on the
/// template at `template_path`.
///
/// The template itself is never modified.
///
/// # Errors
///
/// Returns an error if:
/// - `monitor_ids` is empty
/// - The template file does not exist or cannot be read
/// - `output_path` refers to the template file
/// - The output file cannot be written
pub fn rewrite_template(
    template_path: &Path,
    output_path: &Path,
    hostname: &str,
    monitor_ids: &[String],
) -> Result<()> {
    if monitor_ids.is_empty() {
        return Err(Error::NoValidMonitorIds(String::new()));
    }

    let template = read_template(template_path)?;

    if is_same_file(template_path, output_path) {
        return Err(Error::OutputIsTemplate {
            path: output_path.display().to_string(),
        });
    }

    let settings = ConnectionSettings::new(hostname, monitor_ids);
    debug!("Connection settings: {:?}", settings);

    let template = template.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&template);
    let lines = rewrite_lines(template.lines(), &settings);

    write_lines(output_path, &lines)?;
    info!(
        "Wrote {} lines to `{}`",
        lines.len(),
        output_path.display()
    );

    Ok(())
}

/// Renders the name of the generated connection file.
///
/// `name_template` may use the `{hostname}` and `{monitors}` placeholders,
/// see [`crate::config::DEFAULT_OUTPUT_NAME_TEMPLATE`].
///
/// # Errors
///
/// Returns an error if the template is malformed or uses an unknown placeholder.
pub fn output_file_name(
    name_template: &str,
    hostname: &str,
    monitor_ids: &[String],
) -> Result<String> {
    let template = Template::parse(name_template)?;

    let context: HashMap<String, String> = HashMap::from([
        ("hostname".to_string(), hostname.to_string()),
        ("monitors".to_string(), monitor_ids.join("-")),
    ]);

    Ok(template.render(&context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OUTPUT_NAME_TEMPLATE;
    use tempfile::tempdir;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_settings_single_monitor() {
        let settings = ConnectionSettings::new("server1", &ids(&["2"]));
        assert_eq!(settings.selected_monitors, "2");
        assert_eq!(settings.use_multimon, 0);
        assert_eq!(settings.full_address, "server1");
    }

    #[test]
    fn test_settings_multiple_monitors() {
        let settings = ConnectionSettings::new("server1", &ids(&["2", "0", "1"]));
        assert_eq!(settings.selected_monitors, "2,0,1");
        assert_eq!(settings.use_multimon, 1);
    }

    #[test]
    fn test_selected_monitors_splits_back_to_ids() {
        let monitor_ids = ids(&["3", "1", "1", "0"]);
        let settings = ConnectionSettings::new("server1", &monitor_ids);
        let split: Vec<String> = settings
            .selected_monitors
            .split(',')
            .map(ToString::to_string)
            .collect();
        assert_eq!(split, monitor_ids);
    }

    #[test]
    fn test_is_managed_line_ignores_case() {
        assert!(is_managed_line("selectedmonitors:s:0"));
        assert!(is_managed_line("SelectedMonitors:S:0,1"));
        assert!(is_managed_line("USE MULTIMON:I:1"));
        assert!(is_managed_line("Full Address:s:host"));
        assert!(!is_managed_line("full address:i:1"));
        assert!(!is_managed_line("full address"));
        assert!(!is_managed_line(" full address:s:host"));
        assert!(!is_managed_line("alternate full address:s:host"));
        assert!(!is_managed_line(""));
    }

    #[test]
    fn test_is_managed_line_with_multibyte_text() {
        assert!(!is_managed_line("ü"));
        assert!(!is_managed_line("fullé address:s:host"));
    }

    #[test]
    fn test_rewrite_lines_inserts_missing_keys() {
        let settings = ConnectionSettings::new("server1", &ids(&["0"]));
        let lines = rewrite_lines(["screen mode id:i:2", "session bpp:i:32"], &settings);

        assert_eq!(
            lines,
            vec![
                "selectedmonitors:s:0",
                "use multimon:i:0",
                "full address:s:server1",
                "screen mode id:i:2",
                "session bpp:i:32",
            ]
        );
    }

    #[test]
    fn test_rewrite_lines_replaces_existing_keys() {
        let template = [
            "screen mode id:i:2",
            "selectedmonitors:s:0",
            "use multimon:i:0",
            "session bpp:i:32",
        ];
        let settings = ConnectionSettings::new("server1", &ids(&["0", "1"]));

        assert_eq!(
            rewrite_lines(template, &settings),
            vec![
                "selectedmonitors:s:0,1",
                "use multimon:i:1",
                "full address:s:server1",
                "screen mode id:i:2",
                "session bpp:i:32",
            ]
        );
    }

    #[test]
    fn test_rewrite_lines_removes_duplicates_of_any_case() {
        let template = [
            "FULL ADDRESS:s:one",
            "audiomode:i:0",
            "full address:s:two",
            "Use Multimon:i:1",
            "use multimon:i:0",
        ];
        let settings = ConnectionSettings::new("server1", &ids(&["4"]));
        let lines = rewrite_lines(template, &settings);

        for key in MANAGED_KEYS {
            let count = lines.iter().filter(|l| starts_with_key(l, key)).count();
            assert_eq!(count, 1, "key `{key}` should appear exactly once");
        }
        assert_eq!(lines[3..], ["audiomode:i:0".to_string()]);
    }

    #[test]
    fn test_rewrite_lines_empty_template() {
        let settings = ConnectionSettings::new("server1", &ids(&["0"]));
        let lines = rewrite_lines(std::iter::empty(), &settings);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_rewrite_template_writes_output() {
        let directory = tempdir().unwrap();
        let template_path = directory.path().join("template.rdp");
        let output_path = directory.path().join("server1-0-1.rdp");
        let template = "selectedmonitors:s:0\nscreen mode id:i:2\r\nuse multimon:i:0\nkeep me\n";
        fs::write(&template_path, template).unwrap();

        rewrite_template(&template_path, &output_path, "server1", &ids(&["0", "1"])).unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "selectedmonitors:s:0,1",
                "use multimon:i:1",
                "full address:s:server1",
                "screen mode id:i:2",
                "keep me",
            ]
        );
        assert!(written.ends_with(LINE_ENDING));
        // Template is left untouched
        assert_eq!(fs::read_to_string(&template_path).unwrap(), template);
    }

    #[test]
    fn test_rewrite_template_strips_byte_order_mark() {
        let directory = tempdir().unwrap();
        let template_path = directory.path().join("template.rdp");
        let output_path = directory.path().join("out.rdp");
        fs::write(&template_path, "\u{feff}full address:s:old\nother:s:x\n").unwrap();

        rewrite_template(&template_path, &output_path, "new", &ids(&["0"])).unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert!(written.starts_with("selectedmonitors:s:0"));
        assert!(!written.contains("old"));
        assert!(!written.contains(BYTE_ORDER_MARK));
    }

    #[test]
    fn test_rewrite_template_missing_template() {
        let directory = tempdir().unwrap();
        let template_path = directory.path().join("missing.rdp");
        let output_path = directory.path().join("out.rdp");

        let result = rewrite_template(&template_path, &output_path, "server1", &ids(&["0"]));

        let Err(Error::TemplateNotFound { path }) = result else {
            panic!("Expected a missing template error");
        };
        assert!(path.contains("missing.rdp"));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_rewrite_template_refuses_to_overwrite_template() {
        let directory = tempdir().unwrap();
        let template_path = directory.path().join("template.rdp");
        fs::write(&template_path, "audiomode:i:0\n").unwrap();

        let result = rewrite_template(&template_path, &template_path, "server1", &ids(&["0"]));

        assert!(matches!(result, Err(Error::OutputIsTemplate { .. })));
        assert_eq!(fs::read_to_string(&template_path).unwrap(), "audiomode:i:0\n");
    }

    #[test]
    fn test_rewrite_template_requires_monitor_ids() {
        let directory = tempdir().unwrap();
        let template_path = directory.path().join("template.rdp");
        fs::write(&template_path, "").unwrap();

        let result = rewrite_template(
            &template_path,
            &directory.path().join("out.rdp"),
            "server1",
            &[],
        );
        assert!(matches!(result, Err(Error::NoValidMonitorIds(_))));
    }

    #[test]
    fn test_output_file_name_default() {
        let name =
            output_file_name(DEFAULT_OUTPUT_NAME_TEMPLATE, "server1", &ids(&["0", "2"])).unwrap();
        assert_eq!(name, "server1-0-2.rdp");
    }

    #[test]
    fn test_output_file_name_custom_template() {
        let name = output_file_name("{monitors}@{hostname}.rdp", "box", &ids(&["1"])).unwrap();
        assert_eq!(name, "1@box.rdp");
    }

    #[test]
    fn test_output_file_name_unknown_placeholder() {
        let result = output_file_name("{user}.rdp", "server1", &ids(&["0"]));
        assert!(matches!(result, Err(Error::Render(_))));
    }

    #[test]
    fn test_output_file_name_malformed_template() {
        let result = output_file_name("{hostname.rdp", "server1", &ids(&["0"]));
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
