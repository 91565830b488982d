//! Validation of the values entered at the prompts.

use crate::error::{Error, Result};

/// Separator between monitor IDs in the raw monitor input.
pub const MONITOR_ID_SEPARATOR: char = ',';

/// Characters a hostname may not contain, as it becomes part of a file name.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Rejects an empty or whitespace-only hostname, or one containing a path separator.
pub fn validate_hostname(hostname: &str) -> Result<()> {
    if hostname.trim().is_empty() {
        return Err(Error::EmptyHostname);
    }

    if hostname.contains(PATH_SEPARATORS) {
        return Err(Error::HostnameWithPathSeparator(hostname.to_string()));
    }

    Ok(())
}

/// Splits raw monitor input such as `"0, 1,2"` into monitor IDs.
///
/// Segments are trimmed and empty segments dropped. Order and duplicates are
/// kept as entered.
///
/// # Errors
///
/// Returns an error if the input is blank or contains no non-empty segment.
///
/// # Examples
///
/// ```
/// use rdp_launcher_core::validation::parse_monitor_ids;
///
/// let ids = parse_monitor_ids("  2 , 3 ,, 1 ")?;
/// assert_eq!(ids, vec!["2", "3", "1"]);
/// # Ok::<(), rdp_launcher_core::error::Error>(())
/// ```
pub fn parse_monitor_ids(monitor_input: &str) -> Result<Vec<String>> {
    if monitor_input.trim().is_empty() {
        return Err(Error::EmptyMonitorInput);
    }

    let monitor_ids: Vec<String> = monitor_input
        .split(MONITOR_ID_SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect();

    if monitor_ids.is_empty() {
        return Err(Error::NoValidMonitorIds(monitor_input.to_string()));
    }

    Ok(monitor_ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hostname() {
        assert!(validate_hostname("server1").is_ok());
        assert!(validate_hostname(" server1 ").is_ok());
    }

    #[test]
    fn test_validate_hostname_blank() {
        assert!(matches!(validate_hostname(""), Err(Error::EmptyHostname)));
        assert!(matches!(validate_hostname(" \t "), Err(Error::EmptyHostname)));
    }

    #[test]
    fn test_validate_hostname_path_separator() {
        for hostname in ["../escaped", "a/b", "..\\escaped", "host\\share"] {
            let Err(Error::HostnameWithPathSeparator(rejected)) = validate_hostname(hostname) else {
                panic!("Expected `{hostname}` to be rejected");
            };
            assert_eq!(rejected, hostname);
        }

        // Dots alone are fine for names and addresses
        assert!(validate_hostname("10.0.0.4").is_ok());
        assert!(validate_hostname("server1.example.com:3390").is_ok());
    }

    #[test]
    fn test_parse_single_monitor() {
        assert_eq!(parse_monitor_ids("0").unwrap(), vec!["0"]);
    }

    #[test]
    fn test_parse_trims_and_drops_empty_segments() {
        assert_eq!(parse_monitor_ids("  2 , 3 ,, 1 ").unwrap(), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(parse_monitor_ids("1,1,0").unwrap(), vec!["1", "1", "0"]);
    }

    #[test]
    fn test_parse_blank_input() {
        assert!(matches!(parse_monitor_ids(""), Err(Error::EmptyMonitorInput)));
        assert!(matches!(parse_monitor_ids("   "), Err(Error::EmptyMonitorInput)));
    }

    #[test]
    fn test_parse_only_separators() {
        let result = parse_monitor_ids(" , ,, ");
        assert!(matches!(result, Err(Error::NoValidMonitorIds(_))));
    }
}
