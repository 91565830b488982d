use std::io::{stdin, stdout, BufRead, Write};

use rdp_launcher_core::error::Result;

/// Prompts for a free text value.
///
/// Surrounding whitespace is trimmed. End of input yields an empty string.
pub fn prompt_value(input_label: &str) -> Result<String> {
    print!("{input_label}: ");
    stdout().flush()?;

    read_value(&mut stdin().lock())
}

fn read_value(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader.read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Asks whether the remote desktop client should be started. Defaults to yes.
pub fn confirm_launch() -> Result<bool> {
    loop {
        print!("Launch the remote desktop client now? ([Y]es/[n]o): ");
        stdout().flush()?;

        if let Some(answer) = read_confirmation(&mut stdin().lock())? {
            return Ok(answer);
        }
    }
}

/// Reads one yes/no answer; `None` if the answer was not understood.
///
/// End of input counts as no.
fn read_confirmation(reader: &mut impl BufRead) -> Result<Option<bool>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(Some(false));
    }

    match input.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => Ok(Some(true)),
        "n" | "no" => Ok(Some(false)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_value_trims() {
        let mut reader = Cursor::new("  server1 \r\n");
        assert_eq!(read_value(&mut reader).unwrap(), "server1");
    }

    #[test]
    fn test_read_value_end_of_input() {
        let mut reader = Cursor::new("");
        assert_eq!(read_value(&mut reader).unwrap(), "");
    }

    #[test]
    fn test_read_confirmation() {
        let answer = |text: &str| read_confirmation(&mut Cursor::new(text.to_string())).unwrap();

        assert_eq!(answer("\n"), Some(true));
        assert_eq!(answer("Y\n"), Some(true));
        assert_eq!(answer("yes\n"), Some(true));
        assert_eq!(answer("n\n"), Some(false));
        assert_eq!(answer("NO\n"), Some(false));
        assert_eq!(answer("maybe\n"), None);
        assert_eq!(answer(""), Some(false));
    }
}
