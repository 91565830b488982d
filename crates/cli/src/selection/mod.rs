//! Interactive selection of earlier answers.
//!
//! Each question is asked by showing the answers given on earlier runs plus
//! an entry for typing a new value. Picking an earlier answer returns it as
//! is; picking the new value entry falls back to a plain text prompt.
//!
//! # User Interface
//!
//! The list supports:
//! - Arrow keys or vim-style (j/k) navigation, mouse wheel scrolling
//! - Enter or a mouse click to pick an entry
//! - `n` to type a new value straight away
//! - `/` to fuzzy filter the earlier answers
//! - 'q', Escape or Ctrl-C to quit

pub mod input;
pub mod types;
pub mod ui;

use log::debug;
use rdp_launcher_core::error::Result;

pub use input::{confirm_launch, prompt_value};
pub use types::{ListChoice, SelectionPrompt};
pub use ui::prompt_for_choice;

/// Character used to select the "enter a new value" entry
pub const NEW_VALUE_OPTION: char = 'n';

/// Most list rows shown at once; longer lists scroll.
pub const PAGE_SIZE: u16 = 10;

/// Asks the user to pick an earlier answer or type a new one.
///
/// Returns `None` if the user quit the list.
pub fn select_or_input(prompt: &SelectionPrompt) -> Result<Option<String>> {
    match prompt_for_choice(prompt)? {
        ListChoice::Previous(i) => Ok(prompt.choices.get(i).cloned()),
        ListChoice::NewValue => {
            println!("{}", prompt.title);
            prompt_value(prompt.input_label).map(Some)
        }
        ListChoice::Quit => {
            debug!("Selection cancelled: {}", prompt.title);
            Ok(None)
        }
    }
}
