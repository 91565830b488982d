//! Type definitions for the choice list and its UI state.

use std::fmt::{Display, Formatter};

use super::NEW_VALUE_OPTION;

/// What to ask the user and which earlier answers to offer.
#[derive(Debug, Clone, Copy)]
pub struct SelectionPrompt<'a> {
    /// Shown above the list
    pub title: &'a str,
    /// Earlier answers, oldest first
    pub choices: &'a [String],
    /// List entry for typing a new value
    pub new_value_label: &'a str,
    /// Prompt shown when typing a new value
    pub input_label: &'a str,
}

impl SelectionPrompt<'_> {
    /// Text shown in the list for `index`.
    pub fn label(&self, index: &ChoiceIndex) -> &str {
        match index {
            ChoiceIndex::Previous(i) => self.choices.get(*i).map_or("", String::as_str),
            ChoiceIndex::NewValue => self.new_value_label,
        }
    }

    /// Number of entries in the unfiltered list.
    pub fn entry_count(&self) -> usize {
        self.choices.len() + 1
    }
}

/// The user's pick from the choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChoice {
    Previous(usize),
    NewValue,
    Quit,
}

/// Direction to cycle through the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Index of an entry in the choice list.
///
/// Earlier answers come first, the new value entry always last.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ChoiceIndex {
    Previous(usize),
    NewValue,
}

impl Display for ChoiceIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceIndex::Previous(i) => write!(f, "{}", i + 1),
            ChoiceIndex::NewValue => write!(f, "{NEW_VALUE_OPTION}"),
        }
    }
}

impl ChoiceIndex {
    pub fn as_choice(&self) -> ListChoice {
        match self {
            ChoiceIndex::Previous(i) => ListChoice::Previous(*i),
            ChoiceIndex::NewValue => ListChoice::NewValue,
        }
    }
}

/// Visible window of the list.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state of the choice list.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the highlighted entry among the displayed entries
    pub selected_index: usize,
    pub viewport: ViewportState,
    pub is_filtering: bool,
    pub filter_text: String,
}
