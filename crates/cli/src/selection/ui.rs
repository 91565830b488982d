use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use super::types::{
    ChoiceIndex, CycleDirection, ListChoice, SelectionPrompt, UiState, ViewportState,
};
use super::{NEW_VALUE_OPTION, PAGE_SIZE};
use rdp_launcher_core::error::Result;

/// Rows above the list: title and key help
const HEADER_ROWS: u16 = 2;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// Number of list rows shown for a terminal of `terminal_height` rows.
///
/// Leaves room for the header and the filter line, never shows more than
/// [`PAGE_SIZE`] rows and always at least one.
pub fn viewport_height(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(HEADER_ROWS + 1)
        .clamp(1, PAGE_SIZE)
}

/// Shows the choice list and waits until the user picks an entry or quits.
pub fn prompt_for_choice(prompt: &SelectionPrompt) -> Result<ListChoice> {
    let mut stdout = stdout();

    // Created first so a failure below still restores the terminal
    let _raw_mode_guard = RawModeGuard;
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    stdout.execute(EnableMouseCapture)?;

    let (width, height) = terminal::size()?;

    let mut ui_state = UiState {
        selected_index: 0,
        viewport: ViewportState {
            offset: 0,
            height: viewport_height(height),
            width,
        },
        is_filtering: false,
        filter_text: String::new(),
    };

    let mut indexes_to_display = filter_displayed_indexes(prompt, &ui_state.filter_text);
    redraw_ui(prompt, &ui_state, &indexes_to_display)?;

    let mut down_row: Option<u16> = None;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let mut new_ui_state: Option<UiState> = None;
        let mut index_change_direction: Option<CycleDirection> = None;

        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                let (choice, new_state, direction) =
                    handle_key_event(key_event, &ui_state, &indexes_to_display);

                if let Some(choice) = choice {
                    debug!("List choice: {:?}", choice);
                    return Ok(choice);
                }

                new_ui_state = new_state;
                index_change_direction = direction;
            }
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    down_row = Some(row);
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    let clicked = down_row
                        .take()
                        .and_then(|row| clicked_index(row, &ui_state, indexes_to_display.len()));

                    if let Some(clicked) = clicked {
                        let choice = indexes_to_display[clicked].as_choice();
                        debug!("List choice: {:?}", choice);
                        return Ok(choice);
                    }
                }
                MouseEventKind::ScrollDown => {
                    index_change_direction = Some(CycleDirection::Down);
                }
                MouseEventKind::ScrollUp => {
                    index_change_direction = Some(CycleDirection::Up);
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                new_ui_state = Some(handle_resize(
                    width,
                    height,
                    &ui_state,
                    indexes_to_display.len(),
                ));
            }
            _ => {}
        }

        if let Some(direction) = index_change_direction {
            let current = new_ui_state.as_ref().unwrap_or(&ui_state);
            new_ui_state = Some(move_selected_index(
                current,
                indexes_to_display.len(),
                direction,
            ));
        }

        if let Some(state) = new_ui_state {
            if state != ui_state {
                if state.filter_text != ui_state.filter_text {
                    indexes_to_display = filter_displayed_indexes(prompt, &state.filter_text);
                }

                ui_state = state;
                redraw_ui(prompt, &ui_state, &indexes_to_display)?;
            }
        }
    }
}

/// Handle keyboard events in the choice list
///
/// Returns the final choice if the event ends the prompt, otherwise the
/// updated state and/or a direction to move the selection in.
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[ChoiceIndex],
) -> (
    Option<ListChoice>,
    Option<UiState>,
    Option<CycleDirection>,
) {
    match key_event.code {
        KeyCode::Up => (None, None, Some(CycleDirection::Up)),
        KeyCode::Down => (None, None, Some(CycleDirection::Down)),
        KeyCode::Enter => (
            indexes_to_display
                .get(ui_state.selected_index)
                .map(ChoiceIndex::as_choice),
            None,
            None,
        ),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            (Some(ListChoice::Quit), None, None)
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_none() {
                return (None, None, None);
            }
            reset_selection(&mut updated_state);
            (None, Some(updated_state), None)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            reset_selection(&mut updated_state);
            (None, Some(updated_state), None)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            reset_selection(&mut updated_state);
            (None, Some(updated_state), None)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            (None, Some(updated_state), None)
        }
        KeyCode::Char('k') => (None, None, Some(CycleDirection::Up)),
        KeyCode::Char('j') => (None, None, Some(CycleDirection::Down)),
        KeyCode::Char(NEW_VALUE_OPTION) => (Some(ListChoice::NewValue), None, None),
        KeyCode::Char('q') | KeyCode::Esc => (Some(ListChoice::Quit), None, None),
        _ => (None, None, None),
    }
}

fn reset_selection(ui_state: &mut UiState) {
    ui_state.selected_index = 0;
    ui_state.viewport.offset = 0;
}

/// Position among the displayed entries of a click on `row`, if it hit one.
fn clicked_index(row: u16, ui_state: &UiState, displayed_count: usize) -> Option<usize> {
    let list_row = row.checked_sub(HEADER_ROWS)?;
    if list_row >= ui_state.viewport.height {
        return None;
    }

    let index = list_row as usize + ui_state.viewport.offset;
    (index < displayed_count).then_some(index)
}

/// Handle window resize events
pub fn handle_resize(
    width: u16,
    height: u16,
    ui_state: &UiState,
    displayed_count: usize,
) -> UiState {
    let new_height = viewport_height(height);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport
                .offset
                .saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state
                .selected_index
                .saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > displayed_count {
                new_viewport.offset = displayed_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Move the selected index in the given direction, wrapping at both ends and
/// scrolling the viewport to keep the selection visible.
pub fn move_selected_index(
    ui_state: &UiState,
    displayed_count: usize,
    direction: CycleDirection,
) -> UiState {
    if displayed_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let height = ui_state.viewport.height.max(1) as usize;

    match direction {
        CycleDirection::Up => {
            if new_index == 0 {
                new_index = displayed_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        CycleDirection::Down => {
            new_index = (new_index + 1) % displayed_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index - height + 1;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Entries matching `filter_text`, in list order.
///
/// Earlier answers are fuzzy matched; the new value entry is always kept.
pub fn filter_displayed_indexes(prompt: &SelectionPrompt, filter_text: &str) -> Vec<ChoiceIndex> {
    let matcher = SkimMatcherV2::default();

    let mut filtered: Vec<ChoiceIndex> = prompt
        .choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| {
            filter_text.is_empty() || matcher.fuzzy_match(choice, filter_text).is_some()
        })
        .map(|(i, _)| ChoiceIndex::Previous(i))
        .collect();

    filtered.push(ChoiceIndex::NewValue);
    filtered
}

fn redraw_ui(
    prompt: &SelectionPrompt,
    ui_state: &UiState,
    indexes_to_display: &[ChoiceIndex],
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(prompt, ui_state, indexes_to_display.len())?;
    print_entries_with_selection(prompt, ui_state, indexes_to_display)?;

    if ui_state.is_filtering {
        queue!(
            stdout,
            MoveTo(0, HEADER_ROWS + ui_state.viewport.height),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

fn print_header(prompt: &SelectionPrompt, ui_state: &UiState, displayed_count: usize) -> Result<()> {
    let mut stdout = stdout();

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Filter   |   {NEW_VALUE_OPTION}: New Value   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, displayed_count),
            displayed_count
        )
    };

    let right_padding = " ".repeat(
        (ui_state.viewport.width as usize).saturating_sub(left_padding_size + instructions.len()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(prompt.title),
        SetAttribute(Attribute::Reset),
        MoveTo(0, 1),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

fn write_entry_row(
    row: u16,
    prompt: &SelectionPrompt,
    index: &ChoiceIndex,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let index_as_string = pad_to_width_of(index, prompt.entry_count());
    let content = format!("[{index_as_string}] {}", prompt.label(index));
    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.chars().count()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    } else if *index == ChoiceIndex::NewValue {
        queue!(stdout, SetAttribute(Attribute::Italic))?;
    }

    queue!(
        stdout,
        Print(content),
        Print(padding),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

fn print_entries_with_selection(
    prompt: &SelectionPrompt,
    ui_state: &UiState,
    indexes_to_display: &[ChoiceIndex],
) -> Result<()> {
    let viewport = &ui_state.viewport;

    let visible_entries = indexes_to_display
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, index) in visible_entries.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;

        write_entry_row(
            HEADER_ROWS + i as u16,
            prompt,
            index,
            is_selected,
            viewport.width,
        )?;
    }

    Ok(())
}
